//! Configuration model.
//!
//! Mirrors the TOML layout one table per struct: `[sender]`,
//! `[administrator]`, `[defaults]`, `[[publishers]]` and `[societies]`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Largest publisher chain number a 2-digit field can carry.
const MAX_CHAIN: usize = 99;
/// Submitter work ids are `prefix + 8 digits` in a 14-character field.
const MAX_WORK_ID_PREFIX: usize = 6;
const IPI_WIDTH: usize = 11;
const PARTY_ID_WIDTH: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CwrConfig {
    pub sender: Sender,
    pub administrator: Administrator,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub publishers: Vec<KnownPublisher>,
    /// Society name -> 3-digit CWR society code.
    #[serde(default)]
    pub societies: BTreeMap<String, String>,
}

/// The party submitting the file (HDR record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sender {
    pub name: String,
    pub ipi: String,
    /// Short submitter code for file names; derived from the name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Sender {
    /// Submitter code: the configured one, else the first three letters or
    /// digits of the name.
    pub fn code(&self) -> String {
        match self.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_uppercase(),
            _ => self
                .name
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(3)
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

/// The sub-publisher collecting on behalf of every original publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Administrator {
    pub name: String,
    pub ipi: String,
    pub party_id: String,
    #[serde(default = "default_role")]
    pub role: String,
    /// TIS territory code of the collection share.
    pub territory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_society: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mr_society: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sr_society: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
}

fn default_role() -> String {
    "SE".to_string()
}

/// Work transaction kind written after GRH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// New work registration.
    #[default]
    Nwr,
    /// Revision of an existing registration.
    Rev,
}

impl TransactionType {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Nwr => "NWR",
            Self::Rev => "REV",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Generation defaults applied when a row leaves a value out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub transaction_type: TransactionType,
    pub work_id_prefix: String,
    pub edi_version: String,
    pub cwr_version: String,
    pub distribution_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub writer_territory: String,
    pub writer_capacity: String,
    pub intended_purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Original publisher used for rows that name none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_publisher: Option<String>,
    /// Receiving society code, used in the default file name.
    pub recipient_society: String,
    pub max_publishers: usize,
    pub max_writers: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            transaction_type: TransactionType::Nwr,
            work_id_prefix: "LUM".to_string(),
            edi_version: "01.10".to_string(),
            cwr_version: "02.10".to_string(),
            distribution_category: "POP".to_string(),
            language: None,
            writer_territory: "2136".to_string(),
            writer_capacity: "CA".to_string(),
            intended_purpose: "LIB".to_string(),
            library: None,
            fallback_publisher: None,
            recipient_society: "052".to_string(),
            max_publishers: 4,
            max_writers: 6,
        }
    }
}

/// Registry entry for a publisher the sender deals with regularly.
///
/// Row values win over registry values; the registry fills the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnownPublisher {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
}

impl CwrConfig {
    /// Case-insensitive lookup in the known publisher registry.
    pub fn known_publisher(&self, name: &str) -> Option<&KnownPublisher> {
        let wanted = name.trim().to_uppercase();
        if wanted.is_empty() {
            return None;
        }
        self.publishers
            .iter()
            .find(|publisher| publisher.name.trim().to_uppercase() == wanted)
    }

    /// 3-digit society code for a society name or code.
    ///
    /// Digits are zero-padded (`52` -> `052`); names are looked up
    /// case-insensitively. Unknown names yield `None`.
    pub fn society_code(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() <= 3 && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return Some(format!("{trimmed:0>3}"));
        }
        self.societies
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, code)| code.clone())
    }

    /// Reject values no generated file could carry.
    pub fn validate(&self) -> Result<()> {
        if self.sender.name.trim().is_empty() {
            return Err(ConfigError::invalid("sender.name", "must not be empty"));
        }
        check_ipi("sender.ipi", &self.sender.ipi)?;

        let admin = &self.administrator;
        if admin.name.trim().is_empty() {
            return Err(ConfigError::invalid("administrator.name", "must not be empty"));
        }
        check_ipi("administrator.ipi", &admin.ipi)?;
        check_party_id("administrator.party_id", &admin.party_id)?;
        if admin.role.trim().is_empty() || admin.role.trim().len() > 2 {
            return Err(ConfigError::invalid(
                "administrator.role",
                format!("'{}' is not a 2-character role code", admin.role),
            ));
        }
        check_territory("administrator.territory", &admin.territory)?;
        for (field, code) in [
            ("administrator.pr_society", &admin.pr_society),
            ("administrator.mr_society", &admin.mr_society),
            ("administrator.sr_society", &admin.sr_society),
        ] {
            if let Some(code) = code {
                check_society(field, code)?;
            }
        }

        let defaults = &self.defaults;
        check_territory("defaults.writer_territory", &defaults.writer_territory)?;
        check_society("defaults.recipient_society", &defaults.recipient_society)?;
        if defaults.work_id_prefix.chars().count() > MAX_WORK_ID_PREFIX {
            return Err(ConfigError::invalid(
                "defaults.work_id_prefix",
                format!("longer than {MAX_WORK_ID_PREFIX} characters"),
            ));
        }
        for (field, value) in [
            ("defaults.max_publishers", defaults.max_publishers),
            ("defaults.max_writers", defaults.max_writers),
        ] {
            if value == 0 || value > MAX_CHAIN {
                return Err(ConfigError::invalid(
                    field,
                    format!("{value} is outside 1..={MAX_CHAIN}"),
                ));
            }
        }

        let mut seen = Vec::with_capacity(self.publishers.len());
        for publisher in &self.publishers {
            let key = publisher.name.trim().to_uppercase();
            if key.is_empty() {
                return Err(ConfigError::invalid("publishers.name", "must not be empty"));
            }
            if seen.contains(&key) {
                return Err(ConfigError::DuplicatePublisher {
                    name: publisher.name.clone(),
                });
            }
            if let Some(ipi) = &publisher.ipi {
                check_ipi(&format!("publishers.{}.ipi", publisher.name), ipi)?;
            }
            if let Some(party_id) = &publisher.party_id {
                check_party_id(&format!("publishers.{}.party_id", publisher.name), party_id)?;
            }
            seen.push(key);
        }

        for (name, code) in &self.societies {
            check_society(&format!("societies.{name}"), code)?;
        }
        Ok(())
    }
}

fn check_ipi(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() || value.len() > IPI_WIDTH || !value.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::invalid(
            field,
            format!("'{value}' is not an IPI number of up to {IPI_WIDTH} digits"),
        ));
    }
    Ok(())
}

fn check_party_id(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > PARTY_ID_WIDTH {
        return Err(ConfigError::invalid(
            field,
            format!("'{value}' must be 1 to {PARTY_ID_WIDTH} characters"),
        ));
    }
    Ok(())
}

fn check_territory(field: &str, value: &str) -> Result<()> {
    if value.len() != 4 || !value.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::invalid(
            field,
            format!("'{value}' is not a 4-digit TIS territory code"),
        ));
    }
    Ok(())
}

fn check_society(field: &str, value: &str) -> Result<()> {
    if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::invalid(
            field,
            format!("'{value}' is not a 3-digit society code"),
        ));
    }
    Ok(())
}
