use chrono::{Local, NaiveDateTime};
use cwr_config::CwrConfig;
use cwr_format::{FieldValues, RecordType, format_ipi, keys, validate_layouts};
use cwr_model::{Finding, FindingCounts, WorkRow};
use tracing::info;

use crate::error::BuildError;
use crate::transmission::Transmission;
use crate::work::WorkWriter;

/// Line terminator between records.
pub const LINE_ENDING: &str = "\r\n";
const GROUP_ID: u32 = 1;
const GROUP_COUNT: u32 = 1;

/// A generated transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Every record, each terminated by [`LINE_ENDING`].
    pub text: String,
    pub transactions: usize,
    /// Lines in the file, HDR and TRL included.
    pub records: usize,
    /// Data-quality notes: defaults substituted, values dropped.
    pub notes: Vec<Finding>,
}

impl GeneratedFile {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn note_counts(&self) -> FindingCounts {
        FindingCounts::from_findings(&self.notes)
    }
}

/// Turns work rows into a CWR transmission with one group.
///
/// Construction checks the record geometry and the configuration; once a
/// builder exists, generation cannot fail.
#[derive(Debug, Clone)]
pub struct CwrBuilder {
    config: CwrConfig,
    timestamp: NaiveDateTime,
}

impl CwrBuilder {
    pub fn new(config: CwrConfig) -> Result<Self, BuildError> {
        validate_layouts()?;
        config.validate()?;
        Ok(Self {
            config,
            timestamp: Local::now().naive_local(),
        })
    }

    /// Fix the creation timestamp written to HDR and used in file names.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn config(&self) -> &CwrConfig {
        &self.config
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Default registrant file name, `CW{yy}{seq:04}{sender}_{society}.V21`.
    pub fn file_name(&self, sequence: u32) -> String {
        format!(
            "CW{}{:04}{}_{}.V21",
            self.timestamp.format("%y"),
            sequence % 10_000,
            self.config.sender.code(),
            self.config.defaults.recipient_society
        )
    }

    /// The file text only.
    pub fn build_file(&self, rows: &[WorkRow]) -> String {
        self.generate(rows).text
    }

    /// HDR, GRH, one transaction per row, GRT, TRL.
    pub fn generate(&self, rows: &[WorkRow]) -> GeneratedFile {
        info!(rows = rows.len(), "generating CWR transmission");
        let mut out = Transmission::default();
        self.write_header(&mut out);
        for row in rows {
            WorkWriter::new(&self.config, &mut out, row).write();
        }
        Self::write_trailers(&mut out);

        let transactions = out.transactions() as usize;
        let records = out.line_count();
        let (lines, notes) = out.finish();
        let mut text = String::with_capacity(lines.iter().map(|line| line.len() + 2).sum());
        for line in &lines {
            text.push_str(line);
            text.push_str(LINE_ENDING);
        }
        let counts = FindingCounts::from_findings(&notes);
        info!(
            transactions,
            records,
            warnings = counts.warning,
            "generated CWR transmission"
        );
        GeneratedFile {
            text,
            transactions,
            records,
            notes,
        }
    }

    fn write_header(&self, out: &mut Transmission) {
        let date = self.timestamp.format("%Y%m%d").to_string();
        let sender = &self.config.sender;
        let mut hdr = FieldValues::new();
        hdr.set(keys::SENDER_IPI, format_ipi(Some(sender.ipi.as_str())))
            .set(keys::SENDER_NAME, sender.name.as_str())
            .set(keys::EDI_VERSION, self.config.defaults.edi_version.as_str())
            .set(keys::CREATION_DATE, date.as_str())
            .set(keys::CREATION_TIME, self.timestamp.format("%H%M%S").to_string())
            .set(keys::TRANSMISSION_DATE, date);
        out.emit(RecordType::Hdr, &hdr);

        let mut grh = FieldValues::new();
        grh.set(
            keys::TRANSACTION_TYPE,
            self.config.defaults.transaction_type.tag(),
        )
        .set(keys::GROUP_ID, GROUP_ID)
        .set(keys::CWR_VERSION, self.config.defaults.cwr_version.as_str());
        out.emit(RecordType::Grh, &grh);
    }

    /// GRT counts GRH through GRT; TRL counts every line of the file.
    fn write_trailers(out: &mut Transmission) {
        let transactions = out.transactions();
        // Everything but HDR, plus the GRT about to be written.
        let group_records = out.line_count();
        let mut grt = FieldValues::new();
        grt.set(keys::GROUP_ID, GROUP_ID)
            .set(keys::TRANSACTION_COUNT, transactions)
            .set(keys::RECORD_COUNT, group_records);
        out.emit(RecordType::Grt, &grt);

        let mut trl = FieldValues::new();
        trl.set(keys::GROUP_COUNT, GROUP_COUNT)
            .set(keys::TRANSACTION_COUNT, transactions)
            .set(keys::RECORD_COUNT, out.line_count() + 1);
        out.emit(RecordType::Trl, &trl);
    }
}
