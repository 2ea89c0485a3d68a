//! Record content checks that need no context beyond the line.

use std::sync::LazyLock;

use cwr_format::RecordType;
use cwr_format::layout::{rec, spu, swr, work};
use cwr_format::{FieldDescriptor, Share};
use cwr_model::Finding;
use regex::Regex;

use super::value;

/// ISWC as carried in CWR: `T` followed by ten digits, no separators.
static ISWC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T\d{10}$").expect("Invalid ISWC regex"));

/// ISO 3901: country, registrant, year, designation.
static ISRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}\d{7}$").expect("Invalid ISRC regex"));

const ZERO_DURATION: &str = "000000";

pub(super) fn check(number: usize, record: RecordType, line: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    match record {
        RecordType::Nwr | RecordType::Rev => {
            let version = value(&work::VERSION_TYPE, line);
            if !version.is_empty() && version != work::ORIGINAL_VERSION {
                findings.push(Finding::warning(
                    number,
                    format!(
                        "Version Type is '{version}', expected '{}'",
                        work::ORIGINAL_VERSION
                    ),
                    line,
                ));
            }
            if value(&work::DURATION, line) == ZERO_DURATION {
                findings.push(Finding::warning(number, "Zero duration", line));
            }
            let iswc = value(&work::ISWC, line);
            if !iswc.is_empty() && !ISWC_REGEX.is_match(&iswc) {
                findings.push(Finding::warning(
                    number,
                    format!("ISWC '{iswc}' is not a T followed by 10 digits"),
                    line,
                ));
            }
        }
        RecordType::Spu => {
            check_shares(
                number,
                line,
                &[spu::PR_SHARE, spu::MR_SHARE, spu::SR_SHARE],
                &mut findings,
            );
        }
        RecordType::Swr => {
            check_shares(
                number,
                line,
                &[swr::PR_SHARE, swr::MR_SHARE, swr::SR_SHARE],
                &mut findings,
            );
        }
        RecordType::Rec => {
            let isrc = value(&rec::ISRC, line);
            if !isrc.is_empty() && !ISRC_REGEX.is_match(&isrc) {
                findings.push(Finding::warning(
                    number,
                    format!("ISRC '{isrc}' is not a valid ISO 3901 code"),
                    line,
                ));
            }
        }
        _ => {}
    }
    findings
}

/// Ownership shares above 100.00%. Non-numeric values are reported by the
/// positional checks.
fn check_shares(
    number: usize,
    line: &str,
    fields: &[FieldDescriptor],
    findings: &mut Vec<Finding>,
) {
    for field in fields {
        let Some(share) = Share::from_field(&value(field, line)) else {
            continue;
        };
        if share > Share::FULL {
            findings.push(Finding::warning(
                number,
                format!("{} {} exceeds 100%", field.name, share.to_field()),
                line,
            ));
        }
    }
}
