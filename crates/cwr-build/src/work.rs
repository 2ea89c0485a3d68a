//! One row -> one transaction.

use cwr_config::CwrConfig;
use cwr_format::{
    FieldValues, RecordType, Share, format_date, format_duration, format_ipi, format_share, keys,
    layout, parse_duration_seconds,
};
use cwr_model::{Finding, PublisherInput, Severity, WorkRow, WriterInput};
use tracing::{debug, warn};

use crate::transmission::Transmission;

pub(crate) const UNKNOWN_TITLE: &str = "UNKNOWN TITLE";
const IPI_WIDTH: usize = 11;

/// A publisher already written in the open transaction, for PWR links.
#[derive(Debug)]
struct Registered {
    chain: usize,
    name: String,
    party_id: String,
    agreement: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn alphanumeric(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

pub(crate) struct WorkWriter<'a> {
    config: &'a CwrConfig,
    out: &'a mut Transmission,
    row: &'a WorkRow,
    title: String,
    registered: Vec<Registered>,
}

impl<'a> WorkWriter<'a> {
    pub(crate) fn new(config: &'a CwrConfig, out: &'a mut Transmission, row: &'a WorkRow) -> Self {
        let title = present(row.title.as_deref())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        Self {
            config,
            out,
            row,
            title,
            registered: Vec::new(),
        }
    }

    /// Emit the whole transaction for the row.
    pub(crate) fn write(mut self) {
        let row = self.row;
        self.write_work();

        let publishers = self.publishers();
        let max_publishers = self.config.defaults.max_publishers;
        if publishers.len() > max_publishers {
            self.note(
                Severity::Warning,
                format!(
                    "{} publishers declared; only the first {max_publishers} were written",
                    publishers.len()
                ),
            );
        }
        for (idx, publisher) in publishers.iter().take(max_publishers).enumerate() {
            self.write_publisher(idx + 1, publisher);
        }

        let max_writers = self.config.defaults.max_writers;
        if row.writers.is_empty() {
            self.note(Severity::Warning, "no writers; the transaction has no SWR record");
        } else if row.writers.len() > max_writers {
            self.note(
                Severity::Warning,
                format!(
                    "{} writers declared; only the first {max_writers} were written",
                    row.writers.len()
                ),
            );
        }
        for writer in row.writers.iter().take(max_writers) {
            self.write_writer(writer);
        }

        self.write_recording();
        debug!(
            row = row.row_number,
            publishers = self.registered.len(),
            writers = row.writers.len().min(max_writers),
            "wrote transaction"
        );
    }

    fn note(&mut self, level: Severity, message: impl Into<String>) {
        self.out.note(Finding::new(
            level,
            self.row.row_number,
            message,
            self.title.clone(),
        ));
    }

    /// `what` names the party for the note; `field` is all the log sees.
    fn share(&mut self, raw: Option<&str>, what: &str, field: &'static str) -> String {
        if let Some(text) = present(raw) {
            if Share::parse(text).is_none() {
                warn!(row = self.row.row_number, field, "share is not a percentage");
                self.note(
                    Severity::Warning,
                    format!("{what} share '{text}' is not a percentage; wrote 00000"),
                );
            }
        }
        format_share(raw)
    }

    fn ipi(&mut self, raw: Option<&str>, what: &str, field: &'static str) -> String {
        let Some(text) = present(raw) else {
            return String::new();
        };
        let digits = format_ipi(Some(text));
        if digits.is_empty() {
            warn!(row = self.row.row_number, field, "IPI is not numeric");
            self.note(
                Severity::Warning,
                format!("{what} IPI '{text}' is not numeric; left blank"),
            );
        } else if digits.len() > IPI_WIDTH {
            self.note(
                Severity::Warning,
                format!("{what} IPI '{text}' is longer than {IPI_WIDTH} digits"),
            );
        }
        digits
    }

    fn society(&mut self, raw: Option<&str>, what: &str) -> Option<String> {
        let text = present(raw)?;
        let code = self.config.society_code(text);
        if code.is_none() {
            self.note(
                Severity::Warning,
                format!("{what} society '{text}' has no known code; left blank"),
            );
        }
        code
    }

    fn write_work(&mut self) {
        let config = self.config;
        let row = self.row;
        let seq = self.out.next_transaction_seq();
        if present(row.title.as_deref()).is_none() {
            warn!(row = row.row_number, "row has no title");
            self.note(Severity::Warning, format!("missing title; wrote '{UNKNOWN_TITLE}'"));
        }

        let work_id = present(row.work_id.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{:08}", config.defaults.work_id_prefix, seq + 1));
        let duration = match present(row.duration.as_deref()) {
            Some(text) if parse_duration_seconds(text).is_none() => {
                self.note(
                    Severity::Warning,
                    format!("duration '{text}' is not MM:SS, HH:MM:SS or seconds; wrote 000000"),
                );
                format_duration(None)
            }
            Some(text) => {
                let formatted = format_duration(Some(text));
                if formatted == format_duration(None)
                    && parse_duration_seconds(text).is_some_and(|seconds| seconds > 0)
                {
                    warn!(row = row.row_number, "duration does not fit HHMMSS");
                    self.note(
                        Severity::Warning,
                        format!("duration '{text}' is longer than 99:59:59; wrote 000000"),
                    );
                }
                formatted
            }
            None => {
                self.note(Severity::Info, "no duration; wrote 000000");
                format_duration(None)
            }
        };
        let recorded = if row.recording.is_empty() { "U" } else { "Y" };

        let mut values = FieldValues::new();
        values
            .set(keys::WORK_TITLE, self.title.as_str())
            .set(keys::WORK_ID, work_id)
            .set_opt(
                keys::LANGUAGE,
                present(row.language.as_deref()).or(config.defaults.language.as_deref()),
            )
            .set_opt(keys::ISWC, present(row.iswc.as_deref()).map(alphanumeric))
            .set(
                keys::DISTRIBUTION_CATEGORY,
                config.defaults.distribution_category.as_str(),
            )
            .set(keys::DURATION, duration)
            .set(keys::RECORDED_INDICATOR, recorded);
        let record = match config.defaults.transaction_type {
            cwr_config::TransactionType::Nwr => RecordType::Nwr,
            cwr_config::TransactionType::Rev => RecordType::Rev,
        };
        self.out.begin_transaction(record, values);
    }

    fn publishers(&mut self) -> Vec<PublisherInput> {
        if !self.row.publishers.is_empty() {
            return self.row.publishers.clone();
        }
        match self.config.defaults.fallback_publisher.clone() {
            Some(name) => {
                self.note(
                    Severity::Info,
                    format!("no publishers; using fallback publisher '{name}'"),
                );
                vec![PublisherInput::new(name)]
            }
            None => {
                self.note(Severity::Warning, "no publishers; the transaction has no SPU record");
                Vec::new()
            }
        }
    }

    /// The (original SPU, administrator SPU, SPT) triad.
    fn write_publisher(&mut self, chain: usize, publisher: &PublisherInput) {
        let config = self.config;
        let admin = &config.administrator;
        let known = config.known_publisher(&publisher.name);
        let party_id = match known.and_then(|entry| entry.party_id.clone()) {
            Some(id) => id,
            None => self.out.ids.publisher(&publisher.name),
        };
        let agreement = present(publisher.agreement.as_deref())
            .map(str::to_string)
            .or_else(|| known.and_then(|entry| entry.agreement.clone()));
        let what = format!("publisher '{}'", publisher.name);
        let ipi_raw = present(publisher.ipi.as_deref())
            .or_else(|| known.and_then(|entry| entry.ipi.as_deref()));
        let ipi = self.ipi(ipi_raw, &what, "publisher IPI");
        let pr = self.share(
            publisher.pr_share.as_deref(),
            &format!("{what} PR"),
            "publisher PR share",
        );
        let mr = self.share(
            publisher.mr_share.as_deref(),
            &format!("{what} MR"),
            "publisher MR share",
        );
        let sr = self.share(
            publisher.sr_share.as_deref(),
            &format!("{what} SR"),
            "publisher SR share",
        );
        let pr_society = self.society(publisher.pr_society.as_deref(), &what);
        let mr_society = self.society(publisher.mr_society.as_deref(), &what);
        let sr_society = self.society(publisher.sr_society.as_deref(), &what);

        let mut original = FieldValues::new();
        original
            .set(keys::CHAIN_ID, chain)
            .set(keys::PARTY_ID, party_id.as_str())
            .set(keys::PUBLISHER_NAME, publisher.name.as_str())
            .set(keys::PUBLISHER_ROLE, layout::spu::ORIGINAL_PUBLISHER)
            .set(keys::IPI, ipi)
            .set_opt(keys::PR_SOCIETY, pr_society)
            .set(keys::PR_SHARE, pr.as_str())
            .set_opt(keys::MR_SOCIETY, mr_society)
            .set(keys::MR_SHARE, mr)
            .set_opt(keys::SR_SOCIETY, sr_society)
            .set(keys::SR_SHARE, sr)
            .set_opt(keys::AGREEMENT, agreement.as_deref());
        self.out.emit_detail(RecordType::Spu, original);

        let mut administrator = FieldValues::new();
        administrator
            .set(keys::CHAIN_ID, chain)
            .set(keys::PARTY_ID, admin.party_id.as_str())
            .set(keys::PUBLISHER_NAME, admin.name.as_str())
            .set(keys::PUBLISHER_ROLE, admin.role.as_str())
            .set(keys::IPI, format_ipi(Some(admin.ipi.as_str())))
            .set_opt(keys::PR_SOCIETY, admin.pr_society.as_deref())
            .set(keys::PR_SHARE, Share::ZERO.to_field())
            .set_opt(keys::MR_SOCIETY, admin.mr_society.as_deref())
            .set(keys::MR_SHARE, Share::ZERO.to_field())
            .set_opt(keys::SR_SOCIETY, admin.sr_society.as_deref())
            .set(keys::SR_SHARE, Share::ZERO.to_field())
            .set_opt(keys::AGREEMENT, admin.agreement.as_deref());
        self.out.emit_detail(RecordType::Spu, administrator);

        let mut territory = FieldValues::new();
        territory
            .set(keys::PARTY_ID, admin.party_id.as_str())
            .set(keys::PR_SHARE, pr)
            .set(keys::MR_SHARE, Share::FULL.to_field())
            .set(keys::SR_SHARE, Share::FULL.to_field())
            .set(keys::TERRITORY, admin.territory.as_str())
            .set(keys::TERRITORY_SEQ, 1u32);
        self.out.emit_detail(RecordType::Spt, territory);

        self.registered.push(Registered {
            chain,
            name: publisher.name.trim().to_uppercase(),
            party_id,
            agreement,
        });
    }

    /// The (SWR, SWT, optional PWR) group.
    fn write_writer(&mut self, writer: &WriterInput) {
        let config = self.config;
        let party_id = self.out.ids.writer(writer);
        let what = format!("writer '{}'", writer.last_name);
        let ipi = self.ipi(writer.ipi.as_deref(), &what, "writer IPI");
        let pr = self.share(writer.pr_share.as_deref(), &format!("{what} PR"), "writer PR share");
        let mr = self.share(writer.mr_share.as_deref(), &format!("{what} MR"), "writer MR share");
        let sr = self.share(writer.sr_share.as_deref(), &format!("{what} SR"), "writer SR share");
        let pr_society = self.society(writer.pr_society.as_deref(), &what);
        let mr_society = self.society(writer.mr_society.as_deref(), &what);
        let sr_society = self.society(writer.sr_society.as_deref(), &what);
        let capacity = present(writer.capacity.as_deref())
            .unwrap_or(config.defaults.writer_capacity.as_str());

        let mut swr = FieldValues::new();
        swr.set(keys::PARTY_ID, party_id.as_str())
            .set(keys::LAST_NAME, writer.last_name.as_str())
            .set_opt(keys::FIRST_NAME, present(writer.first_name.as_deref()))
            .set(keys::CAPACITY, capacity)
            .set(keys::IPI, ipi)
            .set_opt(keys::PR_SOCIETY, pr_society)
            .set(keys::PR_SHARE, pr.as_str())
            .set_opt(keys::MR_SOCIETY, mr_society)
            .set(keys::MR_SHARE, mr.as_str())
            .set_opt(keys::SR_SOCIETY, sr_society)
            .set(keys::SR_SHARE, sr.as_str());
        self.out.emit_detail(RecordType::Swr, swr);

        let mut swt = FieldValues::new();
        swt.set(keys::PARTY_ID, party_id.as_str())
            .set(keys::PR_SHARE, pr)
            .set(keys::MR_SHARE, mr)
            .set(keys::SR_SHARE, sr)
            .set(keys::TERRITORY, config.defaults.writer_territory.as_str())
            .set(keys::TERRITORY_SEQ, 1u32);
        self.out.emit_detail(RecordType::Swt, swt);

        let Some(wanted) = present(writer.original_publisher.as_deref()) else {
            return;
        };
        let wanted_key = wanted.to_uppercase();
        let Some(link) = self.registered.iter().find(|entry| entry.name == wanted_key) else {
            self.note(
                Severity::Info,
                format!("{what}: original publisher '{wanted}' is not on this work; no PWR written"),
            );
            return;
        };
        let mut pwr = FieldValues::new();
        pwr.set(keys::PARTY_ID, link.party_id.as_str())
            .set(keys::PUBLISHER_NAME, link.name.as_str())
            .set_opt(keys::AGREEMENT, link.agreement.as_deref())
            .set(keys::WRITER_PARTY_ID, party_id)
            .set(keys::CHAIN_ID, link.chain);
        self.out.emit_detail(RecordType::Pwr, pwr);
    }

    /// REC when the row carries release data, ORN when a library applies.
    fn write_recording(&mut self) {
        let config = self.config;
        let row = self.row;
        let recording = &row.recording;

        if !recording.is_empty() {
            let release_date = match present(recording.release_date.as_deref()) {
                Some(text) => {
                    let date = format_date(text);
                    if date.is_none() {
                        self.note(
                            Severity::Warning,
                            format!("release date '{text}' is not a date; left blank"),
                        );
                    }
                    date
                }
                None => None,
            };
            let ean = match present(recording.ean.as_deref()) {
                Some(text) => {
                    let digits: String = text.chars().filter(|ch| !matches!(ch, ' ' | '-')).collect();
                    if digits.chars().all(|ch| ch.is_ascii_digit()) {
                        Some(digits)
                    } else {
                        self.note(Severity::Warning, format!("EAN '{text}' is not numeric; left blank"));
                        None
                    }
                }
                None => None,
            };
            let release_duration = present(row.duration.as_deref())
                .filter(|text| parse_duration_seconds(text).is_some())
                .map(|text| format_duration(Some(text)));

            let mut rec = FieldValues::new();
            rec.set_opt(keys::RELEASE_DATE, release_date)
                .set_opt(keys::RELEASE_DURATION, release_duration)
                .set_opt(keys::ALBUM_TITLE, present(recording.album_title.as_deref()))
                .set_opt(keys::ALBUM_LABEL, present(recording.label.as_deref()))
                .set_opt(keys::CATALOG_NUMBER, present(recording.catalog_number.as_deref()))
                .set_opt(keys::EAN, ean)
                .set_opt(keys::ISRC, present(recording.isrc.as_deref()).map(alphanumeric));
            self.out.emit_detail(RecordType::Rec, rec);
        }

        let library = present(recording.library.as_deref()).or(config.defaults.library.as_deref());
        let Some(library) = library else {
            return;
        };
        let cut_number = match present(recording.track_number.as_deref()) {
            Some(text) if text.len() <= layout::orn::CUT_NUMBER.length
                && text.chars().all(|ch| ch.is_ascii_digit()) =>
            {
                Some(text)
            }
            Some(text) => {
                self.note(
                    Severity::Warning,
                    format!("track number '{text}' is not a cut number; left blank"),
                );
                None
            }
            None => None,
        };
        let mut orn = FieldValues::new();
        orn.set(keys::INTENDED_PURPOSE, config.defaults.intended_purpose.as_str())
            .set_opt(keys::PRODUCTION_TITLE, present(recording.album_title.as_deref()))
            .set_opt(keys::CD_IDENTIFIER, present(recording.catalog_number.as_deref()))
            .set_opt(keys::CUT_NUMBER, cut_number)
            .set(keys::LIBRARY, library);
        self.out.emit_detail(RecordType::Orn, orn);
    }
}
