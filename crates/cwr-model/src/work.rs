//! Resolved input rows for the transaction builder.
//!
//! Values are kept as the raw text the source table carried (trimmed, never
//! reformatted). Share, duration and IPI formatting is the builder's job so
//! that every fallback lives in one place.

use serde::{Deserialize, Serialize};

/// One source row: one musical work and everything attached to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkRow {
    /// 1-based position in the source table, used in generation notes.
    pub row_number: usize,
    pub title: Option<String>,
    pub work_id: Option<String>,
    pub iswc: Option<String>,
    pub language: Option<String>,
    /// `MM:SS`, `HH:MM:SS` or raw seconds.
    pub duration: Option<String>,
    pub publishers: Vec<PublisherInput>,
    pub writers: Vec<WriterInput>,
    pub recording: RecordingInput,
}

impl WorkRow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: PublisherInput) -> Self {
        self.publishers.push(publisher);
        self
    }

    #[must_use]
    pub fn with_writer(mut self, writer: WriterInput) -> Self {
        self.writers.push(writer);
        self
    }
}

/// An original publisher declared on a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublisherInput {
    pub name: String,
    pub ipi: Option<String>,
    pub agreement: Option<String>,
    pub pr_society: Option<String>,
    pub mr_society: Option<String>,
    pub sr_society: Option<String>,
    /// Percentages such as `50`, `16.5` or `33%`.
    pub pr_share: Option<String>,
    pub mr_share: Option<String>,
    pub sr_share: Option<String>,
}

impl PublisherInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shares(
        mut self,
        pr: impl Into<String>,
        mr: impl Into<String>,
        sr: impl Into<String>,
    ) -> Self {
        self.pr_share = Some(pr.into());
        self.mr_share = Some(mr.into());
        self.sr_share = Some(sr.into());
        self
    }
}

/// A writer (composer/author) declared on a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterInput {
    pub last_name: String,
    pub first_name: Option<String>,
    pub ipi: Option<String>,
    /// Writer designation code (`CA`, `C`, `A`, ...).
    pub capacity: Option<String>,
    pub pr_society: Option<String>,
    pub mr_society: Option<String>,
    pub sr_society: Option<String>,
    pub pr_share: Option<String>,
    pub mr_share: Option<String>,
    pub sr_share: Option<String>,
    /// Name of the original publisher controlling this writer's share.
    pub original_publisher: Option<String>,
}

impl WriterInput {
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shares(
        mut self,
        pr: impl Into<String>,
        mr: impl Into<String>,
        sr: impl Into<String>,
    ) -> Self {
        self.pr_share = Some(pr.into());
        self.mr_share = Some(mr.into());
        self.sr_share = Some(sr.into());
        self
    }

    #[must_use]
    pub fn controlled_by(mut self, publisher: impl Into<String>) -> Self {
        self.original_publisher = Some(publisher.into());
        self
    }
}

/// Release metadata for the REC and ORN records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingInput {
    pub release_date: Option<String>,
    pub album_title: Option<String>,
    pub label: Option<String>,
    pub catalog_number: Option<String>,
    pub ean: Option<String>,
    pub isrc: Option<String>,
    pub track_number: Option<String>,
    pub library: Option<String>,
}

impl RecordingInput {
    /// True when no release field carries a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.release_date,
            &self.album_title,
            &self.label,
            &self.catalog_number,
            &self.ean,
            &self.isrc,
            &self.track_number,
            &self.library,
        ]
        .iter()
        .all(|value| value.as_deref().is_none_or(|text| text.trim().is_empty()))
    }
}
