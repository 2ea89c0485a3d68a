//! Column name resolution.
//!
//! Source tables name the same column many ways (`WRITER 1: Last Name`,
//! `Writer 1 Last Name`, `writer1_last_name`). Header comparison goes
//! through [`column_key`], so those dialects collapse to one key; the
//! alias table covers names that differ in words, not just punctuation.

use crate::csv_table::TableRow;

pub const TITLE: &str = "TRACK: Title";
pub const WORK_ID: &str = "CODE: Work ID";
pub const ISWC: &str = "CODE: ISWC";
pub const LANGUAGE: &str = "TRACK: Language";
pub const DURATION: &str = "TRACK: Duration";
pub const TRACK_NUMBER: &str = "TRACK: Number";
pub const ALBUM_TITLE: &str = "ALBUM: Title";
pub const ALBUM_LABEL: &str = "ALBUM: Label";
pub const CATALOG_NUMBER: &str = "ALBUM: Catalog Number";
pub const RELEASE_DATE: &str = "ALBUM: Release Date";
pub const EAN: &str = "CODE: EAN";
pub const ISRC: &str = "CODE: ISRC";
pub const LIBRARY: &str = "LIBRARY: Name";

const WORK_ALIASES: &[(&str, &[&str])] = &[
    (TITLE, &["Title", "Work Title", "Song Title", "Track Title"]),
    (WORK_ID, &["Work ID", "Submitter Work ID", "Song Code", "Track ID"]),
    (ISWC, &["ISWC", "ISWC Code"]),
    (LANGUAGE, &["Language", "Language Code"]),
    (DURATION, &["Duration", "Length", "Track Duration"]),
    (TRACK_NUMBER, &["Track Number", "Track No", "Cut Number"]),
    (ALBUM_TITLE, &["Album Title", "Album"]),
    (ALBUM_LABEL, &["Label", "Record Label", "Album Label"]),
    (
        CATALOG_NUMBER,
        &["Catalog Number", "Catalogue Number", "Cat No"],
    ),
    (RELEASE_DATE, &["Release Date", "First Release Date"]),
    (EAN, &["EAN", "UPC", "Barcode"]),
    (ISRC, &["ISRC", "ISRC Code"]),
    (LIBRARY, &["Library", "Library Name"]),
];

/// Field words that mean the same for every indexed publisher/writer.
const PARTY_FIELD_SYNONYMS: &[(&str, &[&str])] = &[
    ("Agreement", &["Agreement Number", "Society Agreement"]),
    ("Capacity", &["Role", "Designation"]),
    ("Original Publisher", &["Publisher"]),
    (
        "PR Share",
        &["Performance Share", "PR %", "Owner Performance Share"],
    ),
    (
        "MR Share",
        &["Mechanical Share", "MR %", "Owner Mechanical Share"],
    ),
    ("SR Share", &["Sync Share", "SR %", "Owner Sync Share"]),
];

/// Generic single-party names, accepted for index 1 only.
const FIRST_PUBLISHER_ALIASES: &[(&str, &[&str])] = &[
    ("Name", &["Publisher", "Publisher Name", "Original Publisher"]),
    ("IPI", &["Publisher IPI"]),
    ("Agreement", &["Agreement", "Agreement Number"]),
];

const FIRST_WRITER_ALIASES: &[(&str, &[&str])] = &[
    ("Last Name", &["Writer Last Name", "Composer Last Name", "Composer"]),
    ("First Name", &["Writer First Name", "Composer First Name"]),
    ("IPI", &["Writer IPI", "Composer IPI"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Publisher,
    Writer,
}

impl Party {
    fn prefix(self) -> &'static str {
        match self {
            Self::Publisher => "PUBLISHER",
            Self::Writer => "WRITER",
        }
    }

    fn first_aliases(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Self::Publisher => FIRST_PUBLISHER_ALIASES,
            Self::Writer => FIRST_WRITER_ALIASES,
        }
    }
}

/// Canonical name of an indexed column, e.g. `WRITER 2: Last Name`.
pub fn party_column(party: Party, index: usize, field: &str) -> String {
    format!("{} {index}: {field}", party.prefix())
}

pub fn publisher_column(index: usize, field: &str) -> String {
    party_column(Party::Publisher, index, field)
}

pub fn writer_column(index: usize, field: &str) -> String {
    party_column(Party::Writer, index, field)
}

/// Lowercase alphanumerics only: `"WRITER 1: Last Name"` -> `"writer1lastname"`.
pub fn column_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn split_indexed(canonical: &str) -> Option<(Party, usize, &str)> {
    let (party, rest) = if let Some(rest) = canonical.strip_prefix("PUBLISHER ") {
        (Party::Publisher, rest)
    } else if let Some(rest) = canonical.strip_prefix("WRITER ") {
        (Party::Writer, rest)
    } else {
        return None;
    };
    let (index, field) = rest.split_once(':')?;
    Some((party, index.trim().parse().ok()?, field.trim()))
}

/// Other names accepted for `canonical`, in lookup order.
pub fn column_aliases(canonical: &str) -> Vec<String> {
    if let Some((party, index, field)) = split_indexed(canonical) {
        let mut aliases: Vec<String> = PARTY_FIELD_SYNONYMS
            .iter()
            .filter(|(name, _)| *name == field)
            .flat_map(|(_, synonyms)| synonyms.iter())
            .map(|synonym| party_column(party, index, synonym))
            .collect();
        if index == 1 {
            aliases.extend(
                party
                    .first_aliases()
                    .iter()
                    .filter(|(name, _)| *name == field)
                    .flat_map(|(_, names)| names.iter())
                    .map(|name| (*name).to_string()),
            );
        }
        return aliases;
    }
    WORK_ALIASES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| aliases.iter().map(|alias| (*alias).to_string()).collect())
        .unwrap_or_default()
}

/// Value of `canonical` in `row`: the canonical column first, then each
/// alias. `None` when every candidate is absent or empty.
pub fn resolve_column<'a>(row: &TableRow<'a>, canonical: &str) -> Option<&'a str> {
    if let Some(value) = row.get(canonical) {
        return Some(value);
    }
    column_aliases(canonical)
        .iter()
        .find_map(|alias| row.get(alias))
}
