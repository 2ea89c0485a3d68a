//! Placeholder keys used by the record layouts.

// Transaction prefix
pub const TRANSACTION_SEQ: &str = "transaction_seq";
pub const RECORD_SEQ: &str = "record_seq";

// HDR
pub const SENDER_IPI: &str = "sender_ipi";
pub const SENDER_NAME: &str = "sender_name";
pub const EDI_VERSION: &str = "edi_version";
pub const CREATION_DATE: &str = "creation_date";
pub const CREATION_TIME: &str = "creation_time";
pub const TRANSMISSION_DATE: &str = "transmission_date";

// GRH / GRT / TRL
pub const TRANSACTION_TYPE: &str = "transaction_type";
pub const GROUP_ID: &str = "group_id";
pub const CWR_VERSION: &str = "cwr_version";
pub const BATCH_REQUEST: &str = "batch_request";
pub const GROUP_COUNT: &str = "group_count";
pub const TRANSACTION_COUNT: &str = "transaction_count";
pub const RECORD_COUNT: &str = "record_count";

// NWR / REV
pub const WORK_TITLE: &str = "work_title";
pub const LANGUAGE: &str = "language";
pub const WORK_ID: &str = "work_id";
pub const ISWC: &str = "iswc";
pub const DISTRIBUTION_CATEGORY: &str = "distribution_category";
pub const DURATION: &str = "duration";
pub const RECORDED_INDICATOR: &str = "recorded_indicator";

// Interested parties (SPU, SPT, SWR, SWT, PWR)
pub const CHAIN_ID: &str = "chain_id";
pub const PARTY_ID: &str = "party_id";
pub const PUBLISHER_NAME: &str = "publisher_name";
pub const PUBLISHER_ROLE: &str = "publisher_role";
pub const LAST_NAME: &str = "last_name";
pub const FIRST_NAME: &str = "first_name";
pub const CAPACITY: &str = "capacity";
pub const WRITER_PARTY_ID: &str = "writer_party_id";
pub const IPI: &str = "ipi";
pub const AGREEMENT: &str = "agreement";
pub const PR_SOCIETY: &str = "pr_society";
pub const PR_SHARE: &str = "pr_share";
pub const MR_SOCIETY: &str = "mr_society";
pub const MR_SHARE: &str = "mr_share";
pub const SR_SOCIETY: &str = "sr_society";
pub const SR_SHARE: &str = "sr_share";
pub const TERRITORY: &str = "territory";
pub const TERRITORY_SEQ: &str = "territory_seq";

// REC
pub const RELEASE_DATE: &str = "release_date";
pub const RELEASE_DURATION: &str = "release_duration";
pub const ALBUM_TITLE: &str = "album_title";
pub const ALBUM_LABEL: &str = "album_label";
pub const CATALOG_NUMBER: &str = "catalog_number";
pub const EAN: &str = "ean";
pub const ISRC: &str = "isrc";
pub const MEDIA_TYPE: &str = "media_type";

// ORN
pub const INTENDED_PURPOSE: &str = "intended_purpose";
pub const PRODUCTION_TITLE: &str = "production_title";
pub const CD_IDENTIFIER: &str = "cd_identifier";
pub const CUT_NUMBER: &str = "cut_number";
pub const LIBRARY: &str = "library";
