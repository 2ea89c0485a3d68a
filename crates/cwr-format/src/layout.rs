//! Canonical CWR record geometry.
//!
//! One table per record type. The assembler writes these fields and the
//! validator reads them back, so an offset is only ever declared here.
//!
//! Every transaction record (NWR/REV and its detail records) starts with the
//! same prefix:
//!
//! | Offset | Length | Field              |
//! |--------|--------|--------------------|
//! | 0      | 3      | Record tag         |
//! | 3      | 8      | Transaction seq    |
//! | 11     | 8      | Record seq         |

use std::fmt;

use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::keys;
use crate::template::RecordTemplate;

/// Width of the record tag at offset 0.
pub const TAG_WIDTH: usize = 3;

pub const TRANSACTION_SEQ: FieldDescriptor =
    FieldDescriptor::numeric("Transaction Seq", 3, 8, keys::TRANSACTION_SEQ).required();
pub const RECORD_SEQ: FieldDescriptor =
    FieldDescriptor::numeric("Record Seq", 11, 8, keys::RECORD_SEQ).required();

/// Transmission header.
pub mod hdr {
    use super::{FieldDescriptor, keys};

    pub const SENDER_IPI: FieldDescriptor =
        FieldDescriptor::numeric("Sender IPI", 3, 11, keys::SENDER_IPI).required();
    pub const SENDER_NAME: FieldDescriptor =
        FieldDescriptor::text("Sender Name", 14, 45, keys::SENDER_NAME)
            .required()
            .watch_truncation();
    pub const EDI_VERSION_DEFAULT: FieldDescriptor =
        FieldDescriptor::literal("EDI Version", 59, 5, "01.10");
    pub const EDI_VERSION: FieldDescriptor =
        FieldDescriptor::text("EDI Version", 59, 5, keys::EDI_VERSION).required();
    pub const CREATION_DATE: FieldDescriptor =
        FieldDescriptor::numeric("Creation Date", 64, 8, keys::CREATION_DATE).required();
    pub const CREATION_TIME: FieldDescriptor =
        FieldDescriptor::numeric("Creation Time", 72, 6, keys::CREATION_TIME).required();
    pub const TRANSMISSION_DATE: FieldDescriptor =
        FieldDescriptor::numeric("Transmission Date", 78, 8, keys::TRANSMISSION_DATE).required();

    pub const FIELDS: &[FieldDescriptor] = &[
        SENDER_IPI,
        SENDER_NAME,
        EDI_VERSION_DEFAULT,
        EDI_VERSION,
        CREATION_DATE,
        CREATION_TIME,
        TRANSMISSION_DATE,
    ];
}

/// Group header.
pub mod grh {
    use super::{FieldDescriptor, keys};

    pub const TRANSACTION_TYPE: FieldDescriptor =
        FieldDescriptor::text("Transaction Type", 3, 3, keys::TRANSACTION_TYPE).required();
    pub const GROUP_ID: FieldDescriptor =
        FieldDescriptor::numeric("Group ID", 6, 5, keys::GROUP_ID).required();
    pub const VERSION_DEFAULT: FieldDescriptor =
        FieldDescriptor::literal("Version Number", 11, 5, "02.10");
    pub const VERSION: FieldDescriptor =
        FieldDescriptor::text("Version Number", 11, 5, keys::CWR_VERSION).required();
    pub const BATCH_REQUEST: FieldDescriptor =
        FieldDescriptor::numeric("Batch Request", 16, 10, keys::BATCH_REQUEST);

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_TYPE,
        GROUP_ID,
        VERSION_DEFAULT,
        VERSION,
        BATCH_REQUEST,
    ];
}

/// Work registration (NWR) or revision (REV).
pub mod work {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const TITLE: FieldDescriptor = FieldDescriptor::text("Work Title", 19, 60, keys::WORK_TITLE)
        .required()
        .watch_truncation();
    pub const LANGUAGE: FieldDescriptor =
        FieldDescriptor::text("Language Code", 79, 2, keys::LANGUAGE);
    pub const WORK_ID: FieldDescriptor =
        FieldDescriptor::text("Submitter Work ID", 81, 14, keys::WORK_ID).required();
    pub const ISWC: FieldDescriptor = FieldDescriptor::text("ISWC", 95, 11, keys::ISWC);
    pub const DISTRIBUTION_DEFAULT: FieldDescriptor =
        FieldDescriptor::literal("Distribution Category", 126, 3, "POP");
    pub const DISTRIBUTION: FieldDescriptor = FieldDescriptor::text(
        "Distribution Category",
        126,
        3,
        keys::DISTRIBUTION_CATEGORY,
    )
    .required();
    pub const DURATION: FieldDescriptor =
        FieldDescriptor::numeric("Duration", 129, 6, keys::DURATION).required();
    pub const RECORDED_DEFAULT: FieldDescriptor =
        FieldDescriptor::literal("Recorded Indicator", 135, 1, "U");
    pub const RECORDED: FieldDescriptor =
        FieldDescriptor::text("Recorded Indicator", 135, 1, keys::RECORDED_INDICATOR);
    pub const TEXT_MUSIC: FieldDescriptor =
        FieldDescriptor::literal("Text Music Relationship", 136, 3, "MTX");
    pub const VERSION_TYPE: FieldDescriptor =
        FieldDescriptor::literal("Version Type", 142, 3, "ORI").required();

    /// Version type every registration must carry.
    pub const ORIGINAL_VERSION: &str = "ORI";

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        TITLE,
        LANGUAGE,
        WORK_ID,
        ISWC,
        DISTRIBUTION_DEFAULT,
        DISTRIBUTION,
        DURATION,
        RECORDED_DEFAULT,
        RECORDED,
        TEXT_MUSIC,
        VERSION_TYPE,
    ];
}

/// Publisher controlled by submitter.
pub mod spu {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const CHAIN_ID: FieldDescriptor =
        FieldDescriptor::numeric("Publisher Sequence", 19, 2, keys::CHAIN_ID).required();
    pub const PARTY_ID: FieldDescriptor =
        FieldDescriptor::text("Interested Party ID", 21, 9, keys::PARTY_ID).required();
    pub const NAME: FieldDescriptor =
        FieldDescriptor::text("Publisher Name", 30, 45, keys::PUBLISHER_NAME)
            .required()
            .watch_truncation();
    pub const ROLE: FieldDescriptor =
        FieldDescriptor::text("Role Code", 76, 2, keys::PUBLISHER_ROLE).required();
    pub const IPI: FieldDescriptor = FieldDescriptor::numeric("IPI Name Number", 87, 11, keys::IPI);
    pub const PR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("PR Society", 112, 3, keys::PR_SOCIETY).digits();
    pub const PR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("PR Ownership Share", 115, 5, keys::PR_SHARE).required();
    pub const MR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("MR Society", 120, 3, keys::MR_SOCIETY).digits();
    pub const MR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("MR Ownership Share", 123, 5, keys::MR_SHARE).required();
    pub const SR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("SR Society", 128, 3, keys::SR_SOCIETY).digits();
    pub const SR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("SR Ownership Share", 131, 5, keys::SR_SHARE).required();
    pub const AGREEMENT: FieldDescriptor =
        FieldDescriptor::text("Society Agreement Number", 166, 14, keys::AGREEMENT);

    pub const ORIGINAL_PUBLISHER: &str = "E";
    pub const ADMINISTRATOR: &str = "SE";

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        CHAIN_ID,
        PARTY_ID,
        NAME,
        ROLE,
        IPI,
        PR_SOCIETY,
        PR_SHARE,
        MR_SOCIETY,
        MR_SHARE,
        SR_SOCIETY,
        SR_SHARE,
        AGREEMENT,
    ];
}

/// Publisher territory of control.
pub mod spt {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const PARTY_ID: FieldDescriptor =
        FieldDescriptor::text("Interested Party ID", 19, 9, keys::PARTY_ID).required();
    pub const PR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("PR Collection Share", 34, 5, keys::PR_SHARE).required();
    pub const MR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("MR Collection Share", 39, 5, keys::MR_SHARE).required();
    pub const SR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("SR Collection Share", 44, 5, keys::SR_SHARE).required();
    pub const INCLUSION: FieldDescriptor =
        FieldDescriptor::literal("Inclusion Indicator", 49, 1, "I").required();
    pub const TERRITORY: FieldDescriptor =
        FieldDescriptor::numeric("Territory Code", 50, 4, keys::TERRITORY).required();
    pub const SEQUENCE: FieldDescriptor =
        FieldDescriptor::numeric("Territory Sequence", 55, 3, keys::TERRITORY_SEQ).required();

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        PARTY_ID,
        PR_SHARE,
        MR_SHARE,
        SR_SHARE,
        INCLUSION,
        TERRITORY,
        SEQUENCE,
    ];
}

/// Writer controlled by submitter.
pub mod swr {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const PARTY_ID: FieldDescriptor =
        FieldDescriptor::text("Interested Party ID", 19, 9, keys::PARTY_ID).required();
    pub const LAST_NAME: FieldDescriptor =
        FieldDescriptor::text("Writer Last Name", 28, 45, keys::LAST_NAME)
            .required()
            .watch_truncation();
    pub const FIRST_NAME: FieldDescriptor =
        FieldDescriptor::text("Writer First Name", 73, 30, keys::FIRST_NAME).watch_truncation();
    pub const CAPACITY: FieldDescriptor =
        FieldDescriptor::text("Writer Designation", 104, 2, keys::CAPACITY).required();
    pub const IPI: FieldDescriptor = FieldDescriptor::numeric("IPI Name Number", 115, 11, keys::IPI);
    pub const PR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("PR Society", 126, 3, keys::PR_SOCIETY).digits();
    pub const PR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("PR Ownership Share", 129, 5, keys::PR_SHARE).required();
    pub const MR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("MR Society", 134, 3, keys::MR_SOCIETY).digits();
    pub const MR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("MR Ownership Share", 137, 5, keys::MR_SHARE).required();
    pub const SR_SOCIETY: FieldDescriptor =
        FieldDescriptor::text("SR Society", 142, 3, keys::SR_SOCIETY).digits();
    pub const SR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("SR Ownership Share", 145, 5, keys::SR_SHARE).required();

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        PARTY_ID,
        LAST_NAME,
        FIRST_NAME,
        CAPACITY,
        IPI,
        PR_SOCIETY,
        PR_SHARE,
        MR_SOCIETY,
        MR_SHARE,
        SR_SOCIETY,
        SR_SHARE,
    ];
}

/// Writer territory of control.
pub mod swt {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const PARTY_ID: FieldDescriptor =
        FieldDescriptor::text("Interested Party ID", 19, 9, keys::PARTY_ID).required();
    pub const PR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("PR Collection Share", 28, 5, keys::PR_SHARE).required();
    pub const MR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("MR Collection Share", 33, 5, keys::MR_SHARE).required();
    pub const SR_SHARE: FieldDescriptor =
        FieldDescriptor::numeric("SR Collection Share", 38, 5, keys::SR_SHARE).required();
    pub const INCLUSION: FieldDescriptor =
        FieldDescriptor::literal("Inclusion Indicator", 43, 1, "I").required();
    pub const TERRITORY: FieldDescriptor =
        FieldDescriptor::numeric("Territory Code", 44, 4, keys::TERRITORY).required();
    pub const SEQUENCE: FieldDescriptor =
        FieldDescriptor::numeric("Territory Sequence", 49, 3, keys::TERRITORY_SEQ).required();

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        PARTY_ID,
        PR_SHARE,
        MR_SHARE,
        SR_SHARE,
        INCLUSION,
        TERRITORY,
        SEQUENCE,
    ];
}

/// Publisher for writer: links a writer to the publisher controlling them.
pub mod pwr {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const PUBLISHER_ID: FieldDescriptor =
        FieldDescriptor::text("Publisher ID", 19, 9, keys::PARTY_ID).required();
    pub const PUBLISHER_NAME: FieldDescriptor =
        FieldDescriptor::text("Publisher Name", 28, 45, keys::PUBLISHER_NAME).required();
    pub const AGREEMENT: FieldDescriptor =
        FieldDescriptor::text("Society Agreement Number", 87, 14, keys::AGREEMENT);
    pub const WRITER_ID: FieldDescriptor =
        FieldDescriptor::text("Writer Reference", 101, 9, keys::WRITER_PARTY_ID).required();
    pub const CHAIN_ID: FieldDescriptor =
        FieldDescriptor::numeric("Publisher Sequence", 110, 2, keys::CHAIN_ID).required();

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        PUBLISHER_ID,
        PUBLISHER_NAME,
        AGREEMENT,
        WRITER_ID,
        CHAIN_ID,
    ];
}

/// Recording detail.
pub mod rec {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const RELEASE_DATE: FieldDescriptor =
        FieldDescriptor::text("First Release Date", 19, 8, keys::RELEASE_DATE).digits();
    pub const RELEASE_DURATION: FieldDescriptor =
        FieldDescriptor::numeric("First Release Duration", 87, 6, keys::RELEASE_DURATION);
    pub const ALBUM_TITLE: FieldDescriptor =
        FieldDescriptor::text("First Album Title", 98, 60, keys::ALBUM_TITLE).watch_truncation();
    pub const ALBUM_LABEL: FieldDescriptor =
        FieldDescriptor::text("First Album Label", 158, 60, keys::ALBUM_LABEL);
    pub const CATALOG_NUMBER: FieldDescriptor =
        FieldDescriptor::text("Catalog Number", 218, 18, keys::CATALOG_NUMBER);
    pub const EAN: FieldDescriptor = FieldDescriptor::text("EAN", 236, 13, keys::EAN).digits();
    pub const ISRC: FieldDescriptor = FieldDescriptor::text("ISRC", 249, 12, keys::ISRC);
    pub const FORMAT: FieldDescriptor = FieldDescriptor::literal("Recording Format", 261, 1, "A");
    pub const TECHNIQUE: FieldDescriptor =
        FieldDescriptor::literal("Recording Technique", 262, 1, "D");
    pub const MEDIA_TYPE: FieldDescriptor =
        FieldDescriptor::text("Media Type", 263, 3, keys::MEDIA_TYPE);

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        RELEASE_DATE,
        RELEASE_DURATION,
        ALBUM_TITLE,
        ALBUM_LABEL,
        CATALOG_NUMBER,
        EAN,
        ISRC,
        FORMAT,
        TECHNIQUE,
        MEDIA_TYPE,
    ];
}

/// Work origin (library / production music).
pub mod orn {
    use super::{FieldDescriptor, RECORD_SEQ, TRANSACTION_SEQ, keys};

    pub const PURPOSE_DEFAULT: FieldDescriptor =
        FieldDescriptor::literal("Intended Purpose", 19, 3, "LIB");
    pub const PURPOSE: FieldDescriptor =
        FieldDescriptor::text("Intended Purpose", 19, 3, keys::INTENDED_PURPOSE).required();
    pub const PRODUCTION_TITLE: FieldDescriptor =
        FieldDescriptor::text("Production Title", 22, 60, keys::PRODUCTION_TITLE);
    pub const CD_IDENTIFIER: FieldDescriptor =
        FieldDescriptor::text("CD Identifier", 82, 15, keys::CD_IDENTIFIER);
    pub const CUT_NUMBER: FieldDescriptor =
        FieldDescriptor::text("Cut Number", 97, 4, keys::CUT_NUMBER).digits();
    pub const LIBRARY: FieldDescriptor = FieldDescriptor::text("Library", 101, 60, keys::LIBRARY);

    pub const FIELDS: &[FieldDescriptor] = &[
        TRANSACTION_SEQ,
        RECORD_SEQ,
        PURPOSE_DEFAULT,
        PURPOSE,
        PRODUCTION_TITLE,
        CD_IDENTIFIER,
        CUT_NUMBER,
        LIBRARY,
    ];
}

/// Group trailer.
pub mod grt {
    use super::{FieldDescriptor, keys};

    pub const GROUP_ID: FieldDescriptor =
        FieldDescriptor::numeric("Group ID", 3, 5, keys::GROUP_ID).required();
    pub const TRANSACTION_COUNT: FieldDescriptor =
        FieldDescriptor::numeric("Transaction Count", 8, 8, keys::TRANSACTION_COUNT).required();
    pub const RECORD_COUNT: FieldDescriptor =
        FieldDescriptor::numeric("Record Count", 16, 8, keys::RECORD_COUNT).required();

    pub const FIELDS: &[FieldDescriptor] = &[GROUP_ID, TRANSACTION_COUNT, RECORD_COUNT];
}

/// Transmission trailer.
pub mod trl {
    use super::{FieldDescriptor, keys};

    pub const GROUP_COUNT: FieldDescriptor =
        FieldDescriptor::numeric("Group Count", 3, 5, keys::GROUP_COUNT).required();
    pub const TRANSACTION_COUNT: FieldDescriptor =
        FieldDescriptor::numeric("Transaction Count", 8, 8, keys::TRANSACTION_COUNT).required();
    pub const RECORD_COUNT: FieldDescriptor =
        FieldDescriptor::numeric("Record Count", 16, 8, keys::RECORD_COUNT).required();

    pub const FIELDS: &[FieldDescriptor] = &[GROUP_COUNT, TRANSACTION_COUNT, RECORD_COUNT];
}

/// Record types this crate can assemble and validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    Hdr,
    Grh,
    Nwr,
    Rev,
    Spu,
    Spt,
    Swr,
    Swt,
    Pwr,
    Rec,
    Orn,
    Grt,
    Trl,
}

impl RecordType {
    pub const ALL: [RecordType; 13] = [
        RecordType::Hdr,
        RecordType::Grh,
        RecordType::Nwr,
        RecordType::Rev,
        RecordType::Spu,
        RecordType::Spt,
        RecordType::Swr,
        RecordType::Swt,
        RecordType::Pwr,
        RecordType::Rec,
        RecordType::Orn,
        RecordType::Grt,
        RecordType::Trl,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Hdr => "HDR",
            Self::Grh => "GRH",
            Self::Nwr => "NWR",
            Self::Rev => "REV",
            Self::Spu => "SPU",
            Self::Spt => "SPT",
            Self::Swr => "SWR",
            Self::Swt => "SWT",
            Self::Pwr => "PWR",
            Self::Rec => "REC",
            Self::Orn => "ORN",
            Self::Grt => "GRT",
            Self::Trl => "TRL",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|record| record.tag() == tag)
    }

    pub const fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Self::Hdr => hdr::FIELDS,
            Self::Grh => grh::FIELDS,
            Self::Nwr | Self::Rev => work::FIELDS,
            Self::Spu => spu::FIELDS,
            Self::Spt => spt::FIELDS,
            Self::Swr => swr::FIELDS,
            Self::Swt => swt::FIELDS,
            Self::Pwr => pwr::FIELDS,
            Self::Rec => rec::FIELDS,
            Self::Orn => orn::FIELDS,
            Self::Grt => grt::FIELDS,
            Self::Trl => trl::FIELDS,
        }
    }

    pub const fn template(self) -> RecordTemplate {
        RecordTemplate::new(self, self.fields())
    }

    /// NWR or REV: opens a transaction.
    pub const fn is_work(self) -> bool {
        matches!(self, Self::Nwr | Self::Rev)
    }

    /// Records carrying the transaction/record sequence prefix.
    pub const fn is_transaction_record(self) -> bool {
        !matches!(self, Self::Hdr | Self::Grh | Self::Grt | Self::Trl)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Check the geometry of every record type.
pub fn validate_layouts() -> Result<()> {
    for record in RecordType::ALL {
        record.template().validate()?;
    }
    Ok(())
}
