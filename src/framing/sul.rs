use eyre::Result;

use crate::error::DlisError;

/// Size of the storage unit label at the start of every storage unit.
pub const SUL_SIZE: usize = 80;

/// Storage unit structure field. Anything other than `RECORD` is preserved
/// verbatim as unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Record,
    Unknown(String),
}

/// The 80-byte fixed-format file prologue.
///
/// All fields are ASCII: sequence number (4), version (5, `V%1d.%02d`),
/// storage unit structure (6), maximum visible record length (5), and the
/// storage set identifier (60).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUnitLabel {
    pub sequence: i32,
    pub major: u8,
    pub minor: u8,
    pub layout: Layout,
    pub maxlen: i64,
    pub id: String,
}

impl StorageUnitLabel {
    pub fn parse(raw: &[u8; SUL_SIZE]) -> Result<Self> {
        let text = std::str::from_utf8(raw)
            .map_err(|_| DlisError::BadSul("label is not ascii".into()))?;
        if !text.is_ascii() {
            return Err(DlisError::BadSul("label is not ascii".into()).into());
        }

        let sequence = text[0..4]
            .trim()
            .parse::<i32>()
            .map_err(|_| bad_field("sequence number", &text[0..4]))?;

        let (major, minor) = parse_version(&text[4..9])?;

        let structure = text[9..15].trim();
        let layout = if structure == "RECORD" {
            Layout::Record
        } else {
            Layout::Unknown(structure.to_string())
        };

        let maxlen = text[15..20]
            .trim()
            .parse::<i64>()
            .map_err(|_| bad_field("maximum record length", &text[15..20]))?;

        let id = text[20..].trim().to_string();

        Ok(Self {
            sequence,
            major,
            minor,
            layout,
            maxlen,
            id,
        })
    }

    /// The version rendered the way consumers expect it, e.g. `"1.0"`.
    pub fn version(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

fn parse_version(field: &str) -> Result<(u8, u8)> {
    // "V" digit "." two digits
    let rest = field
        .strip_prefix('V')
        .ok_or_else(|| bad_field("version", field))?;
    let (major, minor) = rest.split_once('.').ok_or_else(|| bad_field("version", field))?;

    if major.len() != 1 || minor.len() != 2 {
        return Err(bad_field("version", field).into());
    }

    let major = major.parse::<u8>().map_err(|_| bad_field("version", field))?;
    let minor = minor.parse::<u8>().map_err(|_| bad_field("version", field))?;
    Ok((major, minor))
}

fn bad_field(what: &str, raw: &str) -> DlisError {
    DlisError::BadSul(format!("bad {} field {:?}", what, raw))
}
