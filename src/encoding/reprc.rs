use std::fmt;

use eyre::Result;

use crate::error::DlisError;

/// Representation code: the small integer selecting a primitive encoding.
///
/// The discriminants are the standard assignments. Codes outside this set
/// fail `UnknownReprc` at [`ReprCode::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReprCode {
    Fshort = 1,
    Fsingl = 2,
    Fsing1 = 3,
    Fsing2 = 4,
    Isingl = 5,
    Vsingl = 6,
    Fdoubl = 7,
    Fdoub1 = 8,
    Fdoub2 = 9,
    Csingl = 10,
    Cdoubl = 11,
    Sshort = 12,
    Snorm = 13,
    Slong = 14,
    Ushort = 15,
    Unorm = 16,
    Ulong = 17,
    Uvari = 18,
    Ident = 19,
    Ascii = 20,
    Dtime = 21,
    Origin = 22,
    Obname = 23,
    Status = 26,
}

impl ReprCode {
    pub fn from_code(code: u8) -> Result<Self> {
        let reprc = match code {
            1 => ReprCode::Fshort,
            2 => ReprCode::Fsingl,
            3 => ReprCode::Fsing1,
            4 => ReprCode::Fsing2,
            5 => ReprCode::Isingl,
            6 => ReprCode::Vsingl,
            7 => ReprCode::Fdoubl,
            8 => ReprCode::Fdoub1,
            9 => ReprCode::Fdoub2,
            10 => ReprCode::Csingl,
            11 => ReprCode::Cdoubl,
            12 => ReprCode::Sshort,
            13 => ReprCode::Snorm,
            14 => ReprCode::Slong,
            15 => ReprCode::Ushort,
            16 => ReprCode::Unorm,
            17 => ReprCode::Ulong,
            18 => ReprCode::Uvari,
            19 => ReprCode::Ident,
            20 => ReprCode::Ascii,
            21 => ReprCode::Dtime,
            22 => ReprCode::Origin,
            23 => ReprCode::Obname,
            26 => ReprCode::Status,
            other => return Err(DlisError::UnknownReprc(other).into()),
        };
        Ok(reprc)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ReprCode::Fshort => "FSHORT",
            ReprCode::Fsingl => "FSINGL",
            ReprCode::Fsing1 => "FSING1",
            ReprCode::Fsing2 => "FSING2",
            ReprCode::Isingl => "ISINGL",
            ReprCode::Vsingl => "VSINGL",
            ReprCode::Fdoubl => "FDOUBL",
            ReprCode::Fdoub1 => "FDOUB1",
            ReprCode::Fdoub2 => "FDOUB2",
            ReprCode::Csingl => "CSINGL",
            ReprCode::Cdoubl => "CDOUBL",
            ReprCode::Sshort => "SSHORT",
            ReprCode::Snorm => "SNORM",
            ReprCode::Slong => "SLONG",
            ReprCode::Ushort => "USHORT",
            ReprCode::Unorm => "UNORM",
            ReprCode::Ulong => "ULONG",
            ReprCode::Uvari => "UVARI",
            ReprCode::Ident => "IDENT",
            ReprCode::Ascii => "ASCII",
            ReprCode::Dtime => "DTIME",
            ReprCode::Origin => "ORIGIN",
            ReprCode::Obname => "OBNAME",
            ReprCode::Status => "STATUS",
        }
    }
}

impl fmt::Display for ReprCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
