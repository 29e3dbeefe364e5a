use std::fmt;

/// Object identity triple: originating file number, copy number, identifier.
///
/// Obnames key the object rows of a parsed record, so the type is hashable
/// and totally ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Obname {
    pub origin: u32,
    pub copy: u8,
    pub id: String,
}

impl Obname {
    pub fn new(origin: u32, copy: u8, id: impl Into<String>) -> Self {
        Self {
            origin,
            copy,
            id: id.into(),
        }
    }
}

impl fmt::Display for Obname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.origin, self.copy, self.id)
    }
}
