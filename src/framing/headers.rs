use zerocopy::big_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

pub const VISIBLE_RECORD_LABEL_SIZE: usize = 4;
pub const SEGMENT_HEADER_SIZE: usize = 4;

/// The mandatory value of the visible record label's third byte.
pub const VRL_PAD_BYTE: u8 = 0xFF;

/// Four-byte visible record label: length (including these four bytes),
/// one 0xFF pad byte, format version.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VisibleRecordLabel {
    length: U16,
    padding: u8,
    version: u8,
}

const _: () = assert!(std::mem::size_of::<VisibleRecordLabel>() == VISIBLE_RECORD_LABEL_SIZE);

impl VisibleRecordLabel {
    zerocopy_getters! {
        length: u16,
    }

    #[inline]
    pub fn padding(&self) -> u8 {
        self.padding
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Bytes of payload inside this visible record, after the label.
    #[inline]
    pub fn payload_len(&self) -> i64 {
        self.length.get() as i64 - VISIBLE_RECORD_LABEL_SIZE as i64
    }
}

/// Four-byte logical record segment header: length (including these four
/// bytes), attributes byte, record type byte.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SegmentHeader {
    length: U16,
    attributes: u8,
    record_type: u8,
}

const _: () = assert!(std::mem::size_of::<SegmentHeader>() == SEGMENT_HEADER_SIZE);

impl SegmentHeader {
    zerocopy_getters! {
        length: u16,
    }

    #[inline]
    pub fn attributes(&self) -> u8 {
        self.attributes
    }

    #[inline]
    pub fn record_type(&self) -> u8 {
        self.record_type
    }

    /// Bytes of segment body following the header, before trailer stripping.
    #[inline]
    pub fn body_len(&self) -> i64 {
        self.length.get() as i64 - SEGMENT_HEADER_SIZE as i64
    }
}

/// The eight attribute flag bits of a segment header, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentAttributes {
    pub is_eflr: bool,
    pub has_predecessor: bool,
    pub has_successor: bool,
    pub is_encrypted: bool,
    pub has_encryption_packet: bool,
    pub has_checksum: bool,
    pub has_trailing_length: bool,
    pub has_padding: bool,
}

impl SegmentAttributes {
    pub fn from_byte(attrs: u8) -> Self {
        Self {
            is_eflr: attrs & 0x80 != 0,
            has_predecessor: attrs & 0x40 != 0,
            has_successor: attrs & 0x20 != 0,
            is_encrypted: attrs & 0x10 != 0,
            has_encryption_packet: attrs & 0x08 != 0,
            has_checksum: attrs & 0x04 != 0,
            has_trailing_length: attrs & 0x02 != 0,
            has_padding: attrs & 0x01 != 0,
        }
    }
}
