//! # Internal Macros
//!
//! ## zerocopy_getters!
//!
//! Generates getter methods for zerocopy struct fields that use big-endian
//! wrapper types (`big_endian::U16` and friends). The wire headers in this
//! format are read-only once decoded, so only getters are generated.
//!
//! ### Usage
//!
//! ```ignore
//! use zerocopy::big_endian::U16;
//!
//! #[repr(C)]
//! struct Header {
//!     length: U16,
//! }
//!
//! impl Header {
//!     zerocopy_getters! {
//!         length: u16,
//!     }
//! }
//!
//! // Generates:
//! // pub fn length(&self) -> u16 { self.length.get() }
//! ```

/// Generates getter methods for zerocopy endian-wrapped fields.
#[macro_export]
macro_rules! zerocopy_getters {
    ($($field:ident : $native_ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $field(&self) -> $native_ty {
                self.$field.get()
            }
        )*
    };
}
