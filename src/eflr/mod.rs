//! # Explicitly Formatted Logical Records
//!
//! An EFLR payload is self-describing: a set header naming the record, a
//! column template every object shares, and a table of objects whose cells
//! inherit the template's defaults.
//!
//! ```text
//! +-----------------------------------------------+
//! | SET  [type] [name]                            |
//! +-----------------------------------------------+
//! | ATTRIB/INVATR column, ATTRIB column, ...      |   template
//! +-----------------------------------------------+
//! | OBJECT name, ATTRIB cell, ABSATR, ...         |   row 1
//! | OBJECT name, ...                              |   row 2
//! +-----------------------------------------------+
//! ```
//!
//! Every element starts with a one-byte component descriptor: the role in
//! the top three bits, role-specific flags in the bottom five
//! ([`decode_component`]). The parser ([`parse_eflr`]) is a strict state
//! machine over those roles; anything out of place fails the record.
//!
//! ## Template Inheritance
//!
//! Each object row starts as a structural copy of the template, so rows own
//! their cells and never alias each other. An attribute component then
//! overrides whichever fields its flags select; an absent-attribute
//! component voids the cell's value; a missing component leaves the
//! template default in place. Invariant columns are appended to every row
//! unchanged.

mod component;
mod parse;
mod record;

pub use component::{decode_component, AttribFlags, Component, Role, SetFlags};
pub use parse::{parse_eflr, parse_eflr_with};
pub use record::{Attribute, EflrRecord, ObjectRow};
