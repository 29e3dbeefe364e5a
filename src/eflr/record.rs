use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::encoding::ReprCode;
use crate::types::{Obname, Value};

/// One template column or object cell.
///
/// A freshly constructed attribute carries the defaults an absent flag
/// implies: `count` 1, `reprc` IDENT, no units, no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub label: String,
    pub count: u32,
    pub reprc: ReprCode,
    pub units: Option<String>,
    pub value: Option<SmallVec<[Value; 1]>>,
}

impl Attribute {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: 1,
            reprc: ReprCode::Ident,
            units: None,
            value: None,
        }
    }

    /// The single value of a one-element sequence.
    pub fn scalar(&self) -> Option<&Value> {
        match self.value.as_deref() {
            Some([single]) => Some(single),
            _ => None,
        }
    }
}

/// One object: its name and a full row of attribute cells.
///
/// The row owns its cells. It always holds one cell per template column
/// (in template order) followed by the record's invariant columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRow {
    pub name: Obname,
    pub attributes: Vec<Attribute>,
}

impl ObjectRow {
    /// Looks up a cell by its column label.
    pub fn attribute(&self, label: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.label == label)
    }
}

/// A decoded explicitly formatted logical record: the set header, the
/// column template, invariant columns, and the object rows in file order.
#[derive(Debug, Clone, Default)]
pub struct EflrRecord {
    pub set_type: Option<String>,
    pub set_name: Option<String>,
    pub template: Vec<Attribute>,
    pub invariants: Vec<Attribute>,
    rows: Vec<ObjectRow>,
    index: HashMap<Obname, usize>,
}

impl EflrRecord {
    /// Object rows in the order they appear in the record.
    pub fn objects(&self) -> &[ObjectRow] {
        &self.rows
    }

    /// Looks up an object row by name.
    pub fn object(&self, name: &Obname) -> Option<&ObjectRow> {
        self.index.get(name).map(|&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds a row. A duplicate name overwrites the earlier row in place
    /// and reports a warning.
    pub(super) fn insert_row(&mut self, row: ObjectRow, sink: &mut dyn DiagnosticSink) {
        match self.index.get(&row.name) {
            Some(&i) => {
                sink.report(
                    Severity::Warning,
                    &format!("duplicate object {} overwrites earlier row", row.name),
                );
                self.rows[i] = row;
            }
            None => {
                self.index.insert(row.name.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }
}
