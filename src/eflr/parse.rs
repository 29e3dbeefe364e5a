use eyre::Result;

use super::component::{decode_component, AttribFlags, Component, Role};
use super::record::{Attribute, EflrRecord, ObjectRow};
use crate::diagnostics::{DiagnosticSink, NullSink, Severity};
use crate::encoding::decode::{ident, obname, ushort, uvari};
use crate::encoding::{decode_vector, Cursor, ReprCode};
use crate::error::DlisError;

/// Parses an assembled explicitly-formatted payload with diagnostics
/// discarded.
pub fn parse_eflr(payload: &[u8]) -> Result<EflrRecord> {
    parse_eflr_with(payload, &mut NullSink)
}

/// Parses an assembled explicitly-formatted payload.
///
/// The payload must contain, in order: the set component (with optional
/// type and name), one or more template attribute components, then zero or
/// more objects, each followed by its attribute components. Structural
/// violations fail the whole record; a stray label on an object attribute
/// and a duplicate object name are warnings only.
pub fn parse_eflr_with(payload: &[u8], sink: &mut dyn DiagnosticSink) -> Result<EflrRecord> {
    let mut cur = Cursor::new(payload);
    let mut record = EflrRecord::default();

    set_header(&mut cur, &mut record)?;
    template(&mut cur, &mut record)?;
    objects(&mut cur, &mut record, sink)?;

    Ok(record)
}

fn set_header(cur: &mut Cursor, record: &mut EflrRecord) -> Result<()> {
    let descriptor = cur.u8()?;
    let component = decode_component(descriptor)?;

    let Component::Set { flags, .. } = component else {
        return Err(DlisError::ExpectedSet(component.role().name()).into());
    };

    if flags.has_type {
        record.set_type = Some(ident(cur)?);
    }
    if flags.has_name {
        record.set_name = Some(ident(cur)?);
    }
    Ok(())
}

fn template(cur: &mut Cursor, record: &mut EflrRecord) -> Result<()> {
    loop {
        let Some(descriptor) = cur.peek() else {
            // record with no objects
            return Ok(());
        };

        let component = decode_component(descriptor)?;
        let (role, flags) = match component {
            Component::Object => return Ok(()),
            Component::Attribute {
                role: role @ (Role::Attrib | Role::Invatr),
                flags,
            } => (role, flags),
            other => return Err(DlisError::ExpectedAttribute(other.role().name()).into()),
        };

        cur.u8()?;

        if !flags.has_label {
            return Err(DlisError::TemplateMissingLabel.into());
        }

        let mut column = Attribute::new(ident(cur)?);
        decode_attribute_fields(cur, &mut column, &flags)?;

        if role == Role::Invatr {
            record.invariants.push(column);
        } else {
            record.template.push(column);
        }
    }
}

fn objects(
    cur: &mut Cursor,
    record: &mut EflrRecord,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    while !cur.is_empty() {
        let descriptor = cur.u8()?;
        let component = decode_component(descriptor)?;
        if component != Component::Object {
            return Err(DlisError::ExpectedObject(component.role().name()).into());
        }

        let mut row = ObjectRow {
            name: obname(cur)?,
            attributes: record.template.clone(),
        };

        for column in row.attributes.iter_mut() {
            // the descriptor is consumed only once it is known not to open
            // the next object
            let Some(descriptor) = cur.peek() else {
                break;
            };

            let component = decode_component(descriptor)?;
            match component {
                Component::Object => break,
                Component::Attribute {
                    role: Role::Absatr, ..
                } => {
                    cur.u8()?;
                    column.value = None;
                }
                Component::Attribute {
                    role: Role::Attrib,
                    flags,
                } => {
                    cur.u8()?;

                    if flags.has_label {
                        sink.report(
                            Severity::Warning,
                            "unexpected label in object attribute, possibly corrupted file",
                        );
                        ident(cur)?;
                    }
                    decode_attribute_fields(cur, column, &flags)?;
                }
                other => {
                    return Err(DlisError::ExpectedAttribute(other.role().name()).into());
                }
            }
        }

        row.attributes.extend(record.invariants.iter().cloned());
        record.insert_row(row, sink);
    }
    Ok(())
}

/// Decodes the count/reprc/units/value fields selected by `flags` into
/// `attr`, leaving unselected fields untouched. The value sequence uses the
/// count and representation code in effect after any overrides.
fn decode_attribute_fields(
    cur: &mut Cursor,
    attr: &mut Attribute,
    flags: &AttribFlags,
) -> Result<()> {
    if flags.has_count {
        attr.count = uvari(cur)?;
    }
    if flags.has_reprc {
        attr.reprc = ReprCode::from_code(ushort(cur)?)?;
    }
    if flags.has_units {
        attr.units = Some(ident(cur)?);
    }
    if flags.has_value {
        attr.value = Some(decode_vector(cur, attr.count, attr.reprc)?);
    }
    Ok(())
}
