use eyre::Result;

use crate::error::DlisError;

/// Component role, carried in the top three bits of a descriptor byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Absatr,
    Attrib,
    Invatr,
    Object,
    Reserved,
    Rdset,
    Rset,
    Set,
}

impl Role {
    pub fn from_descriptor(descriptor: u8) -> Role {
        match descriptor >> 5 {
            0 => Role::Absatr,
            1 => Role::Attrib,
            2 => Role::Invatr,
            3 => Role::Object,
            4 => Role::Reserved,
            5 => Role::Rdset,
            6 => Role::Rset,
            _ => Role::Set,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Absatr => "ABSATR",
            Role::Attrib => "ATTRIB",
            Role::Invatr => "INVATR",
            Role::Object => "OBJECT",
            Role::Reserved => "RESERV",
            Role::Rdset => "RDSET",
            Role::Rset => "RSET",
            Role::Set => "SET",
        }
    }
}

/// Flag bits of a set-family descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFlags {
    pub has_type: bool,
    pub has_name: bool,
}

/// Flag bits of an attribute-family descriptor. The five bits select which
/// attribute fields follow the descriptor, in label/count/reprc/units/value
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribFlags {
    pub has_label: bool,
    pub has_count: bool,
    pub has_reprc: bool,
    pub has_units: bool,
    pub has_value: bool,
}

/// One decoded component descriptor byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// SET, RDSET or RSET.
    Set { role: Role, flags: SetFlags },
    /// ATTRIB, INVATR or ABSATR.
    Attribute { role: Role, flags: AttribFlags },
    Object,
}

impl Component {
    pub fn role(&self) -> Role {
        match self {
            Component::Set { role, .. } => *role,
            Component::Attribute { role, .. } => *role,
            Component::Object => Role::Object,
        }
    }
}

/// Decodes one descriptor byte into its role and role-specific flags.
///
/// The reserved role is rejected, as is an object descriptor without its
/// mandatory name bit.
pub fn decode_component(descriptor: u8) -> Result<Component> {
    let role = Role::from_descriptor(descriptor);
    let component = match role {
        Role::Set | Role::Rdset | Role::Rset => Component::Set {
            role,
            flags: SetFlags {
                has_type: descriptor & 0x10 != 0,
                has_name: descriptor & 0x08 != 0,
            },
        },
        Role::Attrib | Role::Invatr | Role::Absatr => Component::Attribute {
            role,
            flags: AttribFlags {
                has_label: descriptor & 0x10 != 0,
                has_count: descriptor & 0x08 != 0,
                has_reprc: descriptor & 0x04 != 0,
                has_units: descriptor & 0x02 != 0,
                has_value: descriptor & 0x01 != 0,
            },
        },
        Role::Object => {
            if descriptor & 0x10 == 0 {
                return Err(DlisError::BadComponent(descriptor).into());
            }
            Component::Object
        }
        Role::Reserved => return Err(DlisError::BadComponent(descriptor).into()),
    };
    Ok(component)
}
