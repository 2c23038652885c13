//! Unit name classification
//!
//! A unit name is `<prefix>[@<instance>].<type>`. A name with an `@` and a
//! non-empty instance part is an *instance*; one whose instance part is empty
//! (`getty@.service`) is a *template*. Everything else is a *plain* name.

use crate::error::UnitNameError;

/// Longest accepted unit name, in bytes.
pub const UNIT_NAME_MAX: usize = 255;

/// Characters allowed in a unit name besides `@`.
fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.' | '\\')
}

/// Unit types recognised in the name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Service,
    Socket,
    Target,
    Device,
    Mount,
    Automount,
    Swap,
    Timer,
    Path,
    Slice,
    Scope,
}

impl UnitType {
    pub const ALL: [UnitType; 11] = [
        UnitType::Service,
        UnitType::Socket,
        UnitType::Target,
        UnitType::Device,
        UnitType::Mount,
        UnitType::Automount,
        UnitType::Swap,
        UnitType::Timer,
        UnitType::Path,
        UnitType::Slice,
        UnitType::Scope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Service => "service",
            UnitType::Socket => "socket",
            UnitType::Target => "target",
            UnitType::Device => "device",
            UnitType::Mount => "mount",
            UnitType::Automount => "automount",
            UnitType::Swap => "swap",
            UnitType::Timer => "timer",
            UnitType::Path => "path",
            UnitType::Slice => "slice",
            UnitType::Scope => "scope",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<UnitType> {
        UnitType::ALL.into_iter().find(|t| t.as_str() == suffix)
    }
}

/// Shape of a syntactically valid unit name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitNameKind {
    Plain,
    Instance,
    Template,
}

/// Classify a unit name, or `None` if it is not valid at all.
pub fn classify(name: &str) -> Option<UnitNameKind> {
    if name.is_empty() || name.len() > UNIT_NAME_MAX {
        return None;
    }

    let dot = name.rfind('.')?;
    UnitType::from_suffix(&name[dot + 1..])?;

    let stem = &name[..dot];
    if !stem.chars().all(|c| c == '@' || is_valid_char(c)) {
        return None;
    }

    match stem.find('@') {
        None if stem.is_empty() => None,
        None => Some(UnitNameKind::Plain),
        Some(0) => None,
        Some(at) if at + 1 == stem.len() => Some(UnitNameKind::Template),
        Some(_) => Some(UnitNameKind::Instance),
    }
}

pub fn is_valid(name: &str) -> bool {
    classify(name).is_some()
}

pub fn is_instance(name: &str) -> bool {
    classify(name) == Some(UnitNameKind::Instance)
}

pub fn is_template(name: &str) -> bool {
    classify(name) == Some(UnitNameKind::Template)
}

/// Unit type of a valid name.
pub fn unit_type(name: &str) -> Option<UnitType> {
    classify(name)?;
    let dot = name.rfind('.')?;
    UnitType::from_suffix(&name[dot + 1..])
}

/// Derive the template name of an instance (or template) unit name.
///
/// `getty@tty1.service` becomes `getty@.service`. A template maps to itself.
pub fn template_of(name: &str) -> Result<String, UnitNameError> {
    match classify(name) {
        Some(UnitNameKind::Instance) | Some(UnitNameKind::Template) => {}
        Some(UnitNameKind::Plain) => return Err(UnitNameError::NotInstance(name.to_string())),
        None => return Err(UnitNameError::Invalid(name.to_string())),
    }

    let (at, dot) = match (name.find('@'), name.rfind('.')) {
        (Some(at), Some(dot)) => (at, dot),
        _ => return Err(UnitNameError::Invalid(name.to_string())),
    };

    let mut template = String::with_capacity(at + 1 + name.len() - dot);
    template.push_str(&name[..=at]);
    template.push_str(&name[dot..]);
    Ok(template)
}

/// Instance part of an instance name (`tty1` for `getty@tty1.service`).
pub fn instance_of(name: &str) -> Option<&str> {
    if !is_instance(name) {
        return None;
    }
    let at = name.find('@')?;
    let dot = name.rfind('.')?;
    Some(&name[at + 1..dot])
}
