use std::fmt;

use crate::error::RefError;

/// The four component kinds reachable through `$ref` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    RequestBodies,
    Responses,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Responses => "responses",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "schemas" => Some(ComponentKind::Schemas),
            "parameters" => Some(ComponentKind::Parameters),
            "requestBodies" => Some(ComponentKind::RequestBodies),
            "responses" => Some(ComponentKind::Responses),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a reference of the form `#/components/<kind>/<name>`.
///
/// The string must split into exactly four segments with a recognized kind.
/// A trailing slash yields an empty name, which parses; the miss surfaces
/// as `ComponentNotFound` when the lookup is attempted.
pub fn parse_ref<'a>(reference: &'a str, location: &str) -> Result<(ComponentKind, &'a str), RefError> {
    let invalid = || RefError::InvalidReference {
        reference: reference.to_string(),
        location: location.to_string(),
    };

    let rest = reference.strip_prefix("#/components/").ok_or_else(invalid)?;
    let (kind, name) = rest.split_once('/').ok_or_else(invalid)?;
    if name.contains('/') {
        return Err(invalid());
    }
    let kind = ComponentKind::from_segment(kind).ok_or_else(invalid)?;
    Ok((kind, name))
}

/// Parse a reference that must name a component of `expected` kind.
/// A reference of any other kind in this position is invalid.
pub fn parse_ref_of<'a>(
    reference: &'a str,
    expected: ComponentKind,
    location: &str,
) -> Result<&'a str, RefError> {
    let (kind, name) = parse_ref(reference, location)?;
    if kind != expected {
        return Err(RefError::InvalidReference {
            reference: reference.to_string(),
            location: location.to_string(),
        });
    }
    Ok(name)
}

/// The last `/`-separated segment of a reference string. Only meaningful
/// once the prefix has been validated by [`parse_ref`].
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
