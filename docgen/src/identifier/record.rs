//! Decoded member identifier records

use crate::config::constants::{CONSTRUCTOR_NAME, IMPLICIT_OPERATOR_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an identifier names, from its leading marker character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberKind {
    Type,
    Property,
    Field,
    #[default]
    Member,
}

impl MemberKind {
    /// Map a marker character to a kind. Markers the generator does not
    /// document separately (`E:`, `N:`, `!:`) return `None`.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'T' => Some(MemberKind::Type),
            'P' => Some(MemberKind::Property),
            'F' => Some(MemberKind::Field),
            'M' => Some(MemberKind::Member),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            MemberKind::Type => 'T',
            MemberKind::Property => 'P',
            MemberKind::Field => 'F',
            MemberKind::Member => 'M',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Type => "Type",
            MemberKind::Property => "Property",
            MemberKind::Field => "Field",
            MemberKind::Member => "Member",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parameter of a method signature
///
/// The decoder fills only `type_token`; name and description come from the
/// `<param>` tags during documentation assembly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parameter {
    pub type_token: String,
    pub name: String,
    pub description: String,
}

impl Parameter {
    pub fn typed(type_token: impl Into<String>) -> Self {
        Self {
            type_token: type_token.into(),
            ..Default::default()
        }
    }
}

/// Source and target types of a conversion operator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImplicitConversion {
    pub from_type: String,
    pub to_type: String,
}

impl fmt::Display for ImplicitConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_type, self.to_type)
    }
}

/// Structured form of one member identifier string
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberRecord {
    pub kind: MemberKind,
    pub namespace_path: String,
    /// Never empty after decoding; falls back to `namespace_path`
    pub class_name: String,
    /// Empty for types
    pub member_name: String,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_conversion: Option<ImplicitConversion>,
}

impl MemberRecord {
    pub fn is_type(&self) -> bool {
        self.kind == MemberKind::Type
    }

    pub fn is_constructor(&self) -> bool {
        self.member_name == CONSTRUCTOR_NAME
    }

    pub fn is_conversion(&self) -> bool {
        self.member_name == IMPLICIT_OPERATOR_NAME
    }

    /// Overloaded operators normalize to `operator<symbol>`
    pub fn is_operator(&self) -> bool {
        self.member_name.len() > "operator".len() && self.member_name.starts_with("operator")
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// `namespace.class.member` for log messages; the class is omitted when
    /// it only repeats the namespace.
    pub fn qualified_name(&self) -> String {
        let mut name = self.namespace_path.clone();

        if self.class_name != self.namespace_path {
            name.push('.');
            name.push_str(&self.class_name);
        }

        if !self.member_name.is_empty() {
            name.push('.');
            name.push_str(&self.member_name);
        }

        name
    }
}
