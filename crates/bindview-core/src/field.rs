#![forbid(unsafe_code)]

//! Field identifiers and the static dependency table.
//!
//! Every change notification carries a [`Field`]. Settable fields may name
//! computed fields that depend on them; those are announced right after the
//! settable field, in the order listed by [`Field::dependents`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::FieldParseError;

/// Identifier of a [`DisplayState`](crate::DisplayState) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    UserName,
    PostRating,
    BankDeduction,
    IsActive,
    ProgressValue,
    DisplayMessage,
    ShowSmiley,
    SmileyText,
    ShowWarning,
    WarningText,
}

impl Field {
    /// Settable fields in declaration order.
    pub const SETTABLE: [Field; 6] = [
        Field::UserName,
        Field::PostRating,
        Field::BankDeduction,
        Field::IsActive,
        Field::ProgressValue,
        Field::DisplayMessage,
    ];

    /// Computed fields in declaration order.
    pub const COMPUTED: [Field; 4] = [
        Field::ShowSmiley,
        Field::SmileyText,
        Field::ShowWarning,
        Field::WarningText,
    ];

    /// Stable identifier used in notifications and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::UserName => "userName",
            Field::PostRating => "postRating",
            Field::BankDeduction => "bankDeduction",
            Field::IsActive => "isActive",
            Field::ProgressValue => "progressValue",
            Field::DisplayMessage => "displayMessage",
            Field::ShowSmiley => "showSmiley",
            Field::SmileyText => "smileyText",
            Field::ShowWarning => "showWarning",
            Field::WarningText => "warningText",
        }
    }

    #[must_use]
    pub const fn is_computed(self) -> bool {
        matches!(
            self,
            Field::ShowSmiley | Field::SmileyText | Field::ShowWarning | Field::WarningText
        )
    }

    /// Computed fields re-announced whenever this field accepts a write.
    ///
    /// Empty for computed fields and for settable fields nothing depends on.
    #[must_use]
    pub const fn dependents(self) -> &'static [Field] {
        match self {
            Field::PostRating => &[Field::ShowSmiley, Field::SmileyText],
            Field::BankDeduction => &[Field::ShowWarning, Field::WarningText],
            _ => &[],
        }
    }

    /// This field followed by its dependents: the exact notification sequence
    /// for an accepted write.
    pub fn affected(self) -> impl Iterator<Item = Field> {
        std::iter::once(self).chain(self.dependents().iter().copied())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::SETTABLE
            .into_iter()
            .chain(Field::COMPUTED)
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldParseError {
                name: s.to_string(),
            })
    }
}

/// Dynamically typed field value, as returned by
/// [`DisplayState::get`](crate::DisplayState::get).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Decimal(Decimal),
    Bool(bool),
    Float(f64),
}

impl FieldValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Float(x) => write!(f, "{x}"),
        }
    }
}
