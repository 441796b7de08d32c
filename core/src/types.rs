//! Guest record DTOs for the record store API.
//!
//! # Design
//! The store is spreadsheet-like: every column is optional and flags may come
//! back as JSON booleans or as strings such as `"yes"`. `GuestFields` names the
//! columns the invite pages use and keeps anything else in `extra`, so a read
//! never drops data. The same type doubles as a partial update: only the
//! fields that are `Some` (plus `extra`) are serialized.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field name the store uses for the record identifier. It never belongs in
/// a field mapping.
pub const ID_FIELD: &str = "id";

/// A record as returned by the store: `{ id, createdTime, fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: String,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: GuestFields,
}

/// The per-guest columns. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_size: Option<InviteCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp: Option<Attendance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekender: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_on_camping: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glamping: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_day: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_children: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_responded: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<Flag>,
    /// Columns without a named field above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl GuestFields {
    /// True when no column holds a value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop a stray `id` column so the mapping only ever carries attributes.
    pub fn without_id(mut self) -> Self {
        self.extra.remove(ID_FIELD);
        self
    }

    pub fn is_weekender(&self) -> bool {
        self.weekender.as_ref().is_some_and(Flag::is_true)
    }

    pub fn has_responded(&self) -> bool {
        self.has_responded.as_ref().is_some_and(Flag::is_true)
    }

    /// Ask the next update to empty `column` in the store. The column is sent
    /// as JSON `null`, which the store treats as "remove this value".
    pub fn clear(&mut self, column: &str) {
        self.extra.insert(column.to_string(), serde_json::Value::Null);
    }
}

/// A yes/no column. The store hands these back either as JSON booleans
/// (checkbox columns) or as text (single-select columns). Any other shape a
/// hand-edited cell can hold is kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl Flag {
    /// `true`, `yes`, `y`, `1` and `on` read as true, case-insensitively.
    /// A non-zero number is true; anything else is false.
    pub fn is_true(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "on"
            ),
            Flag::Other(value) => value.as_f64().is_some_and(|n| n != 0.0),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

impl From<&str> for Flag {
    fn from(value: &str) -> Self {
        Flag::Text(value.to_string())
    }
}

/// A numeric column that may arrive as a number or as numeric text.
/// Negative, fractional, or non-numeric cells are kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(u32),
    Text(String),
    Other(serde_json::Value),
}

impl Count {
    /// The count, when the cell holds a whole non-negative number.
    pub fn value(&self) -> Option<u32> {
        match self {
            Count::Number(n) => Some(*n),
            Count::Text(s) => s.trim().parse().ok(),
            Count::Other(value) => value
                .as_f64()
                .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
                .map(|n| n as u32),
        }
    }
}

/// Attendance response, written by the RSVP form as `yes` or `no`. Any other
/// text, including differently-cased answers, is kept verbatim in `Other` so
/// it is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attendance {
    Yes,
    No,
    Other(String),
}

impl Attendance {
    /// Whether the guest is coming, reading `Yes`/`NO` and the like
    /// case-insensitively. `None` when the text is neither answer.
    pub fn answer(&self) -> Option<bool> {
        match self {
            Attendance::Yes => Some(true),
            Attendance::No => Some(false),
            Attendance::Other(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" => Some(true),
                "no" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<String> for Attendance {
    fn from(value: String) -> Self {
        match value.as_str() {
            "yes" => Attendance::Yes,
            "no" => Attendance::No,
            _ => Attendance::Other(value),
        }
    }
}

impl From<Attendance> for String {
    fn from(value: Attendance) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attendance::Yes => f.write_str("yes"),
            Attendance::No => f.write_str("no"),
            Attendance::Other(s) => f.write_str(s),
        }
    }
}

/// Invite category. The set is open; only the two categories that change
/// what the invite shows get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InviteCategory {
    Family,
    PlusOne,
    Other(String),
}

impl From<String> for InviteCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Family" => InviteCategory::Family,
            "Plus One" => InviteCategory::PlusOne,
            _ => InviteCategory::Other(value),
        }
    }
}

impl From<InviteCategory> for String {
    fn from(value: InviteCategory) -> Self {
        match value {
            InviteCategory::Family => "Family".to_string(),
            InviteCategory::PlusOne => "Plus One".to_string(),
            InviteCategory::Other(s) => s,
        }
    }
}
