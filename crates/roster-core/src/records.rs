//! User records and the sorted table view.
//!
//! The record list held by the UI is a cache of the remote collection. It is
//! replaced wholesale on every reload and never patched in place; sorting is
//! a view transform over that cache.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque record identifier assigned by the store.
///
/// The store may hand out numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Numeric ids go back out as numbers so filters and bodies match the store's type.
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => UserId(n.to_string()),
            Raw::Uint(n) => UserId(n.to_string()),
            Raw::Text(s) => UserId(s),
        })
    }
}

/// A user row as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserRecord {
    /// Returns the text value of a column.
    pub fn field(&self, column: SortColumn) -> &str {
        match column {
            SortColumn::Name => &self.name,
            SortColumn::Email => &self.email,
            SortColumn::Department => &self.department,
            SortColumn::Group => &self.group,
        }
    }

    /// Copies the editable fields into a draft.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            group: self.group.clone(),
        }
    }
}

/// The four editable fields, without an identifier.
///
/// Used as the insert body and as the update body (keyed separately by id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub department: String,
    pub group: String,
}

impl UserDraft {
    pub fn field(&self, column: SortColumn) -> &str {
        match column {
            SortColumn::Name => &self.name,
            SortColumn::Email => &self.email,
            SortColumn::Department => &self.department,
            SortColumn::Group => &self.group,
        }
    }

    pub fn field_mut(&mut self, column: SortColumn) -> &mut String {
        match column {
            SortColumn::Name => &mut self.name,
            SortColumn::Email => &mut self.email,
            SortColumn::Department => &mut self.department,
            SortColumn::Group => &mut self.group,
        }
    }

    /// Builds the full record the store would hold for `id`.
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            group: self.group,
        }
    }
}

/// Table columns, which double as the editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Email,
    Department,
    Group,
}

impl SortColumn {
    pub fn all() -> &'static [SortColumn] {
        &[
            SortColumn::Name,
            SortColumn::Email,
            SortColumn::Department,
            SortColumn::Group,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Email => "Email",
            SortColumn::Department => "Department",
            SortColumn::Group => "Group",
        }
    }

    /// Parses a column name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortColumn::Name),
            "email" => Some(SortColumn::Email),
            "department" => Some(SortColumn::Department),
            "group" => Some(SortColumn::Group),
            _ => None,
        }
    }

    /// Column at a 0-based position in table order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction. Defaults to name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips the direction; another column resets to ascending.
    pub fn sort_by(&mut self, column: SortColumn) {
        if column == self.column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Three-way comparison of two records on the active column.
    ///
    /// Text is ordered by UTF-16 code units, so surrogate pairs for
    /// characters above U+FFFF sort before U+E000..=U+FFFF.
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        let ord = a
            .field(self.column)
            .encode_utf16()
            .cmp(b.field(self.column).encode_utf16());
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    /// Returns the records in display order without touching the source.
    pub fn apply<'a>(&self, records: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let mut view: Vec<&UserRecord> = records.iter().collect();
        view.sort_by(|a, b| self.compare(a, b));
        view
    }
}
