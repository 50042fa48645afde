use std::hash::{Hash, Hasher};

use diesel::prelude::*;
use serde::Serialize;

/// Persisted color record.
///
/// Identity is the `(id, hex)` pair: two colors compare equal when both the
/// generated id and the hex code match, whatever their name, description or
/// author. Unsaved colors are a separate type ([`NewColor`]) and cannot be
/// compared at all.
#[derive(Debug, Queryable, Selectable, Identifiable, Serialize, Clone)]
#[diesel(table_name = crate::schema::colors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Color {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub hex: String,
    /// Weak reference to the author; the user's lifecycle is not owned here.
    pub author_id: Option<i32>,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.hex == other.hex
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.hex.hash(state);
    }
}

/// NewColor model for inserting new records.
/// The store assigns `id` on insert.
#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::colors)]
pub struct NewColor {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hex: String,
    pub author_id: Option<i32>,
}
