use diesel::prelude::*;
use jiff_diesel::DateTime;

/// A registered account; colors reference it through `author_id`.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the plain text password
    pub password: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Row inserted on registration, with the password already hashed.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}
