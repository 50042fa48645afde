//! Hand-written in-memory stores for service and router tests.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{Color, NewColor, NewUser, Page, PageRequest, SortField, User};
use crate::repositories::{ColorField, ColorSpecification, ColorStore, UserStore};

pub fn color(id: i32, hex: &str, name: &str) -> Color {
    Color {
        id,
        name: Some(name.to_string()),
        description: None,
        hex: hex.to_string(),
        author_id: None,
    }
}

pub fn user(id: i32, username: &str) -> User {
    let created = jiff::civil::date(2025, 1, 10).at(12, 0, 0, 0).to_diesel();
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: String::new(),
        created_at: created,
        updated_at: created,
    }
}

/// Evaluates a specification the way the SQL adapter does.
pub fn matches(spec: &ColorSpecification, color: &Color) -> bool {
    fn column(field: ColorField, color: &Color) -> Option<&str> {
        match field {
            ColorField::Name => color.name.as_deref(),
            ColorField::Hex => Some(color.hex.as_str()),
            ColorField::Description => color.description.as_deref(),
        }
    }

    match spec {
        ColorSpecification::All => true,
        ColorSpecification::Contains { field, needle } => column(*field, color)
            .map(|value| value.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        ColorSpecification::Equals { field, value } => column(*field, color) == Some(value.as_str()),
        ColorSpecification::AuthorIs(author) => color.author_id == Some(*author),
        ColorSpecification::And(left, right) => matches(left, color) && matches(right, color),
        ColorSpecification::Or(left, right) => matches(left, color) || matches(right, color),
    }
}

/// Ascending with missing values after present ones, like Postgres `ASC`.
fn nulls_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Default)]
pub struct InMemoryColorStore {
    colors: Mutex<Vec<Color>>,
    next_id: AtomicI32,
    pub saves: AtomicUsize,
    /// Makes `save` fail with a hex unique violation, as if another request
    /// inserted the same hex between the lookup and the insert.
    pub lose_insert_race: AtomicBool,
}

impl InMemoryColorStore {
    pub fn with_colors(colors: Vec<Color>) -> Arc<Self> {
        let next_id = colors.iter().map(|c| c.id).max().unwrap_or(0);
        Arc::new(Self {
            colors: Mutex::new(colors),
            next_id: AtomicI32::new(next_id),
            ..Default::default()
        })
    }

    pub fn primaries() -> Arc<Self> {
        Self::with_colors(vec![
            color(1, "ff0000", "Red"),
            color(2, "00ff00", "Green"),
            color(3, "0000ff", "Blue"),
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.lock().unwrap().len()
    }

    fn find(&self, predicate: impl Fn(&Color) -> bool) -> Option<Color> {
        self.colors.lock().unwrap().iter().find(|c| predicate(c)).cloned()
    }
}

#[async_trait]
impl ColorStore for InMemoryColorStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Color>> {
        Ok(self.find(|c| c.id == id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Color>> {
        Ok(self.find(|c| c.name.as_deref() == Some(name)))
    }

    async fn find_by_hex(&self, hex: &str) -> AppResult<Option<Color>> {
        Ok(self.find(|c| c.hex == hex))
    }

    async fn find_page(
        &self,
        spec: &ColorSpecification,
        page_request: &PageRequest,
    ) -> AppResult<Page<Color>> {
        let mut matching: Vec<Color> = self
            .colors
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches(spec, c))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let primary = match page_request.sort {
                SortField::Id => Ordering::Equal,
                SortField::Name => nulls_last(&a.name, &b.name),
                SortField::Hex => a.hex.cmp(&b.hex),
                SortField::Description => nulls_last(&a.description, &b.description),
            };
            primary.then(a.id.cmp(&b.id))
        });

        let total = matching.len() as i64;
        let content = matching
            .into_iter()
            .skip(page_request.offset() as usize)
            .take(page_request.limit() as usize)
            .collect();

        Ok(Page::new(content, page_request, total))
    }

    async fn save(&self, new_color: NewColor) -> AppResult<Color> {
        self.saves.fetch_add(1, AtomicOrdering::SeqCst);

        let mut colors = self.colors.lock().unwrap();
        if self.lose_insert_race.load(AtomicOrdering::SeqCst)
            || colors.iter().any(|c| c.hex == new_color.hex)
        {
            return Err(AppError::Duplicate {
                entity: "colors".to_string(),
                field: "hex".to_string(),
                value: new_color.hex,
            });
        }

        let saved = Color {
            id: self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1,
            name: new_color.name,
            description: new_color.description,
            hex: new_color.hex,
            author_id: new_color.author_id,
        };
        colors.push(saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        let mut colors = self.colors.lock().unwrap();
        let before = colors.len();
        colors.retain(|c| c.id != id);
        Ok(before - colors.len())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        Arc::new(Self {
            users: Mutex::new(users),
            next_id: AtomicI32::new(next_id),
        })
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.id == id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.email == email))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        for (field, taken) in [
            ("username", users.iter().any(|u| u.username == new_user.username)),
            ("email", users.iter().any(|u| u.email == new_user.email)),
        ] {
            if taken {
                let value = if field == "email" {
                    new_user.email.clone()
                } else {
                    new_user.username.clone()
                };
                return Err(AppError::Duplicate {
                    entity: "users".to_string(),
                    field: field.to_string(),
                    value,
                });
            }
        }

        let mut created = user(self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1, &new_user.username);
        created.email = new_user.email;
        created.password = new_user.password;
        users.push(created.clone());
        Ok(created)
    }
}
