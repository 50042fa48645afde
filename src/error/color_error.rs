use std::fmt;

use thiserror::Error;

/// The lookup key a missing color was searched by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Id(i32),
    Name(String),
    Hex(String),
}

impl ColorKey {
    /// Name of the column the key refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ColorKey::Id(_) => "id",
            ColorKey::Name(_) => "name",
            ColorKey::Hex(_) => "hex",
        }
    }

    pub fn value(&self) -> String {
        match self {
            ColorKey::Id(id) => id.to_string(),
            ColorKey::Name(name) => name.clone(),
            ColorKey::Hex(hex) => hex.clone(),
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorKey::Id(id) => write!(f, "id={}", id),
            ColorKey::Name(name) => write!(f, "name='{}'", name),
            ColorKey::Hex(hex) => write!(f, "hex='{}'", hex),
        }
    }
}

/// Domain failures raised by the color service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color not found with {key}")]
    NotFound { key: ColorKey },

    #[error("Color with hex '{hex}' already exists")]
    AlreadyExists { hex: String },
}

impl ColorError {
    pub fn not_found(key: ColorKey) -> Self {
        ColorError::NotFound { key }
    }

    pub fn already_exists(hex: impl Into<String>) -> Self {
        ColorError::AlreadyExists { hex: hex.into() }
    }
}
