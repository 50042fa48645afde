//! Composable color predicates.
//!
//! A [`ColorSpecification`] describes which colors a query should return
//! without touching the database. The diesel adapter turns it into a boxed
//! `WHERE` expression with [`ColorSpecification::to_filter`], so both the
//! page query and its count see exactly the same predicate.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};

use crate::schema::colors;

/// Boxed predicate over the `colors` table.
pub type ColorFilter = Box<dyn BoxableExpression<colors::table, Pg, SqlType = Nullable<Bool>>>;

/// Text columns a specification can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    Name,
    Hex,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColorSpecification {
    /// Matches every color.
    #[default]
    All,
    /// Case-insensitive substring match.
    Contains { field: ColorField, needle: String },
    /// Exact, case-sensitive match.
    Equals { field: ColorField, value: String },
    AuthorIs(i32),
    And(Box<ColorSpecification>, Box<ColorSpecification>),
    Or(Box<ColorSpecification>, Box<ColorSpecification>),
}

impl ColorSpecification {
    /// Builds the listing predicate for a free-text filter.
    ///
    /// An empty filter matches everything; otherwise a color matches when its
    /// name or hex contains the filter verbatim, ignoring case. Whitespace is
    /// part of the needle.
    pub fn new(filter: &str) -> Self {
        if filter.is_empty() {
            return ColorSpecification::All;
        }

        ColorSpecification::contains(ColorField::Name, filter)
            .or(ColorSpecification::contains(ColorField::Hex, filter))
    }

    pub fn contains(field: ColorField, needle: impl Into<String>) -> Self {
        ColorSpecification::Contains {
            field,
            needle: needle.into(),
        }
    }

    pub fn equals(field: ColorField, value: impl Into<String>) -> Self {
        ColorSpecification::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn author_is(author_id: i32) -> Self {
        ColorSpecification::AuthorIs(author_id)
    }

    /// Conjunction. `All` is the identity.
    pub fn and(self, other: ColorSpecification) -> Self {
        match (self, other) {
            (ColorSpecification::All, spec) | (spec, ColorSpecification::All) => spec,
            (left, right) => ColorSpecification::And(Box::new(left), Box::new(right)),
        }
    }

    /// Disjunction. `All` absorbs the other side.
    pub fn or(self, other: ColorSpecification) -> Self {
        match (self, other) {
            (ColorSpecification::All, _) | (_, ColorSpecification::All) => ColorSpecification::All,
            (left, right) => ColorSpecification::Or(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ColorSpecification::All)
    }

    /// Renders the specification as a SQL predicate.
    ///
    /// Returns `None` for a specification that matches every row, so the
    /// caller can skip the `WHERE` clause entirely.
    pub fn to_filter(&self) -> Option<ColorFilter> {
        match self {
            ColorSpecification::All => None,
            ColorSpecification::Contains { field, needle } => {
                Some(contains_filter(*field, like_pattern(needle)))
            }
            ColorSpecification::Equals { field, value } => {
                Some(equals_filter(*field, value.clone()))
            }
            ColorSpecification::AuthorIs(author) => Some(Box::new(colors::author_id.eq(*author))),
            ColorSpecification::And(left, right) => match (left.to_filter(), right.to_filter()) {
                (Some(l), Some(r)) => Some(Box::new(l.and(r))),
                (Some(only), None) | (None, Some(only)) => Some(only),
                (None, None) => None,
            },
            ColorSpecification::Or(left, right) => match (left.to_filter(), right.to_filter()) {
                (Some(l), Some(r)) => Some(Box::new(l.or(r))),
                _ => None,
            },
        }
    }
}

fn contains_filter(field: ColorField, pattern: String) -> ColorFilter {
    match field {
        ColorField::Name => Box::new(colors::name.ilike(pattern)),
        ColorField::Hex => Box::new(colors::hex.ilike(pattern).nullable()),
        ColorField::Description => Box::new(colors::description.ilike(pattern)),
    }
}

fn equals_filter(field: ColorField, value: String) -> ColorFilter {
    match field {
        ColorField::Name => Box::new(colors::name.eq(value)),
        ColorField::Hex => Box::new(colors::hex.eq(value).nullable()),
        ColorField::Description => Box::new(colors::description.eq(value)),
    }
}

/// Wraps `needle` in `%` after escaping the LIKE metacharacters, so the
/// needle only ever matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;
    use diesel::dsl::sql;
    use proptest::prelude::*;

    fn match_all() -> ColorFilter {
        Box::new(sql::<Bool>("TRUE").nullable())
    }

    fn render(spec: &ColorSpecification) -> String {
        let filter = spec.to_filter().unwrap_or_else(match_all);
        let query = colors::table.select(colors::id).filter(filter);
        debug_query::<Pg, _>(&query).to_string()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(ColorSpecification::new(""), ColorSpecification::All);
        assert!(ColorSpecification::new("").to_filter().is_none());
    }

    #[test]
    fn test_whitespace_is_kept_in_the_needle() {
        assert_eq!(
            ColorSpecification::new(" "),
            ColorSpecification::contains(ColorField::Name, " ")
                .or(ColorSpecification::contains(ColorField::Hex, " "))
        );
        assert!(render(&ColorSpecification::new("light ")).contains("%light %"));
    }

    #[test]
    fn test_filter_matches_name_or_hex() {
        let spec = ColorSpecification::new("red");
        assert_eq!(
            spec,
            ColorSpecification::Or(
                Box::new(ColorSpecification::contains(ColorField::Name, "red")),
                Box::new(ColorSpecification::contains(ColorField::Hex, "red")),
            )
        );

        let sql = render(&spec);
        assert!(sql.contains("\"colors\".\"name\" ILIKE"), "{}", sql);
        assert!(sql.contains("\"colors\".\"hex\" ILIKE"), "{}", sql);
        assert!(sql.contains(" OR "), "{}", sql);
        assert!(sql.contains("%red%"), "{}", sql);
    }

    #[test]
    fn test_and_composes_secondary_filters() {
        let spec = ColorSpecification::new("blue")
            .and(ColorSpecification::author_is(7))
            .and(ColorSpecification::equals(ColorField::Hex, "0000ff"));

        let sql = render(&spec);
        assert!(sql.contains(" AND "), "{}", sql);
        assert!(sql.contains("\"colors\".\"author_id\" ="), "{}", sql);
        assert!(sql.contains("\"colors\".\"hex\" ="), "{}", sql);
        assert!(sql.contains("0000ff"), "{}", sql);
    }

    #[test]
    fn test_all_is_identity_for_and() {
        let author = ColorSpecification::author_is(1);
        assert_eq!(ColorSpecification::All.and(author.clone()), author);
        assert_eq!(author.clone().and(ColorSpecification::All), author);
        assert!(ColorSpecification::All.and(ColorSpecification::All).is_all());
    }

    #[test]
    fn test_all_absorbs_or() {
        let author = ColorSpecification::author_is(1);
        assert!(author.or(ColorSpecification::All).is_all());
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("red"), "%red%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }

    proptest! {
        #[test]
        fn test_same_filter_builds_equal_specifications(filter in ".{0,24}") {
            prop_assert_eq!(ColorSpecification::new(&filter), ColorSpecification::new(&filter));
        }

        #[test]
        fn test_like_pattern_has_no_unescaped_wildcards(needle in "[a-z%_\\\\]{0,16}") {
            let pattern = like_pattern(&needle);
            let inner = &pattern[1..pattern.len() - 1];
            let mut chars = inner.chars();
            while let Some(ch) = chars.next() {
                if ch == '\\' {
                    let escaped = chars.next();
                    prop_assert!(matches!(escaped, Some('\\' | '%' | '_')));
                } else {
                    prop_assert!(ch != '%' && ch != '_');
                }
            }
        }
    }
}
