//! URL mapping entity: one alias pointing at one target URL.

/// A stored alias mapping.
///
/// `id` is assigned by storage and never reused. `alias` is case-sensitive,
/// unique and immutable; there is no update path, only delete and recreate.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub alias: String,
    pub url: String,
}

impl NewUrlMapping {
    pub fn new(alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mapping_creation() {
        let new_mapping = NewUrlMapping::new("ex1", "https://example.com/page");

        assert_eq!(new_mapping.alias, "ex1");
        assert_eq!(new_mapping.url, "https://example.com/page");
    }
}
