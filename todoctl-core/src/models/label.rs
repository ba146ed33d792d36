//! Validated short-text labels: todo titles and item names
//!
//! Both map onto `VARCHAR(255)` columns, so the limit is counted in
//! characters rather than bytes and NUL is rejected.

use serde::Serialize;

use super::ValidationError;

/// Maximum length for titles and names
pub const MAX_LABEL_LEN: usize = 255;

fn checked(s: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    // Postgres text columns cannot hold NUL
    if trimmed.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must not contain NUL characters",
        });
    }

    if trimmed.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_LABEL_LEN,
        });
    }

    Ok(trimmed.to_owned())
}

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use todoctl_core::TodoTitle;
    ///
    /// assert!(TodoTitle::new("Ship release").is_ok());
    /// assert!(TodoTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        checked(s, "title").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated todo item name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Create a new item name. Same rules as [`TodoTitle::new`].
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        checked(s, "name").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let title = TodoTitle::new("  Groceries  ").unwrap();
        assert_eq!(title.as_str(), "Groceries");
    }

    #[test]
    fn rejects_empty() {
        let err = TodoTitle::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "title" }));

        let err = ItemName::new(" \t ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn rejects_nul() {
        let err = TodoTitle::new("a\u{0}b").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "title",
                reason: "must not contain NUL characters",
            }
        );
        assert!(ItemName::new("\0").is_err());
    }

    #[test]
    fn max_length_counts_chars() {
        // 255 multi-byte chars is still within the column limit
        let name_255 = "é".repeat(255);
        assert!(ItemName::new(&name_255).is_ok());

        let name_256 = "a".repeat(256);
        let err = ItemName::new(&name_256).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }
}
