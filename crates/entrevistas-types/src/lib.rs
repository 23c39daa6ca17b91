//! Validated text types shared by the interview note crates.
//!
//! Two flavours are provided because note content and tag names follow different rules:
//! - [`NonEmptyText`] trims surrounding whitespace and rejects blank input. Used for note
//!   content, which is stored exactly as the trimmed draft.
//! - [`TagName`] rejects blank input but keeps the original string untouched. Tag names are
//!   matched exactly (case-sensitive, no trimming), so normalising them here would make two
//!   distinct stored tags collide.

/// Errors that can occur when creating validated text types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty, trimmed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The name of a note category ("etiqueta").
///
/// Must contain at least one non-whitespace character. The stored value is the input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let name = input.into();
        if name.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for TagName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for TagName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TagName::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Good attendance \n").unwrap();
        assert_eq!(text.as_str(), "Good attendance");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new(" \t ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn tag_name_is_kept_verbatim() {
        let tag = TagName::new(" Health").unwrap();
        assert_eq!(tag.as_str(), " Health");
        assert_ne!(tag, TagName::new("health").unwrap());
    }

    #[test]
    fn tag_name_rejects_blank() {
        assert!(TagName::new("   ").is_err());
    }

    #[test]
    fn deserialize_rejects_blank_content() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
