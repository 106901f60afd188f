//! Post data model.
//!
//! A post is created from a [`PostDraft`] and is never modified afterwards.
//! The application imposes no constraints on the text fields: both may be
//! absent or empty.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned when parsing a [`PostId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// The identifier was empty or whitespace.
    EmptyId,
    /// The identifier is not a UUID.
    InvalidId,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "post id must not be empty"),
            Self::InvalidId => write!(f, "post id must be a valid UUID"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Store-assigned post identifier.
///
/// Opaque to the rest of the application; the store hands out UUIDs, so any
/// text that is not a UUID cannot name a post.
///
/// # Examples
/// ```
/// use quill::domain::PostId;
///
/// let id = PostId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(PostId::new("not-a-post").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Parse an identifier received from a client.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PostValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(PostValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(PostValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PostValidationError::InvalidId)
    }

    /// Wrap a UUID issued by the store.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier. Used by in-memory stores.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Text fields submitted from the compose form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Title as submitted; `None` when the field was missing.
    pub title: Option<String>,
    /// Body as submitted; `None` when the field was missing.
    pub content: Option<String>,
}

impl PostDraft {
    /// Build a draft from optional title and content.
    pub fn new(title: Option<impl Into<String>>, content: Option<impl Into<String>>) -> Self {
        Self {
            title: title.map(Into::into),
            content: content.map(Into::into),
        }
    }
}

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: Option<String>,
    content: Option<String>,
}

impl Post {
    /// Assemble a post from its stored parts.
    #[must_use]
    pub const fn new(id: PostId, title: Option<String>, content: Option<String>) -> Self {
        Self { id, title, content }
    }

    /// Materialise a draft under a freshly assigned identifier.
    #[must_use]
    pub fn from_draft(id: PostId, draft: PostDraft) -> Self {
        let PostDraft { title, content } = draft;
        Self { id, title, content }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> PostId {
        self.id
    }

    /// Title, if one was submitted.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Body text, if any was submitted.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", PostValidationError::EmptyId)]
    #[case("123", PostValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", PostValidationError::InvalidId)]
    #[case("507f1f77bcf86cd799439011", PostValidationError::InvalidId)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: PostValidationError) {
        assert_eq!(PostId::new(raw), Err(expected));
    }

    #[test]
    fn accepts_uppercase_uuid() {
        let id = PostId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn from_draft_keeps_fields() {
        let id = PostId::random();
        let post = Post::from_draft(id, PostDraft::new(Some("Day one"), None::<String>));
        assert_eq!(post.id(), id);
        assert_eq!(post.title(), Some("Day one"));
        assert_eq!(post.content(), None);
    }
}
