//! Blog post aggregate and its validated constructors.
//!
//! Inbound adapters decode raw payloads; this module decides whether the
//! values form a post. Storage assigns identifiers, so a [`NewPost`] never
//! carries one.

use std::fmt;
use std::str::FromStr;

/// Storage-assigned post identifier.
///
/// # Examples
/// ```
/// use blog_api::domain::PostId;
///
/// let id: PostId = "42".parse().expect("integer id");
/// assert_eq!(id.as_i64(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a path segment is not a 64-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("id is not an integer")]
pub struct PostIdParseError;

impl FromStr for PostId {
    type Err = PostIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| PostIdParseError)
    }
}

/// Validation failures for post fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Title was missing or blank once trimmed.
    #[error("title is required")]
    EmptyTitle,
    /// Body was missing or blank once trimmed.
    #[error("body is required")]
    EmptyBody,
    /// Author was missing or zero.
    #[error("author is required")]
    MissingAuthor,
}

impl PostValidationError {
    /// Name of the offending request field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyBody => "body",
            Self::MissingAuthor => "author",
        }
    }
}

/// Validated post content awaiting an identifier.
///
/// ## Invariants
/// - `title` and `body` contain at least one non-whitespace character.
/// - `author` is non-zero.
///
/// Text is stored exactly as supplied; only the emptiness check trims.
///
/// # Examples
/// ```
/// use blog_api::domain::{NewPost, PostValidationError};
///
/// let post = NewPost::try_new("Hello", "World", 7).expect("valid post");
/// assert_eq!(post.title(), "Hello");
///
/// let err = NewPost::try_new("  ", "World", 7).unwrap_err();
/// assert_eq!(err, PostValidationError::EmptyTitle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    body: String,
    author: i64,
}

impl NewPost {
    /// Validate raw post fields.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: i64,
    ) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        let body = body.into();
        if body.trim().is_empty() {
            return Err(PostValidationError::EmptyBody);
        }
        if author == 0 {
            return Err(PostValidationError::MissingAuthor);
        }
        Ok(Self {
            title,
            body,
            author,
        })
    }

    /// Validate optional fields as decoded from a request body.
    pub fn try_from_parts(
        title: Option<String>,
        body: Option<String>,
        author: Option<i64>,
    ) -> Result<Self, PostValidationError> {
        Self::try_new(
            title.unwrap_or_default(),
            body.unwrap_or_default(),
            author.unwrap_or_default(),
        )
    }

    /// Non-blank title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Non-blank body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Non-zero author identifier.
    pub fn author(&self) -> i64 {
        self.author
    }

    /// Attach a storage-assigned identifier.
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
            author: self.author,
        }
    }
}

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: String,
    body: String,
    author: i64,
}

impl Post {
    /// Rehydrate a post from trusted storage values.
    pub fn from_storage(id: PostId, title: String, body: String, author: i64) -> Self {
        Self {
            id,
            title,
            body,
            author,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Post title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Author identifier.
    pub fn author(&self) -> i64 {
        self.author
    }
}
