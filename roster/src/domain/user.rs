//! User and post records.
//!
//! The serde representation of these types is the cache layout: a JSON array
//! of users, each carrying `id`, `name`, `username`, an optional `posts`
//! array, and any further fields the directory sent. Unknown fields are kept
//! in `extra` so a cached snapshot round-trips everything the directory
//! returned.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifying key of a user.
///
/// Directory users carry numeric keys; locally added users carry synthesised
/// text keys. The JSON form is untagged, so `1` and `"1"` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserKey {
    /// Numeric key, as issued by the directory.
    Number(i64),
    /// Text key, as synthesised for local additions.
    Text(String),
}

impl UserKey {
    /// Interpret raw consumer input as a key.
    ///
    /// Input is numeric only when it is the canonical rendering of an integer,
    /// so `"7"` becomes `Number(7)` while `"007"` stays text.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::UserKey;
    ///
    /// assert_eq!(UserKey::parse("7"), UserKey::Number(7));
    /// assert_eq!(UserKey::parse("007"), UserKey::Text("007".to_owned()));
    /// assert_eq!(UserKey::parse("Ann1700000000000"), UserKey::Text("Ann1700000000000".to_owned()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(number) if number.to_string() == raw => Self::Number(number),
            _ => Self::Text(raw.to_owned()),
        }
    }

    /// Compare keys by their textual rendering.
    ///
    /// Consumers address users by text (links, command arguments), so lookups
    /// and deletions treat `Number(3)` and `Text("3")` as the same user. The
    /// join, by contrast, uses exact equality.
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Number(number), Self::Text(text)) | (Self::Text(text), Self::Number(number)) => {
                number.to_string() == *text
            }
        }
    }

    /// Whether the key renders as an empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for UserKey {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for UserKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A post authored by a directory user. Posts are only ever read from the
/// directory; they are never created or edited locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post identifier.
    pub id: i64,
    /// Key of the owning user.
    #[serde(rename = "userId")]
    pub user_id: UserKey,
    /// Post title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Remaining directory fields (for example `body`), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Build a post with the given identity and title.
    pub fn new(id: i64, user_id: impl Into<UserKey>, title: impl Into<String>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            title: Some(title.into()),
            extra: Map::new(),
        }
    }
}

/// A directory user, optionally carrying the posts joined onto it.
///
/// `posts` is `None` until a join has run. Users cached after a failed posts
/// fetch keep `None`, which consumers render differently from an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifying key.
    pub id: UserKey,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Posts owned by this user, in directory order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
    /// Remaining directory fields (email, address, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Build a user with a key and display name and no posts attached.
    pub fn new(id: impl Into<UserKey>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            username: None,
            posts: None,
            extra: Map::new(),
        }
    }

    /// Attach an account handle.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attach posts, replacing any already present.
    #[must_use]
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = Some(posts);
        self
    }

    /// Number of attached posts; users without a posts list count zero.
    pub fn post_count(&self) -> usize {
        self.posts.as_ref().map_or(0, Vec::len)
    }
}
