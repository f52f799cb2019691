//! Driven port for reading users and posts from the remote directory.
//!
//! The two reads are independent: the loader decides how a failure of one
//! affects the other. Each call performs a single read with no retry.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Post, User};

define_port_error! {
    /// Errors surfaced while reading from the directory.
    pub enum DirectorySourceError {
        /// The request never produced a response.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// The directory answered with a non-success status.
        Status { status: u16, message: String } =>
            "directory returned status {status}: {message}",
        /// The response body was not the expected JSON array.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

/// Port for reading the user and post collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch every user the directory knows about.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use roster::domain::ports::{DirectorySource, FixtureDirectorySource};
    ///
    /// let source = FixtureDirectorySource::new(Ok(vec![]), Ok(vec![]));
    /// let users = source.fetch_users().await?;
    /// assert!(users.is_empty());
    /// # Ok::<(), roster::domain::ports::DirectorySourceError>(())
    /// ```
    async fn fetch_users(&self) -> Result<Vec<User>, DirectorySourceError>;

    /// Fetch every post the directory knows about.
    async fn fetch_posts(&self) -> Result<Vec<Post>, DirectorySourceError>;
}

/// Fixture source returning canned results and counting calls.
///
/// Every call returns a clone of the configured result, so the same fixture
/// can back repeated loads.
#[derive(Debug)]
pub struct FixtureDirectorySource {
    users: Mutex<Result<Vec<User>, DirectorySourceError>>,
    posts: Mutex<Result<Vec<Post>, DirectorySourceError>>,
    user_calls: AtomicUsize,
    post_calls: AtomicUsize,
}

impl FixtureDirectorySource {
    /// Build a fixture answering with `users` and `posts`.
    pub fn new(
        users: Result<Vec<User>, DirectorySourceError>,
        posts: Result<Vec<Post>, DirectorySourceError>,
    ) -> Self {
        Self {
            users: Mutex::new(users),
            posts: Mutex::new(posts),
            user_calls: AtomicUsize::new(0),
            post_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_users` calls served so far.
    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_posts` calls served so far.
    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    /// Replace the users result for subsequent calls.
    pub fn set_users(&self, users: Result<Vec<User>, DirectorySourceError>) {
        if let Ok(mut slot) = self.users.lock() {
            *slot = users;
        }
    }

    /// Replace the posts result for subsequent calls.
    pub fn set_posts(&self, posts: Result<Vec<Post>, DirectorySourceError>) {
        if let Ok(mut slot) = self.posts.lock() {
            *slot = posts;
        }
    }
}

impl Default for FixtureDirectorySource {
    fn default() -> Self {
        Self::new(Ok(Vec::new()), Ok(Vec::new()))
    }
}

#[async_trait]
impl DirectorySource for FixtureDirectorySource {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectorySourceError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .map_err(|_| DirectorySourceError::transport("fixture users mutex poisoned"))?
            .clone()
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, DirectorySourceError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.posts
            .lock()
            .map_err(|_| DirectorySourceError::transport("fixture posts mutex poisoned"))?
            .clone()
    }
}
