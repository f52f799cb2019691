//! Mutable user collection with change listeners.
//!
//! Consumers add and delete users here; listeners registered with
//! [`UserList::on_add_user`] and [`UserList::on_delete_user`] run after each
//! change, in registration order, and receive the whole collection so they
//! can persist it.

use super::{Error, User, UserKey, UserKeyGenerator};

type AddListener = Box<dyn FnMut(&[User], &User) -> Result<(), Error> + Send>;
type DeleteListener = Box<dyn FnMut(&[User], &UserKey) -> Result<(), Error> + Send>;

/// A user entered locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Caller-chosen key; a key is synthesised when absent or empty.
    pub id: Option<UserKey>,
    /// Display name.
    pub name: Option<String>,
    /// Account handle.
    pub username: Option<String>,
}

impl NewUser {
    /// A new user known only by display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Ordered user collection that notifies listeners on change.
pub struct UserList {
    users: Vec<User>,
    keys: Box<dyn UserKeyGenerator>,
    add_listeners: Vec<AddListener>,
    delete_listeners: Vec<DeleteListener>,
}

impl UserList {
    /// Wrap `users`, synthesising keys for additions with `keys`.
    pub fn new(users: Vec<User>, keys: Box<dyn UserKeyGenerator>) -> Self {
        Self {
            users,
            keys,
            add_listeners: Vec::new(),
            delete_listeners: Vec::new(),
        }
    }

    /// Current users in order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Give up the collection.
    pub fn into_users(self) -> Vec<User> {
        self.users
    }

    /// Register a listener run after every addition.
    pub fn on_add_user<F>(&mut self, listener: F)
    where
        F: FnMut(&[User], &User) -> Result<(), Error> + Send + 'static,
    {
        self.add_listeners.push(Box::new(listener));
    }

    /// Register a listener run after every deletion.
    pub fn on_delete_user<F>(&mut self, listener: F)
    where
        F: FnMut(&[User], &UserKey) -> Result<(), Error> + Send + 'static,
    {
        self.delete_listeners.push(Box::new(listener));
    }

    /// Append a user and notify add listeners.
    ///
    /// Returns the key the user was stored under. The first failing listener
    /// stops notification and its error is returned; the user stays added.
    ///
    /// # Errors
    ///
    /// Propagates the first listener error.
    pub fn add_user(&mut self, new_user: NewUser) -> Result<UserKey, Error> {
        let NewUser { id, name, username } = new_user;
        let id = match id {
            Some(key) if !key.is_empty() => key,
            _ => self.keys.generate(name.as_deref()),
        };

        self.users.push(User {
            id: id.clone(),
            name,
            username,
            posts: None,
            extra: serde_json::Map::new(),
        });

        let Some(added) = self.users.last() else {
            return Err(Error::internal("user list lost the appended user"));
        };
        for listener in &mut self.add_listeners {
            listener(&self.users, added)?;
        }
        Ok(id)
    }

    /// Remove every user whose key matches `key` and notify delete listeners.
    ///
    /// Returns how many users were removed. An empty key is ignored and no
    /// listener runs; a key matching nobody still notifies.
    ///
    /// # Errors
    ///
    /// Propagates the first listener error.
    pub fn delete_user(&mut self, key: &UserKey) -> Result<usize, Error> {
        if key.is_empty() {
            return Ok(0);
        }

        let before = self.users.len();
        self.users.retain(|user| !user.id.matches(key));
        let removed = before - self.users.len();

        for listener in &mut self.delete_listeners {
            listener(&self.users, key)?;
        }
        Ok(removed)
    }

    /// Find a user by textual key; the last match wins.
    pub fn find(&self, key: &UserKey) -> Option<&User> {
        self.users.iter().rev().find(|user| user.id.matches(key))
    }
}
