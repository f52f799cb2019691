//! Plain-text views of the user collection.

use std::fmt::Write as _;

use crate::domain::User;

const NO_USERS: &str = "There are no users.";
const NO_POSTS: &str = "There are no posts.";
const USER_NOT_FOUND: &str = "User not found.";

/// One list row: `"<name> - (<n> post|posts)"`.
pub fn user_summary(user: &User) -> String {
    let name = user.name.as_deref().unwrap_or_default();
    let count = user.post_count();
    let noun = if count == 1 { "post" } else { "posts" };
    format!("{name} - ({count} {noun})")
}

/// The list view: a total line, then one keyed row per user.
pub fn render_list(users: &[User]) -> String {
    let mut out = format!("Total: {}\n", users.len());
    if users.is_empty() {
        out.push_str(NO_USERS);
        out.push('\n');
        return out;
    }
    for user in users {
        let _ = writeln!(out, "[{}] {}", user.id, user_summary(user));
    }
    out
}

/// The details view for `user`, or the not-found view.
///
/// Users whose posts were never attached show the no-posts message; users
/// with an empty post list show only the header.
pub fn render_details(user: Option<&User>) -> String {
    let Some(user) = user else {
        return format!("{USER_NOT_FOUND}\n{NO_POSTS}\n");
    };

    let mut out = user.name.clone().unwrap_or_default();
    if let Some(username) = &user.username {
        let _ = write!(out, " ({username})");
    }
    out.push('\n');

    match &user.posts {
        None => {
            out.push_str(NO_POSTS);
            out.push('\n');
        }
        Some(posts) => {
            for post in posts {
                let title = post.title.as_deref().unwrap_or_default();
                let _ = writeln!(out, "{}. {title}", post.id);
            }
        }
    }
    out
}
