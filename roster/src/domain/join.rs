//! Attach posts to their owning users.

use super::{Post, User};

/// Attach to each user the posts whose `user_id` equals the user's key.
///
/// The function is total: empty inputs yield empty or post-less users, and
/// posts whose owner is not in `users` are dropped. Every returned user has
/// `posts` set (possibly empty), replacing whatever it carried before. Posts
/// keep their relative input order. Each user scans the full post list.
///
/// # Examples
/// ```
/// use roster::domain::{Post, User, join};
///
/// let users = vec![User::new(1, "Ann")];
/// let posts = vec![Post::new(10, 1, "Hi"), Post::new(11, 2, "Other")];
///
/// let joined = join(users, &posts);
/// assert_eq!(joined[0].posts, Some(vec![Post::new(10, 1, "Hi")]));
/// ```
pub fn join(users: Vec<User>, posts: &[Post]) -> Vec<User> {
    users
        .into_iter()
        .map(|mut user| {
            let owned = posts
                .iter()
                .filter(|post| post.user_id == user.id)
                .cloned()
                .collect();
            user.posts = Some(owned);
            user
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserKey;
    use rstest::rstest;

    fn titles(user: &User) -> Vec<&str> {
        user.posts
            .iter()
            .flatten()
            .filter_map(|post| post.title.as_deref())
            .collect()
    }

    #[test]
    fn attaches_matching_posts_and_drops_orphans() {
        let users = vec![User::new(1, "Ann")];
        let posts = vec![Post::new(10, 1, "Hi"), Post::new(11, 2, "Other")];

        let joined = join(users, &posts);

        assert_eq!(
            joined,
            vec![User::new(1, "Ann").with_posts(vec![Post::new(10, 1, "Hi")])]
        );
    }

    #[test]
    fn preserves_relative_post_order_per_user() {
        let users = vec![User::new(1, "Ann"), User::new(2, "Bo")];
        let posts = vec![
            Post::new(30, 2, "b-first"),
            Post::new(20, 1, "a-first"),
            Post::new(10, 2, "b-second"),
            Post::new(40, 1, "a-second"),
        ];

        let joined = join(users, &posts);

        assert_eq!(titles(&joined[0]), vec!["a-first", "a-second"]);
        assert_eq!(titles(&joined[1]), vec!["b-first", "b-second"]);
    }

    #[test]
    fn users_without_posts_receive_an_empty_list() {
        let joined = join(vec![User::new(3, "Cy")], &[Post::new(1, 1, "x")]);
        assert_eq!(joined[0].posts, Some(Vec::new()));
    }

    #[rstest]
    #[case::no_users(vec![], vec![Post::new(1, 1, "x")], 0)]
    #[case::no_posts(vec![User::new(1, "Ann")], vec![], 1)]
    #[case::neither(vec![], vec![], 0)]
    fn empty_inputs_never_fail(
        #[case] users: Vec<User>,
        #[case] posts: Vec<Post>,
        #[case] expected_len: usize,
    ) {
        let joined = join(users, &posts);
        assert_eq!(joined.len(), expected_len);
        assert!(joined.iter().all(|user| user.posts == Some(Vec::new())));
    }

    #[test]
    fn replaces_previously_attached_posts() {
        let stale = User::new(1, "Ann").with_posts(vec![Post::new(99, 1, "stale")]);
        let joined = join(vec![stale], &[Post::new(1, 1, "fresh")]);
        assert_eq!(titles(&joined[0]), vec!["fresh"]);
    }

    #[test]
    fn matches_keys_exactly_rather_than_textually() {
        let users = vec![User::new(UserKey::from("1"), "Text key")];
        let joined = join(users, &[Post::new(1, 1, "numeric owner")]);
        assert_eq!(joined[0].posts, Some(Vec::new()));
    }

    #[test]
    fn is_deterministic() {
        let users = vec![User::new(1, "Ann"), User::new(2, "Bo")];
        let posts = vec![Post::new(1, 2, "x"), Post::new(2, 1, "y")];
        assert_eq!(join(users.clone(), &posts), join(users, &posts));
    }
}
