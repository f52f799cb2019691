//! JSON encoding of the cached collection.

use crate::domain::User;
use crate::domain::ports::CacheStoreError;

pub(super) fn encode(users: &[User]) -> Result<String, CacheStoreError> {
    serde_json::to_string(users).map_err(|error| CacheStoreError::serialization(error.to_string()))
}

pub(super) fn decode(raw: &str) -> Result<Vec<User>, CacheStoreError> {
    serde_json::from_str(raw).map_err(|error| CacheStoreError::serialization(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, join};
    use serde_json::json;

    #[test]
    fn round_trips_joined_users_with_extra_fields() {
        let mut user = User::new(1, "Leanne").with_username("Bret");
        user.extra.insert("email".to_owned(), json!("Sincere@april.biz"));
        let mut post = Post::new(10, 1, "sunt aut facere");
        post.extra.insert("body".to_owned(), json!("quia et suscipit"));
        let users = join(vec![user, User::new("Ann1700000000000", "Ann")], &[post]);

        let first = decode(&encode(&users).expect("encode")).expect("decode");
        let second = decode(&encode(&first).expect("encode")).expect("decode");

        assert_eq!(first, users);
        assert_eq!(second, users);
    }

    #[test]
    fn layout_is_a_plain_user_array() {
        let users = join(vec![User::new(1, "Leanne")], &[Post::new(10, 1, "t")]);
        let value: serde_json::Value =
            serde_json::from_str(&encode(&users).expect("encode")).expect("json");
        assert_eq!(
            value,
            json!([{ "id": 1, "name": "Leanne", "posts": [{ "id": 10, "userId": 1, "title": "t" }] }])
        );
    }

    #[test]
    fn malformed_text_is_a_serialization_error() {
        let error = decode("{not json").expect_err("decode fails");
        assert!(matches!(error, CacheStoreError::Serialization { .. }));
    }
}
