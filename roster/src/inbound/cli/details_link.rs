//! Resolve a `details` target to a user key.
//!
//! Targets are either a bare key (`3`, `Ann1700000000000`) or a details link
//! carrying the key in its `uid` query parameter, absolute
//! (`http://host/details.html?uid=3`) or relative (`details.html?uid=3`).

use url::Url;

use crate::domain::UserKey;

const LINK_BASE: &str = "http://localhost/";

/// Why a target could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailsTargetError {
    /// The target was blank.
    #[error("a user key or details link is required")]
    Empty,
    /// A link was given without a `uid` query parameter.
    #[error("details link has no uid parameter: {link}")]
    MissingUid {
        /// The link as given.
        link: String,
    },
}

/// Resolve `target` to the key it addresses.
///
/// # Errors
///
/// Returns [`DetailsTargetError`] when the target is blank or is a link
/// without a non-empty `uid` parameter.
///
/// # Examples
/// ```
/// use roster::domain::UserKey;
/// use roster::inbound::cli::resolve_details_target;
///
/// assert_eq!(resolve_details_target("details.html?uid=3"), Ok(UserKey::Number(3)));
/// assert_eq!(resolve_details_target("Ann17"), Ok(UserKey::from("Ann17")));
/// ```
pub fn resolve_details_target(target: &str) -> Result<UserKey, DetailsTargetError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(DetailsTargetError::Empty);
    }
    if !looks_like_link(target) {
        return Ok(UserKey::parse(target));
    }

    let missing = || DetailsTargetError::MissingUid {
        link: target.to_owned(),
    };
    let link = Url::parse(target)
        .or_else(|_| Url::parse(LINK_BASE).and_then(|base| base.join(target)))
        .map_err(|_| missing())?;
    link.query_pairs()
        .find(|(name, _)| name == "uid")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(|value| UserKey::parse(&value))
        .ok_or_else(missing)
}

fn looks_like_link(target: &str) -> bool {
    target.contains('?') || target.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare_number("3", UserKey::Number(3))]
    #[case::bare_text("Ann1700000000000", UserKey::from("Ann1700000000000"))]
    #[case::relative("details.html?uid=7", UserKey::Number(7))]
    #[case::absolute("https://example.com/app/details.html?uid=Ann12", UserKey::from("Ann12"))]
    #[case::encoded("details.html?from=list&uid=Ann%20Lee1", UserKey::from("Ann Lee1"))]
    #[case::padded("  details.html?uid=2  ", UserKey::Number(2))]
    fn resolves_keys_and_links(#[case] target: &str, #[case] expected: UserKey) {
        assert_eq!(resolve_details_target(target), Ok(expected));
    }

    #[rstest]
    #[case("details.html?name=Ann")]
    #[case("details.html?uid=")]
    fn links_without_uid_are_rejected(#[case] target: &str) {
        assert!(matches!(
            resolve_details_target(target),
            Err(DetailsTargetError::MissingUid { .. })
        ));
    }

    #[test]
    fn blank_targets_are_rejected() {
        assert_eq!(resolve_details_target("   "), Err(DetailsTargetError::Empty));
    }
}
