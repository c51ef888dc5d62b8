//! Token utilities
//!
//! Tokens are the unique part of a registration link, shaped like a version 4 UUID

use rand_core::OsRng;
use rand_core::RngCore;
use rand_core::TryRngCore;
use url::Url;
use uuid::Builder;

/// Name of the query parameter carrying the token in a link
pub const TOKEN_QUERY_PARAMETER: &str = "token";

/// Generate a new token
///
/// 16 bytes from the OS random source, with the version nibble set to `4` and the variant
/// nibble to one of `8`, `9`, `a` or `b`
pub fn generate() -> String {
    Builder::from_random_bytes(random_bytes())
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Generate a secret without dashes, used when no API token is configured
pub fn generate_secret() -> String {
    let first = Builder::from_random_bytes(random_bytes()).into_uuid();
    let second = Builder::from_random_bytes(random_bytes()).into_uuid();

    format!("{}{}", first.simple(), second.simple())
}

/// Extract the token from a full link
///
/// The link has to be a valid URL with a non-empty `token` query parameter
pub fn extract_token(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == TOKEN_QUERY_PARAMETER)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn random_bytes() -> [u8; 16] {
    let mut bytes = [0_u8; 16];
    OsRng.unwrap_err().fill_bytes(&mut bytes);
    bytes
}

/// Lowercase hyphenated UUID v4 shape, used by the tests
#[cfg(test)]
pub(crate) fn is_token_shaped(token: &str) -> bool {
    let groups = token.split('-').collect::<Vec<_>>();
    let lengths = groups.iter().map(|group| group.len()).collect::<Vec<_>>();

    lengths == [8, 4, 4, 4, 12]
        && token
            .chars()
            .all(|ch| ch == '-' || ch.is_ascii_digit() || ('a'..='f').contains(&ch))
        && groups[2].starts_with('4')
        && groups[3].starts_with(['8', '9', 'a', 'b'])
}
