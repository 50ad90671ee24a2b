/*
 * Responsibility
 * - `Authorization: Bearer <token>` からトークン文字列だけを取り出す
 * - I/O なし、検証なし (署名検証は access_jwt 側)
 */
use axum::http::{HeaderMap, header};

use super::error::AuthError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw bearer credential out of the request headers.
///
/// Header name lookup is case-insensitive; the `Bearer ` prefix is not.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();

    let value = values.next().ok_or(AuthError::NoAuthorization)?;
    // Two credentials on one request is ambiguous; refuse rather than pick one.
    if values.next().is_some() {
        return Err(AuthError::MalformedAuthorization);
    }

    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedAuthorization),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn returns_token_after_prefix() {
        let map = headers(&["Bearer abc.def.ghi"]);
        assert_eq!(extract_bearer(&map), Ok("abc.def.ghi"));
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let mut map = HeaderMap::new();
        map.insert("AUTHORIZATION", HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_bearer(&map), Ok("tok"));
    }

    #[test]
    fn missing_header_is_no_authorization() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::NoAuthorization)
        );
    }

    #[test]
    fn wrong_scheme_or_shape_is_malformed() {
        for raw in [
            "Basic dXNlcjpwYXNz",
            "bearer tok",
            "BEARER tok",
            "Bearertok",
            "Bearer",
            "Bearer ",
            "tok",
        ] {
            assert_eq!(
                extract_bearer(&headers(&[raw])),
                Err(AuthError::MalformedAuthorization),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn duplicate_headers_are_malformed() {
        let map = headers(&["Bearer one", "Bearer two"]);
        assert_eq!(extract_bearer(&map), Err(AuthError::MalformedAuthorization));
    }

    #[test]
    fn non_ascii_value_is_malformed() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(extract_bearer(&map), Err(AuthError::MalformedAuthorization));
    }
}
