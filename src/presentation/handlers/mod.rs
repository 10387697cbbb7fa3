pub mod document_handler;
pub mod user_handler;

use axum::http::{HeaderMap, header};

use crate::domain::{error::DomainError, models::user::UserId, services::token_service::TokenService};

/// helper function that extract the bearer token from headers
fn bearer_token(headers: &HeaderMap) -> Result<&str, DomainError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(DomainError::InvalidToken)
}

/// Resolve the caller of a protected route from its bearer token
fn authenticate<T: TokenService>(token_service: &T, headers: &HeaderMap) -> Result<UserId, DomainError> {
    token_service.authenticate(bearer_token(headers)?)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("Bearer abc.def"), Some("abc.def"))]
    #[case(Some("Bearer   "), None)]
    #[case(Some("Basic abc"), None)]
    #[case(None, None)]
    fn test_bearer_token(#[case] header_value: Option<&str>, #[case] expected: Option<&str>) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header_value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        assert_eq!(bearer_token(&headers).ok(), expected);
    }
}
