//! Client origin extractor for rate limiting.
//!
//! Takes the first entry of `x-forwarded-for`, falling back to a loopback
//! sentinel when the header is absent. This trusts the network edge to set
//! the header honestly - it is not spoof-proof, and the rate limiter keyed
//! on it is best-effort by the same measure.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Origin key used when no forwarded address is present
pub const LOOPBACK_SENTINEL: &str = "127.0.0.1";

/// The request's origin key for rate limiting
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let origin = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(LOOPBACK_SENTINEL)
            .to_string();

        Ok(Self(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> String {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("x-forwarded-for", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        let ClientIp(origin) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        origin
    }

    #[tokio::test]
    async fn test_first_forwarded_entry_wins() {
        assert_eq!(extract(Some("203.0.113.7, 10.0.0.1")).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_missing_header_falls_back_to_loopback() {
        assert_eq!(extract(None).await, LOOPBACK_SENTINEL);
    }

    #[tokio::test]
    async fn test_empty_header_falls_back_to_loopback() {
        assert_eq!(extract(Some("")).await, LOOPBACK_SENTINEL);
    }
}
