use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// Client network address used for ratelimit accounting
///
/// First entry of `X-Forwarded-For` when present, otherwise the peer
/// socket address, otherwise the `unknown` sentinel. IPv4-mapped IPv6
/// prefixes are stripped so the same client always yields the same key.
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("X-Forwarded-For")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        let ip = match ip.strip_prefix("::ffff:") {
            Some(mapped) => mapped.to_string(),
            None => ip,
        };

        Ok(ClientIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::extract::{ConnectInfo, FromRequestParts};
    use axum::http::Request;

    use super::ClientIp;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        ip
    }

    #[tokio::test]
    async fn forwarded_header_takes_precedence() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
            .body(())
            .unwrap();

        assert_eq!(extract(request).await, "203.0.113.9");
    }

    #[tokio::test]
    async fn falls_back_to_peer_address_then_sentinel() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("198.51.100.1:4000".parse().unwrap()));
        assert_eq!(extract(request).await, "198.51.100.1");

        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, "unknown");
    }

    #[tokio::test]
    async fn strips_ipv4_mapped_prefix_only_at_the_start() {
        let request = Request::builder()
            .header("X-Forwarded-For", "::ffff:203.0.113.9")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "203.0.113.9");

        // A mapped-looking sequence mid-value is left untouched
        let request = Request::builder()
            .header("X-Forwarded-For", "2001:db8::ffff:1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "2001:db8::ffff:1");
    }
}
