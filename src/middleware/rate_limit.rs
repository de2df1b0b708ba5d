//! Sliding-window, in-memory rate limiting for endpoints that call out to paid APIs.
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window_secs: u64) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
            trust_forwarded_for: false,
        }
    }

    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, 60)
    }

    /// Key clients on `X-Forwarded-For` instead of the socket peer. Only safe
    /// behind a reverse proxy that overwrites the header.
    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Records the request and returns whether it fits in the window.
    pub async fn check(&self, identifier: &str) -> bool {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        let history = requests.entry(identifier.to_string()).or_default();
        history.retain(|&t| now.duration_since(t) < self.window);

        if history.len() < self.max_requests {
            history.push(now);
            true
        } else {
            false
        }
    }

    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        requests.retain(|_, history| {
            history.retain(|&t| now.duration_since(t) < self.window);
            !history.is_empty()
        });

        tracing::debug!("Rate limiter cleanup: {} active clients", requests.len());
    }
}

/// Client key: the socket peer, or a shared bucket when it is unknown. The first
/// `X-Forwarded-For` hop is used only when the proxy is trusted.
fn client_key(request: &Request<Body>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request, limiter.trust_forwarded_for);

    if !limiter.check(&client).await {
        tracing::warn!("Rate limit exceeded for client: {}", client);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter() {
        let limiter = RateLimiter::new(3, 60);

        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_cleanup() {
        let limiter = RateLimiter::new(5, 1);

        limiter.check("ip1").await;
        limiter.check("ip2").await;

        tokio::time::sleep(Duration::from_millis(1100)).await;
        limiter.cleanup().await;

        let requests = limiter.requests.read().await;
        assert_eq!(requests.len(), 0);
    }

    fn request_from(peer: [u8; 4], forwarded: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((peer, 4000))));
        request
    }

    #[test]
    fn client_key_uses_socket_peer_by_default() {
        let request = request_from([192, 168, 1, 9], Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_key(&request, false), "192.168.1.9");

        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&request, false), "unknown");
    }

    #[test]
    fn client_key_reads_forwarded_header_from_trusted_proxy() {
        let request = request_from([10, 0, 0, 2], Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_key(&request, true), "203.0.113.7");

        let request = request_from([10, 0, 0, 2], Some("  "));
        assert_eq!(client_key(&request, true), "10.0.0.2");
    }

    #[tokio::test]
    async fn spoofed_forwarded_header_shares_the_peer_bucket() {
        let limiter = RateLimiter::new(2, 60);
        let mut allowed = 0;
        for i in 0..10 {
            let forwarded = format!("10.0.0.{i}");
            let request = request_from([198, 51, 100, 4], Some(&forwarded));
            if limiter
                .check(&client_key(&request, limiter.trust_forwarded_for))
                .await
            {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 2);
    }
}
