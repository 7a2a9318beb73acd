//! Fixed-window request limiting per client address.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpResponse,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Above this many tracked clients, expired windows are dropped on the next check.
const PRUNE_THRESHOLD: usize = 10_000;

struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        let mut clients = match self.clients.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if clients.len() > PRUNE_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = clients.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            return RateDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - entry.count,
        }
    }
}

/// IP of the socket peer; forwarding headers are ignored.
pub fn client_address(peer: Option<SocketAddr>) -> String {
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// `from_fn` middleware applying the `RateLimiter` registered as app data.
pub async fn rate_limit<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let decision = req.app_data::<web::Data<RateLimiter>>().map(|limiter| {
        limiter.check(&client_address(req.peer_addr()))
    });

    if let Some(RateDecision::Limited { retry_after }) = decision {
        tracing::warn!("Rate limit exceeded for {}", req.path());
        let response = HttpResponse::TooManyRequests()
            .insert_header(("Retry-After", retry_after.as_secs().max(1).to_string()))
            .json(json!({
                "success": false,
                "message": "Too many requests, please try again later",
                "errors": null
            }));
        return Ok(req.into_response(response).map_into_right_body());
    }

    Ok(next.call(req).await?.map_into_left_body())
}
