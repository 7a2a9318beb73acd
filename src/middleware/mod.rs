pub mod auth;
pub mod rate_limit;

pub use rate_limit::{client_address, rate_limit, RateLimiter};
