pub mod handlers;
pub mod metrics;
