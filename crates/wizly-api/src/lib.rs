// wizly-api: Async Rust client for the WiZ bulb backend

pub mod bulbs;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use bulbs::BROADCAST_ADDRESS;
pub use client::BulbClient;
pub use error::Error;
pub use models::{BulbRecord, BulbsResponse};
pub use transport::TransportConfig;
