//! Network layer - typed calls against the timeline backend
//!
//! The Network actor receives commands from the App layer and sends back responses.

pub mod actor;
pub mod client;
pub mod error;
pub mod feed;

pub use actor::NetworkActor;
pub use client::ApiClient;
pub use error::ApiError;
pub use feed::{load_feed, FeedSnapshot, LikeTally};
