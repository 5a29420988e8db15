//! # Timeline TUI
//!
//! A terminal client for the Exchange Timeline service.
//!
//! ## Features
//! - Login / register against the timeline backend
//! - Home timeline with like counts, posting and liking
//! - Exchange rate list
//! - Session token persisted between runs
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine, sole writer of the session)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use models::{Article, ArticleDraft, AuthMode, Credentials, ExchangeRate};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, ApiError, NetworkActor};
pub use session::SessionStore;
