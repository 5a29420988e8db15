//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend used when neither the config file nor the environment names one
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Directory under `$HOME` holding config, session and log files
pub const CONFIG_DIR_NAME: &str = ".timeline";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const SESSION_FILE_NAME: &str = "session";

pub const LOG_FILE_NAME: &str = "timeline.log";

/// Environment overrides
pub const ENV_API_BASE: &str = "TIMELINE_API_BASE";
pub const ENV_SESSION_FILE: &str = "TIMELINE_SESSION_FILE";
pub const ENV_LOG_DIR: &str = "TIMELINE_LOG_DIR";

/// Author label for posts without a name
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Shown next to an article whose like count is unknown or zero
pub const NO_LIKES_YET: &str = "no likes yet";

/// Application name
pub const APP_NAME: &str = "Exchange Timeline";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
