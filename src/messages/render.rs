//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{AuthForm, BackendStatus, Composer};
use crate::messages::ui_events::{InputMode, Screen, View};
use crate::models::{Article, ExchangeRate};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Navigation
    pub screen: Screen,
    pub view: View,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Auth screen
    pub auth: AuthForm,

    // Feed
    pub composer: Composer,
    pub articles: Vec<Article>,
    /// One label per article, same order
    pub like_labels: Vec<String>,
    pub feed_loading: bool,
    pub feed_error: Option<String>,
    pub selected_article: usize,

    // Rates
    pub rates: Vec<ExchangeRate>,
    pub rates_loading: bool,
    pub rates_error: Option<String>,
    pub selected_rate: usize,

    pub backend: BackendStatus,

    // Popups
    pub alert: Option<String>,
    pub show_help: bool,
}
