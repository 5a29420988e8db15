//! App state - pure data structure with no I/O logic

use std::collections::{BTreeSet, HashMap};

use crate::constants::NO_LIKES_YET;
use crate::messages::ui_events::{AuthField, ComposerField, InputMode, Screen, View};
use crate::messages::RenderState;
use crate::models::{Article, ArticleId, AuthMode, ExchangeRate};
use crate::session::SessionStore;

/// Login / register form
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub field: AuthField,
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

/// New-article composer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composer {
    pub field: ComposerField,
    pub title: String,
    pub content: String,
    pub author: String,
    pub posting: bool,
}

/// Article list with its like counts
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub articles: Vec<Article>,
    pub likes: HashMap<ArticleId, String>,
    /// Articles whose like count could not be fetched on the last load
    pub failed_likes: BTreeSet<ArticleId>,
    /// Request id of the load in flight; results for other ids are stale
    pub pending: Option<u64>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
}

impl FeedState {
    /// "N likes", or the placeholder when the count is unknown
    pub fn like_label(&self, id: ArticleId) -> String {
        match self.likes.get(&id) {
            Some(count) if !count.is_empty() => format!("{} likes", count),
            _ => NO_LIKES_YET.to_string(),
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RatesState {
    pub rates: Vec<ExchangeRate>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
}

/// Result of the last `/ping`
#[derive(Clone, Debug, Default, PartialEq)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline(String),
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub session: SessionStore,

    // Navigation
    pub view: View,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    pub auth: AuthForm,
    pub composer: Composer,
    pub feed: FeedState,
    pub rates: RatesState,
    pub backend: BackendStatus,

    // Popups
    pub alert: Option<String>,
    pub show_help: bool,

    pub next_request_id: u64,
}

impl AppState {
    pub fn new(session: SessionStore) -> Self {
        AppState {
            session,
            view: View::Feed,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            auth: AuthForm::default(),
            composer: Composer::default(),
            feed: FeedState::default(),
            rates: RatesState::default(),
            backend: BackendStatus::Unknown,
            alert: None,
            show_help: false,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// The feed is only reachable with a session
    pub fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::Main
        } else {
            Screen::Auth
        }
    }

    /// Get the field currently receiving keystrokes
    pub fn current_input(&self) -> &str {
        match self.screen() {
            Screen::Auth => match self.auth.field {
                AuthField::Username => &self.auth.username,
                AuthField::Password => &self.auth.password,
            },
            Screen::Main => match self.composer.field {
                ComposerField::Title => &self.composer.title,
                ComposerField::Content => &self.composer.content,
                ComposerField::Author => &self.composer.author,
            },
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.screen() {
            Screen::Auth => match self.auth.field {
                AuthField::Username => &mut self.auth.username,
                AuthField::Password => &mut self.auth.password,
            },
            Screen::Main => match self.composer.field {
                ComposerField::Title => &mut self.composer.title,
                ComposerField::Content => &mut self.composer.content,
                ComposerField::Author => &mut self.composer.author,
            },
        }
    }

    /// Whether keystrokes go into a text field
    pub fn is_typing(&self) -> bool {
        self.screen() == Screen::Auth || self.input_mode == InputMode::Editing
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let like_labels = self
            .feed
            .articles
            .iter()
            .map(|a| self.feed.like_label(a.id))
            .collect();

        RenderState {
            screen: self.screen(),
            view: self.view,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            auth: self.auth.clone(),
            composer: self.composer.clone(),
            articles: self.feed.articles.clone(),
            like_labels,
            feed_loading: self.feed.loading,
            feed_error: self.feed.error.clone(),
            selected_article: self.feed.selected,
            rates: self.rates.rates.clone(),
            rates_loading: self.rates.loading,
            rates_error: self.rates.error.clone(),
            selected_rate: self.rates.selected,
            backend: self.backend.clone(),
            alert: self.alert.clone(),
            show_help: self.show_help,
        }
    }
}
