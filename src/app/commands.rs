//! Command handlers - business logic for processing UI events

use crate::app::state::{AuthForm, BackendStatus, Composer, FeedState};
use crate::app::AppState;
use crate::messages::ui_events::{ComposerField, InputMode, Screen, View};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ArticleDraft, Credentials};

impl AppState {
    // ========================
    // Startup / session
    // ========================

    /// Commands to issue once the actor starts: health probe, rates, and
    /// the feed when a stored session was restored.
    pub fn startup(&mut self) -> Vec<NetworkCommand> {
        let mut cmds = vec![self.ping()];
        cmds.extend(self.on_session_changed());
        cmds
    }

    pub fn ping(&mut self) -> NetworkCommand {
        NetworkCommand::Ping { id: self.next_id() }
    }

    /// Loads that follow every token change: the feed while signed in,
    /// the rates regardless.
    fn on_session_changed(&mut self) -> Vec<NetworkCommand> {
        let mut cmds = Vec::new();
        cmds.extend(self.load_feed());
        cmds.push(self.load_rates());
        cmds
    }

    fn start_session(&mut self, token: String) -> Vec<NetworkCommand> {
        self.session.set(Some(token));
        self.auth = AuthForm {
            mode: self.auth.mode,
            username: std::mem::take(&mut self.auth.username),
            ..AuthForm::default()
        };
        self.view = View::Feed;
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
        tracing::info!("signed in");
        self.on_session_changed()
    }

    /// Drop the session and everything that belonged to it
    pub fn logout(&mut self) -> Vec<NetworkCommand> {
        self.session.clear();
        self.feed = FeedState::default();
        self.composer = Composer::default();
        self.input_mode = InputMode::Normal;
        self.view = View::Feed;
        self.cursor_position = self.current_input().len();
        tracing::info!("signed out");
        self.on_session_changed()
    }

    // ========================
    // Navigation
    // ========================

    pub fn switch_view(&mut self, view: View) {
        self.view = view;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_view(&mut self) {
        self.switch_view(self.view.toggle());
    }

    pub fn select_prev(&mut self) {
        match self.view {
            View::Feed => self.feed.selected = self.feed.selected.saturating_sub(1),
            View::Rates => self.rates.selected = self.rates.selected.saturating_sub(1),
        }
    }

    pub fn select_next(&mut self) {
        match self.view {
            View::Feed => {
                if self.feed.selected + 1 < self.feed.articles.len() {
                    self.feed.selected += 1;
                }
            }
            View::Rates => {
                if self.rates.selected + 1 < self.rates.rates.len() {
                    self.rates.selected += 1;
                }
            }
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_composing(&mut self) {
        if self.screen() != Screen::Main {
            return;
        }
        self.view = View::Feed;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        match self.screen() {
            Screen::Auth => self.auth.field = self.auth.field.next(),
            Screen::Main => self.composer.field = self.composer.field.next(),
        }
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        match self.screen() {
            // Two fields, so prev == next
            Screen::Auth => self.auth.field = self.auth.field.next(),
            Screen::Main => self.composer.field = self.composer.field.prev(),
        }
        self.cursor_position = self.current_input().len();
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if !self.is_typing() {
            return;
        }
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if !self.is_typing() || self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.cursor_position = prev_pos;
    }

    /// Enter key: submit auth, or walk the composer fields and post from the last one
    pub fn confirm(&mut self) -> Option<NetworkCommand> {
        match self.screen() {
            Screen::Auth => self.submit_auth(),
            Screen::Main => match self.composer.field {
                ComposerField::Author => self.submit_post(),
                _ => {
                    self.next_field();
                    None
                }
            },
        }
    }

    // ========================
    // Auth
    // ========================

    pub fn toggle_auth_mode(&mut self) {
        self.auth.mode = self.auth.mode.toggle();
        self.auth.error = None;
    }

    pub fn submit_auth(&mut self) -> Option<NetworkCommand> {
        if self.auth.loading || self.session.is_authenticated() {
            return None;
        }
        self.auth.loading = true;
        self.auth.error = None;

        Some(NetworkCommand::Authenticate {
            id: self.next_id(),
            mode: self.auth.mode,
            credentials: Credentials::new(self.auth.username.clone(), self.auth.password.clone()),
        })
    }

    // ========================
    // Feed
    // ========================

    /// Fetch the article list; no-op without a session or while a load is pending
    pub fn load_feed(&mut self) -> Option<NetworkCommand> {
        if !self.session.is_authenticated() || self.feed.pending.is_some() {
            return None;
        }
        let id = self.next_id();
        self.feed.pending = Some(id);
        self.feed.loading = true;
        self.feed.error = None;
        Some(NetworkCommand::LoadFeed { id })
    }

    pub fn load_rates(&mut self) -> NetworkCommand {
        self.rates.loading = true;
        self.rates.error = None;
        NetworkCommand::LoadRates { id: self.next_id() }
    }

    /// Manual refresh of everything on screen
    pub fn reload(&mut self) -> Vec<NetworkCommand> {
        let mut cmds = vec![self.ping()];
        cmds.extend(self.on_session_changed());
        cmds
    }

    /// Post the composer contents.
    ///
    /// Blank fields (after trimming) block submission without touching the form.
    pub fn submit_post(&mut self) -> Option<NetworkCommand> {
        if self.composer.posting || !self.session.is_authenticated() {
            return None;
        }
        let draft = ArticleDraft::from_input(
            &self.composer.title,
            &self.composer.content,
            &self.composer.author,
        )?;
        self.composer.posting = true;
        Some(NetworkCommand::CreateArticle {
            id: self.next_id(),
            draft,
        })
    }

    pub fn like_selected(&mut self) -> Option<NetworkCommand> {
        if !self.session.is_authenticated() {
            return None;
        }
        let article_id = self.feed.selected_article()?.id;
        Some(NetworkCommand::LikeArticle {
            id: self.next_id(),
            article_id,
        })
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ========================
    // Response handling
    // ========================

    /// Fold a network result into state; may return follow-up commands
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        match response {
            NetworkResponse::Authenticated { result, .. } => {
                self.auth.loading = false;
                match result {
                    Ok(token) if !token.trim().is_empty() => return self.start_session(token),
                    Ok(_) => self.auth.error = Some("Server returned an empty token".to_string()),
                    Err(e) => self.auth.error = Some(e.to_string()),
                }
            }
            NetworkResponse::FeedLoaded { id, result } => {
                if self.feed.pending != Some(id) {
                    tracing::debug!(id, "ignoring stale feed result");
                    return Vec::new();
                }
                self.feed.pending = None;
                self.feed.loading = false;
                match result {
                    Ok(snapshot) => {
                        self.feed.articles = snapshot.articles;
                        self.feed.likes = snapshot.tally.likes;
                        self.feed.failed_likes = snapshot.tally.failed;
                        let last = self.feed.articles.len().saturating_sub(1);
                        self.feed.selected = self.feed.selected.min(last);
                    }
                    Err(e) if e.is_unauthorized() => {
                        tracing::warn!(error = %e, "session rejected while loading feed");
                        return self.logout();
                    }
                    Err(e) => self.feed.error = Some(e.to_string()),
                }
            }
            NetworkResponse::RatesLoaded { result, .. } => {
                self.rates.loading = false;
                match result {
                    Ok(rates) => {
                        let last = rates.len().saturating_sub(1);
                        self.rates.rates = rates;
                        self.rates.selected = self.rates.selected.min(last);
                    }
                    Err(e) => self.rates.error = Some(e.to_string()),
                }
            }
            NetworkResponse::ArticleCreated { result, .. } => {
                self.composer.posting = false;
                match result {
                    Ok(article) => {
                        if self.session.is_authenticated() {
                            self.feed.articles.insert(0, article);
                            self.feed.selected = 0;
                        }
                        self.composer = Composer::default();
                        self.input_mode = InputMode::Normal;
                        self.cursor_position = 0;
                    }
                    Err(e) => self.alert = Some(format!("Post failed: {}", e)),
                }
            }
            NetworkResponse::ArticleLiked {
                article_id, result, ..
            } => match result {
                Ok(count) => {
                    self.feed.failed_likes.remove(&article_id);
                    self.feed.likes.insert(article_id, count);
                }
                Err(e) => self.alert = Some(format!("Like failed: {}", e)),
            },
            NetworkResponse::Pong { result, .. } => {
                self.backend = match result {
                    Ok(_) => BackendStatus::Online,
                    Err(e) => BackendStatus::Offline(e.to_string()),
                };
            }
        }
        Vec::new()
    }
}
