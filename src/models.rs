use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Article id as issued by the backend
pub type ArticleId = u64;

/// A timeline post
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Server-computed like count, when the backend denormalizes it
    #[serde(default)]
    pub likes: Option<u64>,
}

impl Article {
    /// Name shown above the post; blank authors render as anonymous
    pub fn display_author(&self) -> &str {
        match self.author.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => crate::constants::ANONYMOUS_AUTHOR,
        }
    }
}

/// Body for `POST /api/articles`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl ArticleDraft {
    /// Build a draft from raw composer input.
    ///
    /// Every field is trimmed and all three are required; returns `None`
    /// when any of them ends up empty.
    pub fn from_input(title: &str, content: &str, author: &str) -> Option<Self> {
        let (title, content, author) = (title.trim(), content.trim(), author.trim());
        if title.is_empty() || content.is_empty() || author.is_empty() {
            return None;
        }
        Some(ArticleDraft {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
        })
    }
}

/// A currency pair quote
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: u64,
    pub base_currency: String,
    pub target_currency: String,
    pub rate: f64,
    pub date: String,
}

impl ExchangeRate {
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base_currency, self.target_currency)
    }

    /// Quote date in local time, falling back to the raw string
    pub fn local_date(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.date) {
            Ok(dt) => dt
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// Login or register
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    pub fn toggle(&self) -> AuthMode {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AuthMode::Login => "/api/auth/login",
            AuthMode::Register => "/api/auth/register",
        }
    }
}

/// Body for the auth endpoints
#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keeps the password out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LikesResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub likes: String,
}

/// The likes endpoint documents a string but some deployments send a number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_all_fields_after_trim() {
        assert!(ArticleDraft::from_input("  ", "body", "me").is_none());
        assert!(ArticleDraft::from_input("title", "\n\t", "me").is_none());
        assert!(ArticleDraft::from_input("title", "body", "").is_none());

        let draft = ArticleDraft::from_input(" Hello ", " world\n", " ann ").unwrap();
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.content, "world");
        assert_eq!(draft.author, "ann");
    }

    #[test]
    fn test_article_optional_fields() {
        let json = r#"{"id": 7, "title": "t", "content": "c"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.author, None);
        assert_eq!(article.display_author(), crate::constants::ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_likes_accepts_string_or_number() {
        let s: LikesResponse = serde_json::from_str(r#"{"likes": "12"}"#).unwrap();
        assert_eq!(s.likes, "12");
        let n: LikesResponse = serde_json::from_str(r#"{"likes": 3}"#).unwrap();
        assert_eq!(n.likes, "3");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("ann", "hunter2");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("ann"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_rate_local_date_falls_back_to_raw() {
        let rate = ExchangeRate {
            id: 1,
            base_currency: "USD".into(),
            target_currency: "EUR".into(),
            rate: 0.92,
            date: "yesterday".into(),
        };
        assert_eq!(rate.local_date(), "yesterday");
        assert_eq!(rate.pair(), "USD/EUR");
    }
}
