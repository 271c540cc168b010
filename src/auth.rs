//! Mock authentication: a cookie-held token standing in for a session.
//!
//! Nothing here is cryptographically meaningful: the token is a base64
//! JWT look-alike and validation only checks its shape. The session state
//! is an explicit value (`AuthState`) owned by `CoreState`, not a global.

use std::collections::HashMap;

use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{ACCESS_TOKEN_COOKIE, LEGACY_TOKEN_COOKIE, TOKEN_LIFETIME_DAYS};

/// Display name given to sessions restored from a cookie or a plain login.
pub const DEFAULT_USER_NAME: &str = "테스트 사용자";
pub const LOADING_NOTICE: &str = "로딩 중...";

const MOCK_TOKEN_PREFIX: &str = "mock-jwt-token-";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Signup field is required: {0}")]
    MissingSignupField(&'static str),

    #[error("Token encoding failed: {0}")]
    TokenEncoding(#[from] serde_json::Error),
}

impl AuthError {
    /// Message shown on the login page.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingSignupField(_) => "회원가입에 실패했습니다.",
            Self::MissingCredentials | Self::TokenEncoding(_) => "로그인에 실패했습니다.",
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Cookies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires_in_days: i64,
    pub secure: bool,
    pub same_site: SameSite,
}

/// Minimal cookie storage the session needs.
pub trait CookieJar {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String, options: CookieOptions);
    fn remove(&mut self, name: &str);
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
    options: CookieOptions,
}

/// Process-lifetime cookie jar. Expired cookies read as absent.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieJar {
    cookies: HashMap<String, StoredCookie>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options a cookie was written with, if it is still live.
    pub fn options(&self, name: &str) -> Option<CookieOptions> {
        self.live(name).map(|c| c.options)
    }

    /// Write a raw cookie value, as an earlier visit would have left it.
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.set(
            name,
            value.to_string(),
            CookieOptions {
                expires_in_days: TOKEN_LIFETIME_DAYS,
                secure: false,
                same_site: SameSite::Strict,
            },
        );
        self
    }

    fn live(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies
            .get(name)
            .filter(|cookie| cookie.expires_at > Utc::now())
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.live(name).map(|c| c.value.clone())
    }

    fn set(&mut self, name: &str, value: String, options: CookieOptions) {
        let expires_at = Utc::now() + Duration::days(options.expires_in_days);
        self.cookies.insert(
            name.to_string(),
            StoredCookie {
                value,
                expires_at,
                options,
            },
        );
    }

    fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }
}

// ═══════════════════════════════════════════════════════════
// Tokens
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

#[derive(Serialize)]
struct TokenHeader<'a> {
    alg: &'a str,
    typ: &'a str,
}

/// Build an unsigned `header.payload.signature` token.
pub fn issue_mock_token(
    user_id: &str,
    username: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let engine = &base64::engine::general_purpose::STANDARD;

    let header = serde_json::to_vec(&TokenHeader {
        alg: "HS256",
        typ: "JWT",
    })?;
    let iat = issued_at.timestamp();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat,
        exp: iat + TOKEN_LIFETIME_DAYS * 24 * 60 * 60,
        jti: Uuid::new_v4(),
    };
    let payload = serde_json::to_vec(&claims)?;
    let signature = format!("mock-signature-{}", issued_at.timestamp_millis());

    Ok(format!(
        "{}.{}.{}",
        engine.encode(header),
        engine.encode(payload),
        engine.encode(signature)
    ))
}

/// Read the claims back out of a token from `issue_mock_token`.
pub fn decode_mock_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Shape check only: three dot-separated parts, or the legacy mock prefix.
pub fn is_plausible_token(token: &str) -> bool {
    token.split('.').count() == 3 || token.starts_with(MOCK_TOKEN_PREFIX)
}

// ═══════════════════════════════════════════════════════════
// Session state
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum AuthState {
    /// Cookies not yet inspected.
    Initializing,
    Anonymous,
    Authenticated(User),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl SignupForm {
    fn validate(&self) -> Result<(), AuthError> {
        for (field, value) in [
            ("username", &self.username),
            ("password", &self.password),
            ("name", &self.name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingSignupField(field));
            }
        }
        Ok(())
    }
}

/// Login state backed by a cookie jar.
pub struct AuthSession<J: CookieJar> {
    jar: J,
    state: AuthState,
    secure_cookies: bool,
}

impl<J: CookieJar> AuthSession<J> {
    /// A session that has not looked at its cookies yet.
    pub fn new(jar: J, secure_cookies: bool) -> Self {
        Self {
            jar,
            state: AuthState::Initializing,
            secure_cookies,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == AuthState::Initializing
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Leave `Initializing` by inspecting the stored token.
    ///
    /// A malformed token is discarded and the session becomes anonymous.
    pub fn restore(&mut self) -> &AuthState {
        let read = |name: &str| self.jar.get(name).filter(|t| !t.is_empty());
        let token = read(ACCESS_TOKEN_COOKIE).or_else(|| read(LEGACY_TOKEN_COOKIE));

        self.state = match token {
            Some(token) if is_plausible_token(&token) => {
                tracing::info!("Session restored from cookie");
                AuthState::Authenticated(User {
                    id: "1".into(),
                    name: DEFAULT_USER_NAME.into(),
                })
            }
            Some(_) => {
                tracing::warn!("Discarding malformed session token");
                self.clear_cookies();
                AuthState::Anonymous
            }
            None => AuthState::Anonymous,
        };
        &self.state
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        self.start_session("1", username.trim(), DEFAULT_USER_NAME)
    }

    pub fn signup(&mut self, form: &SignupForm) -> Result<User, AuthError> {
        form.validate()?;
        self.start_session("2", form.username.trim(), form.name.trim())
    }

    pub fn logout(&mut self) {
        self.clear_cookies();
        self.state = AuthState::Anonymous;
        tracing::info!("Logged out");
    }

    fn start_session(
        &mut self,
        user_id: &str,
        username: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        let token = issue_mock_token(user_id, username, Utc::now())?;
        self.jar.set(
            ACCESS_TOKEN_COOKIE,
            token,
            CookieOptions {
                expires_in_days: TOKEN_LIFETIME_DAYS,
                secure: self.secure_cookies,
                same_site: SameSite::Strict,
            },
        );
        self.jar.remove(LEGACY_TOKEN_COOKIE);

        tracing::info!(user_id, "Session started");
        let user = User {
            id: user_id.to_string(),
            name: display_name.to_string(),
        };
        self.state = AuthState::Authenticated(user.clone());
        Ok(user)
    }

    fn clear_cookies(&mut self) {
        self.jar.remove(ACCESS_TOKEN_COOKIE);
        self.jar.remove(LEGACY_TOKEN_COOKIE);
    }
}

// ═══════════════════════════════════════════════════════════
// Route gating
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Dashboard,
    Medication,
    MedicationHistory,
    Exercise,
    Diet,
    Chat,
}

impl Route {
    /// Resolve a path. Unknown paths fall back to the dashboard.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "/medication" => Self::Medication,
            "/medication/history" => Self::MedicationHistory,
            "/exercise" => Self::Exercise,
            "/diet" => Self::Diet,
            "/chat" => Self::Chat,
            _ => Self::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Medication => "/medication",
            Self::MedicationHistory => "/medication/history",
            Self::Exercise => "/exercise",
            Self::Diet => "/diet",
            Self::Chat => "/chat",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Loading,
    RedirectToLogin,
}

impl RouteDecision {
    /// Placeholder text while the session is still being resolved.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_NOTICE),
            Self::Render | Self::RedirectToLogin => None,
        }
    }

    /// Path the browser ends up on for a request to `route`.
    pub fn target(&self, route: Route) -> &'static str {
        match self {
            Self::RedirectToLogin => Route::Login.path(),
            Self::Render | Self::Loading => route.path(),
        }
    }
}

pub fn guard(route: Route, state: &AuthState) -> RouteDecision {
    if route.is_public() {
        return RouteDecision::Render;
    }
    match state {
        AuthState::Initializing => RouteDecision::Loading,
        AuthState::Anonymous => RouteDecision::RedirectToLogin,
        AuthState::Authenticated(_) => RouteDecision::Render,
    }
}
