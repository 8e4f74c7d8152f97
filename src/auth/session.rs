//! Session construction and form login
//!
//! The platform guards profile pages behind a session cookie. A session
//! comes either from a cookie the operator captured in a browser, or from
//! the platform's form login: fetch the login page, lift the hidden
//! `logintoken` field, post the form, and keep whatever cookies the
//! server set along the way.

use crate::auth::Credentials;
use crate::config::TargetConfig;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Per-request timeout applied to every call through a session
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Marker string the platform embeds in the login page on a failed attempt
const LOGIN_FAILURE_MARKER: &str = "loginerrormessage";

/// Errors raised while establishing an authenticated session
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error during login: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Login endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Login page has no login token field")]
    MissingToken,

    #[error("Login rejected for '{username}': check the account name and password")]
    Rejected { username: String },

    #[error("Invalid session cookie: {0}")]
    InvalidCookie(String),
}

/// An authenticated browsing session
///
/// Wraps the cookie-bearing HTTP client that every scan worker shares.
/// Constructed once before the scan starts and never mutated afterwards;
/// clone it freely, clones share the underlying connection pool and
/// cookie store.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Builds a session from a pre-captured `Cookie` header value
    ///
    /// No request is made; the cookie is attached verbatim to every
    /// subsequent request.
    ///
    /// # Arguments
    ///
    /// * `target` - Target platform settings (user agent)
    /// * `cookie` - Raw `Cookie` header value, e.g. `"MoodleSession=..."`
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Client carrying the cookie
    /// * `Err(AuthError)` - The cookie is not a valid header value
    pub fn with_cookie(target: &TargetConfig, cookie: &str) -> Result<Self, AuthError> {
        let mut value = HeaderValue::from_str(cookie)
            .map_err(|e| AuthError::InvalidCookie(e.to_string()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value);

        let client = session_client_builder(target)
            .default_headers(headers)
            .build()?;

        debug!("Session built from pre-captured cookie");
        Ok(Session { client })
    }

    /// The HTTP client backing this session
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Logs in with the given credentials and returns the session
///
/// # Login Flow
///
/// 1. GET the login page and extract the hidden `logintoken` input
/// 2. POST the username, secret, and token as a form
/// 3. Inspect the final page: the platform answers a failed login with
///    a page containing the failure marker rather than an error status
///
/// One attempt per call; a rejected login is final.
///
/// # Arguments
///
/// * `target` - Target platform settings (base URL, user agent)
/// * `credentials` - Account name and secret
///
/// # Returns
///
/// * `Ok(Session)` - Login accepted, cookies captured
/// * `Err(AuthError)` - Transport failure, missing token, or rejection
pub async fn login(target: &TargetConfig, credentials: &Credentials) -> Result<Session, AuthError> {
    let client = session_client_builder(target).cookie_store(true).build()?;
    let login_url = target.login_url();

    debug!(url = %login_url, "Fetching login page");
    let response = client.get(&login_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let token = extract_login_token(&body).ok_or(AuthError::MissingToken)?;

    let form = [
        ("username", credentials.username.as_str()),
        ("password", credentials.secret()),
        ("logintoken", token.as_str()),
    ];

    debug!(username = %credentials.username, "Submitting login form");
    let response = client.post(&login_url).form(&form).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    if body.contains(LOGIN_FAILURE_MARKER) {
        return Err(AuthError::Rejected {
            username: credentials.username.clone(),
        });
    }

    info!(username = %credentials.username, "Login accepted");
    Ok(Session { client })
}

/// Client builder shared by both session modes
///
/// Redirects stay enabled: the platform answers a successful login POST
/// with a redirect to the landing page.
fn session_client_builder(target: &TargetConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(&target.user_agent)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
}

/// Extracts the hidden login token from the login page HTML
fn extract_login_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[name="logintoken"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
}
