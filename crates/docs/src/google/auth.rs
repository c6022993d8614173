//! Google OAuth for an installed application.
//!
//! Order of attempts: cached token, refresh with the cached refresh token,
//! then the loopback consent flow. The token cache is plain JSON written
//! with owner-only permissions.

use chrono::{DateTime, Duration, Utc};
use docgen_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use url::Url;
use uuid::Uuid;

/// Scopes requested during consent.
pub const SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/documents.readonly",
    "https://www.googleapis.com/auth/documents",
];

const EXPIRY_MARGIN_SECS: i64 = 60;
const MAX_REQUEST_BYTES: usize = 8192;

/// OAuth client settings from a Cloud console `credentials.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Deserialize)]
struct SecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Read the `installed` (or `web`) section of a client secret file.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::CredentialsMissing(format!(
                "{} not found. Download an OAuth client secret from \
                 https://console.cloud.google.com/ and place it there.",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let file: SecretsFile = serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Invalid client secret {}: {}", path.display(), e))
        })?;

        file.installed.or(file.web).ok_or_else(|| {
            AppError::Config(format!(
                "{} has neither an \"installed\" nor a \"web\" section",
                path.display()
            ))
        })
    }
}

/// A cached access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_at: DateTime<Utc>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl GoogleToken {
    /// Usable for at least another minute.
    pub fn is_valid(&self) -> bool {
        self.expires_at - Utc::now() > Duration::seconds(EXPIRY_MARGIN_SECS)
    }

    pub fn load(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!("Ignoring unreadable token cache {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("Saved token cache to {}", path.display());
        Ok(())
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    scope: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

impl TokenResponse {
    fn into_token(self, previous_refresh: Option<&str>) -> GoogleToken {
        GoogleToken {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string)),
            token_type: self.token_type,
            scope: self.scope,
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
        }
    }
}

/// Authorization code or error carried by the loopback redirect.
#[derive(Debug, PartialEq)]
pub(crate) enum Redirect {
    Code(String),
    Denied(String),
}

/// Parse the request line of the browser's redirect to the loopback server.
pub(crate) fn parse_redirect(request_line: &str, expected_state: &str) -> AppResult<Redirect> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| AppError::Storage("Malformed OAuth redirect".to_string()))?;
    let url = Url::parse("http://127.0.0.1")
        .and_then(|base| base.join(target))
        .map_err(|e| AppError::Storage(format!("Malformed OAuth redirect: {}", e)))?;

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Ok(Redirect::Denied(error));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(AppError::Storage(
            "OAuth state mismatch in redirect".to_string(),
        ));
    }
    code.map(Redirect::Code)
        .ok_or_else(|| AppError::Storage("OAuth redirect carried no code".to_string()))
}

/// Produces access tokens for the Docs and Drive APIs.
pub struct GoogleAuth {
    credentials_path: PathBuf,
    token_path: PathBuf,
    client: reqwest::Client,
}

impl GoogleAuth {
    pub fn new(credentials_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            token_path: token_path.into(),
            client: reqwest::Client::new(),
        }
    }

    /// A valid token, from cache, refresh, or interactive consent.
    pub async fn authenticate(&self) -> AppResult<GoogleToken> {
        let cached = GoogleToken::load(&self.token_path);

        if let Some(token) = &cached {
            if token.is_valid() {
                tracing::debug!("Using cached Google token");
                return Ok(token.clone());
            }
        }

        let secrets = ClientSecrets::load(&self.credentials_path)?;

        if let Some(refresh_token) = cached.as_ref().and_then(|t| t.refresh_token.as_deref()) {
            match self.refresh(&secrets, refresh_token).await {
                Ok(token) => {
                    self.persist(&token);
                    return Ok(token);
                }
                Err(e) => tracing::warn!("Error refreshing Google credentials: {}", e),
            }
        }

        let token = self.consent(&secrets).await?;
        self.persist(&token);
        Ok(token)
    }

    fn persist(&self, token: &GoogleToken) {
        if let Err(e) = token.save(&self.token_path) {
            tracing::warn!(
                "Could not write token cache {}: {}",
                self.token_path.display(),
                e
            );
        }
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(
        &self,
        secrets: &ClientSecrets,
        refresh_token: &str,
    ) -> AppResult<GoogleToken> {
        tracing::info!("Refreshing Google access token");

        let mut form = vec![
            ("client_id", secrets.client_id.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        if let Some(secret) = &secrets.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let response = self.post_token(&secrets.token_uri, &form).await?;
        Ok(response.into_token(Some(refresh_token)))
    }

    async fn exchange_code(
        &self,
        secrets: &ClientSecrets,
        code: &str,
        redirect_uri: &str,
    ) -> AppResult<GoogleToken> {
        let mut form = vec![
            ("client_id", secrets.client_id.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ];
        if let Some(secret) = &secrets.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let response = self.post_token(&secrets.token_uri, &form).await?;
        Ok(response.into_token(None))
    }

    async fn post_token(&self, token_uri: &str, form: &[(&str, &str)]) -> AppResult<TokenResponse> {
        let response = self
            .client
            .post(token_uri)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "Token request failed (HTTP {}): {}",
                status, text
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to parse token response: {}", e)))
    }

    /// Installed-app consent through a loopback listener.
    async fn consent(&self, secrets: &ClientSecrets) -> AppResult<GoogleToken> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{}/", port);
        let state = random_state();

        let mut auth_url = Url::parse(&secrets.auth_uri)
            .map_err(|e| AppError::Config(format!("Invalid auth_uri: {}", e)))?;
        auth_url
            .query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &secrets.client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("state", &state)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");

        println!("Please visit this URL to authorize docgen:\n{}\n", auth_url);
        tracing::info!("Waiting for OAuth redirect on {}", redirect_uri);

        match await_redirect(&listener, &state).await? {
            Redirect::Code(code) => self.exchange_code(secrets, &code, &redirect_uri).await,
            Redirect::Denied(error) => Err(AppError::Storage(format!(
                "Google authorization denied: {}",
                error
            ))),
        }
    }
}

fn random_state() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Whether a request line carries OAuth redirect parameters at all.
///
/// Browsers also open idle preconnect sockets and ask for `/favicon.ico`.
fn is_redirect(request_line: &str) -> bool {
    let Some(target) = request_line.split_whitespace().nth(1) else {
        return false;
    };
    Url::parse("http://127.0.0.1")
        .and_then(|base| base.join(target))
        .map(|url| {
            url.query_pairs()
                .any(|(key, _)| matches!(key.as_ref(), "code" | "state" | "error"))
        })
        .unwrap_or(false)
}

/// First line of the request on `socket`; `None` if the peer sent nothing.
async fn read_request_line(mut socket: TcpStream) -> Option<(String, TcpStream)> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(2).any(|w| w == b"\r\n") && buf.len() < MAX_REQUEST_BYTES {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    if buf.is_empty() {
        return None;
    }

    let request = String::from_utf8_lossy(&buf);
    let line = request.lines().next().unwrap_or_default().to_string();
    Some((line, socket))
}

async fn reply(socket: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if let Err(e) = socket.write_all(response.as_bytes()).await {
        tracing::debug!("Loopback reply failed: {}", e);
    }
    socket.shutdown().await.ok();
}

/// Serve the loopback listener until the browser delivers the redirect.
///
/// Connections are read concurrently so an idle socket cannot block the
/// real redirect; requests without redirect parameters get a 404.
pub(crate) async fn await_redirect(
    listener: &TcpListener,
    expected_state: &str,
) -> AppResult<Redirect> {
    let (tx, mut rx) = mpsc::channel::<(String, TcpStream)>(8);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (socket, _) = accepted?;
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(request) = read_request_line(socket).await {
                        tx.send(request).await.ok();
                    }
                });
            }
            Some((request_line, mut socket)) = rx.recv() => {
                if !is_redirect(&request_line) {
                    tracing::debug!("Ignoring loopback request: {}", request_line);
                    reply(&mut socket, "404 Not Found", "").await;
                    continue;
                }

                let redirect = parse_redirect(&request_line, expected_state);
                let body = match &redirect {
                    Ok(Redirect::Code(_)) => "Authorization complete. You may close this window.",
                    _ => "Authorization failed. Return to the terminal for details.",
                };
                reply(&mut socket, "200 OK", body).await;
                return redirect;
            }
        }
    }
}
