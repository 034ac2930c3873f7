//! OAuth token lifecycle: first-run authorization, refresh of expired tokens.

use crate::adapters::strava::{OAuthApp, StravaClient};
use crate::core::token_store::TokenStore;
use crate::core::{AuthorizationPrompt, Storage};
use crate::domain::model::Credentials;
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use url::Url;

pub const SCOPES: &[&str] = &["read_all", "profile:read_all", "activity:read_all"];

/// Tokens this close to expiry are refreshed up front.
pub const REFRESH_MARGIN_SECS: i64 = 60;

pub fn authorization_url(authorize_url: &str, client_id: &str, redirect_uri: &str) -> Result<Url> {
    let scope = SCOPES.join(",");
    Url::parse_with_params(
        authorize_url,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("approval_prompt", "auto"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| EtlError::InvalidConfigValueError {
        field: "strava_authorize_url".to_string(),
        value: authorize_url.to_string(),
        reason: e.to_string(),
    })
}

/// Accepts either the bare code or the whole redirect URL the browser landed on.
pub fn extract_code(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(EtlError::auth("no authorization code entered"));
    }

    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) if input.contains("code=") || input.contains("error=") => {
            input.trim_start_matches('?').to_string()
        }
        Err(_) => return Ok(input.to_string()),
    };

    let mut code = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "error" => {
                return Err(EtlError::auth(format!("authorization was refused: {}", value)));
            }
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| EtlError::auth("redirect URL does not contain a code"))
}

pub struct TokenManager<S: Storage, P: AuthorizationPrompt> {
    store: TokenStore<S>,
    strava: StravaClient,
    app: OAuthApp,
    prompt: P,
    authorize_url: String,
    redirect_uri: String,
    interactive: bool,
}

impl<S: Storage, P: AuthorizationPrompt> TokenManager<S, P> {
    pub fn new(
        store: TokenStore<S>,
        strava: StravaClient,
        app: OAuthApp,
        prompt: P,
        authorize_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            store,
            strava,
            app,
            prompt,
            authorize_url: authorize_url.into(),
            redirect_uri: redirect_uri.into(),
            interactive: true,
        }
    }

    /// Disables the browser/paste flow, e.g. on CI runners nobody is watching.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    pub async fn get_valid_token(&self) -> Result<Credentials> {
        self.get_valid_token_at(Utc::now()).await
    }

    pub async fn get_valid_token_at(&self, now: DateTime<Utc>) -> Result<Credentials> {
        if !self.store.exists().await {
            tracing::info!("🔑 No stored credentials, starting Strava authorization");
            let credentials = self.authorize().await?;
            self.store.save(&credentials).await?;
            return Ok(credentials);
        }

        let credentials = self.store.load().await?;
        if !credentials.is_expired(now, REFRESH_MARGIN_SECS) {
            tracing::debug!("Access token valid until {:?}", credentials.expires_at_utc());
            return Ok(credentials);
        }

        tracing::info!("🔄 Access token expired, refreshing");
        let refreshed = self
            .strava
            .refresh(&self.app, &credentials.refresh_token)
            .await?;
        self.store.save(&refreshed).await?;
        Ok(refreshed)
    }

    async fn authorize(&self) -> Result<Credentials> {
        if !self.interactive {
            return Err(EtlError::auth(
                "Running in CI environment, please configure token manually first",
            ));
        }

        let url = authorization_url(&self.authorize_url, &self.app.client_id, &self.redirect_uri)?;
        let input = self.prompt.request_code(url.as_str()).await?;
        let code = extract_code(&input)?;

        self.strava.exchange_code(&self.app, &code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_carries_scopes() {
        let url = authorization_url(
            "https://www.strava.com/oauth/authorize",
            "12345",
            "http://localhost:8000/authorized",
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("client_id".to_string(), "12345".to_string())));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&(
            "scope".to_string(),
            "read_all,profile:read_all,activity:read_all".to_string()
        )));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:8000/authorized".to_string()
        )));
    }

    #[test]
    fn test_extract_bare_code() {
        assert_eq!(extract_code("  abc123\n").unwrap(), "abc123");
    }

    #[test]
    fn test_extract_code_from_redirect_url() {
        let code = extract_code(
            "http://localhost:8000/authorized?state=&code=f00ba4&scope=read,activity:read_all",
        )
        .unwrap();
        assert_eq!(code, "f00ba4");
    }

    #[test]
    fn test_extract_code_from_query_fragment() {
        assert_eq!(extract_code("?state=&code=xyz").unwrap(), "xyz");
    }

    #[test]
    fn test_denied_authorization() {
        let err = extract_code("http://localhost:8000/authorized?state=&error=access_denied")
            .unwrap_err();
        assert!(matches!(err, EtlError::AuthError { .. }));
    }

    #[test]
    fn test_empty_input_and_url_without_code() {
        assert!(extract_code("   ").is_err());
        assert!(extract_code("http://localhost:8000/authorized").is_err());
    }
}
