//! Thin reqwest wrapper over the handful of Strava endpoints the sync needs.

use crate::domain::model::{Activity, Athlete, AthleteStats, Credentials};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

pub const ACTIVITIES_PER_PAGE: usize = 200;

/// Strava application id and secret.
#[derive(Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for OAuthApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthApp")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StravaClient {
    api_url: String,
    client: Client,
}

impl StravaClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.api_url)
    }

    /// Trades the one-time authorization code for the first token pair.
    pub async fn exchange_code(&self, app: &OAuthApp, code: &str) -> Result<Credentials> {
        tracing::debug!("Exchanging authorization code at {}", self.token_url());
        self.token_request(&[
            ("client_id", app.client_id.as_str()),
            ("client_secret", app.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    pub async fn refresh(&self, app: &OAuthApp, refresh_token: &str) -> Result<Credentials> {
        tracing::debug!("Refreshing access token at {}", self.token_url());
        self.token_request(&[
            ("client_id", app.client_id.as_str()),
            ("client_secret", app.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<Credentials> {
        let response = self.client.post(self.token_url()).form(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                snippet(&body)
            )));
        }
        let credentials: Credentials = response.json().await?;
        Ok(credentials)
    }

    pub async fn athlete(&self, access_token: &str) -> Result<Athlete> {
        self.get_json(access_token, "/athlete", &[]).await
    }

    pub async fn athlete_stats(&self, access_token: &str, athlete_id: u64) -> Result<AthleteStats> {
        self.get_json(access_token, &format!("/athletes/{}/stats", athlete_id), &[])
            .await
    }

    /// Every activity that started after `after` (epoch seconds), across all pages.
    pub async fn activities_since(&self, access_token: &str, after: i64) -> Result<Vec<Activity>> {
        let mut activities = Vec::new();
        let after = after.to_string();
        let per_page = ACTIVITIES_PER_PAGE.to_string();

        for page in 1.. {
            let page_str = page.to_string();
            let batch: Vec<Activity> = self
                .get_json(
                    access_token,
                    "/athlete/activities",
                    &[
                        ("after", after.as_str()),
                        ("per_page", per_page.as_str()),
                        ("page", page_str.as_str()),
                    ],
                )
                .await?;
            tracing::debug!("Activities page {} returned {} items", page, batch.len());

            let done = batch.len() < ACTIVITIES_PER_PAGE;
            activities.extend(batch);
            if done {
                break;
            }
        }

        Ok(activities)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::HttpStatusError {
                endpoint: format!("Strava {}", path),
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(256).collect()
}
