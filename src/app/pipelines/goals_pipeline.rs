use crate::adapters::strava::{OAuthApp, StravaClient};
use crate::adapters::trmnl::TrmnlPublisher;
use crate::config::EnvConfig;
use crate::core::aggregator;
use crate::core::auth::TokenManager;
use crate::core::token_store::TokenStore;
use crate::core::{
    ActivitySnapshot, AuthorizationPrompt, ConfigProvider, GoalSummary, Pipeline, Storage,
};
use crate::domain::model::{Goals, TrmnlPayload};
use crate::utils::error::Result;
use chrono::Local;

/// Strava → goals → TRMNL, one pass per run.
pub struct GoalsPipeline<S: Storage, C: ConfigProvider, P: AuthorizationPrompt> {
    config: C,
    goals: Goals,
    tokens: TokenManager<S, P>,
    strava: StravaClient,
    publisher: TrmnlPublisher,
}

impl<S: Storage, C: ConfigProvider, P: AuthorizationPrompt> GoalsPipeline<S, C, P> {
    pub fn new(storage: S, config: C, env: &EnvConfig, goals: Goals, prompt: P) -> Self {
        let strava = StravaClient::new(config.strava_api_url());
        let app = OAuthApp {
            client_id: env.client_id.clone(),
            client_secret: env.client_secret.clone(),
        };
        let tokens = TokenManager::new(
            TokenStore::new(storage, config.credentials_file()),
            strava.clone(),
            app,
            prompt,
            config.strava_authorize_url(),
            config.redirect_uri(),
        )
        .interactive(!env.ci);
        let publisher = TrmnlPublisher::new(config.trmnl_api_url(), &env.plugin_uuid);

        Self {
            config,
            goals,
            tokens,
            strava,
            publisher,
        }
    }

    /// On CI the credentials arrive through `STRAVA_CREDENTIALS`; write them out before the run.
    pub async fn seed_credentials_from_env(&self, env: &EnvConfig) -> Result<bool> {
        match (&env.seeded_credentials, env.ci) {
            (Some(raw), true) => {
                self.tokens.store().seed(raw).await?;
                tracing::info!(
                    "🔑 Seeded {} from STRAVA_CREDENTIALS",
                    self.tokens.store().file_name()
                );
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, P: AuthorizationPrompt> Pipeline for GoalsPipeline<S, C, P> {
    async fn extract(&self) -> Result<ActivitySnapshot> {
        // 取得有效 token（必要時先刷新）
        let credentials = self.tokens.get_valid_token().await?;
        let token = credentials.access_token.as_str();

        let athlete = self.strava.athlete(token).await?;
        tracing::debug!("Authenticated as athlete {}", athlete.id);

        let stats = self.strava.athlete_stats(token, athlete.id).await?;
        let ytd_run_metres = stats
            .ytd_run_totals
            .map(|totals| totals.distance)
            .unwrap_or(0.0);

        let since = aggregator::week_start(&Local::now());
        tracing::debug!("Fetching activities since {}", since);
        let activities = self.strava.activities_since(token, since.timestamp()).await?;

        Ok(aggregator::snapshot(&activities, ytd_run_metres))
    }

    async fn transform(&self, data: ActivitySnapshot) -> Result<GoalSummary> {
        Ok(aggregator::summarize(&data, &self.goals))
    }

    async fn load(&self, result: GoalSummary) -> Result<String> {
        let payload = TrmnlPayload::from(&result);

        if self.config.dry_run() {
            let json = serde_json::to_string_pretty(&payload)?;
            println!("{}", json);
            tracing::info!("🔍 Dry run, payload not sent to TRMNL");
            return Ok(json);
        }

        let body = self.publisher.publish(&payload).await?;
        tracing::info!("TRMNL accepted update: {}", body);
        Ok(body)
    }
}
