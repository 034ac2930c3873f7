use crate::domain::model::{ActivitySnapshot, GoalSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn strava_api_url(&self) -> &str;
    fn strava_authorize_url(&self) -> &str;
    fn redirect_uri(&self) -> &str;
    fn trmnl_api_url(&self) -> &str;
    fn goals_path(&self) -> &str;
    fn credentials_file(&self) -> &str;
    fn dry_run(&self) -> bool;
    fn open_browser(&self) -> bool;
}

/// Where the one-time authorization code comes from.
#[async_trait]
pub trait AuthorizationPrompt: Send + Sync {
    async fn request_code(&self, authorize_url: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ActivitySnapshot>;
    async fn transform(&self, data: ActivitySnapshot) -> Result<GoalSummary>;
    async fn load(&self, result: GoalSummary) -> Result<String>;
}
