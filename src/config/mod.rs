pub mod env;
pub mod goals;

pub use env::EnvConfig;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_STRAVA_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/authorized";
pub const DEFAULT_TRMNL_API_URL: &str = "https://usetrmnl.com";
pub const DEFAULT_GOALS_PATH: &str = "goals.yml";
pub const DEFAULT_CREDENTIALS_FILE: &str = ".strava-credentials";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "strava-trmnl")]
#[command(about = "Push Strava running goal progress to a TRMNL plugin")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_STRAVA_API_URL)]
    pub strava_api_url: String,

    #[arg(long, default_value = DEFAULT_STRAVA_AUTHORIZE_URL)]
    pub strava_authorize_url: String,

    #[arg(long, default_value = DEFAULT_REDIRECT_URI)]
    pub redirect_uri: String,

    #[arg(long, default_value = DEFAULT_TRMNL_API_URL)]
    pub trmnl_api_url: String,

    #[arg(long = "goals", default_value = DEFAULT_GOALS_PATH)]
    pub goals_path: String,

    #[arg(long = "credentials", default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials_file: String,

    #[arg(long, help = "Print the payload instead of posting it to TRMNL")]
    pub dry_run: bool,

    #[arg(long, help = "Only print the authorization URL, never open a browser")]
    pub no_browser: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_authorize_url: DEFAULT_STRAVA_AUTHORIZE_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            trmnl_api_url: DEFAULT_TRMNL_API_URL.to_string(),
            goals_path: DEFAULT_GOALS_PATH.to_string(),
            credentials_file: DEFAULT_CREDENTIALS_FILE.to_string(),
            dry_run: false,
            no_browser: false,
            verbose: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn strava_api_url(&self) -> &str {
        &self.strava_api_url
    }

    fn strava_authorize_url(&self) -> &str {
        &self.strava_authorize_url
    }

    fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    fn trmnl_api_url(&self) -> &str {
        &self.trmnl_api_url
    }

    fn goals_path(&self) -> &str {
        &self.goals_path
    }

    fn credentials_file(&self) -> &str {
        &self.credentials_file
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn open_browser(&self) -> bool {
        !self.no_browser
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("strava_api_url", &self.strava_api_url)?;
        validate_url("strava_authorize_url", &self.strava_authorize_url)?;
        validate_url("redirect_uri", &self.redirect_uri)?;
        validate_url("trmnl_api_url", &self.trmnl_api_url)?;
        validate_path("goals", &self.goals_path)?;
        validate_path("credentials", &self.credentials_file)?;
        Ok(())
    }
}
