use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_numeric_id, Validate};

pub const CLIENT_ID_VAR: &str = "STRAVA_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "STRAVA_CLIENT_SECRET";
pub const PLUGIN_UUID_VAR: &str = "TRMNL_PLUGIN_UUID";
pub const CI_VAR: &str = "CI";
pub const SEEDED_CREDENTIALS_VAR: &str = "STRAVA_CREDENTIALS";

/// Secrets and runtime switches that come from the environment rather than flags.
#[derive(Clone)]
pub struct EnvConfig {
    pub client_id: String,
    pub client_secret: String,
    pub plugin_uuid: String,
    pub ci: bool,
    pub seeded_credentials: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads values through `get` so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |name: &str| match get(name) {
            Some(value) => value,
            None => {
                missing.push(name.to_string());
                String::new()
            }
        };
        let client_id = required(CLIENT_ID_VAR);
        let client_secret = required(CLIENT_SECRET_VAR);
        let plugin_uuid = required(PLUGIN_UUID_VAR);

        if !missing.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: missing.join(", "),
            });
        }

        let ci = get(CI_VAR).is_some_and(|v| !v.is_empty() && v != "false" && v != "0");
        let seeded_credentials = get(SEEDED_CREDENTIALS_VAR).filter(|v| !v.trim().is_empty());

        Ok(Self {
            client_id: client_id.trim().to_string(),
            client_secret,
            plugin_uuid: plugin_uuid.trim().to_string(),
            ci,
            seeded_credentials,
        })
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_numeric_id(CLIENT_ID_VAR, &self.client_id)?;
        validate_non_empty_string(CLIENT_SECRET_VAR, &self.client_secret)?;
        validate_non_empty_string(PLUGIN_UUID_VAR, &self.plugin_uuid)?;
        Ok(())
    }
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("plugin_uuid", &self.plugin_uuid)
            .field("ci", &self.ci)
            .field("seeded_credentials", &self.seeded_credentials.is_some())
            .finish()
    }
}
