use crate::core::AuthorizationPrompt;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Interactive first-run prompt on the controlling terminal.
#[derive(Debug, Clone)]
pub struct StdinPrompt {
    open_browser: bool,
}

impl StdinPrompt {
    pub fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

#[async_trait]
impl AuthorizationPrompt for StdinPrompt {
    async fn request_code(&self, authorize_url: &str) -> Result<String> {
        if self.open_browser {
            if let Err(e) = open::that(authorize_url) {
                tracing::warn!("Could not open a browser: {}", e);
            }
        }

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("Please visit: {}\n", authorize_url).as_bytes())
            .await?;
        stdout
            .write_all(b"Enter the code from the redirect URL: ")
            .await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        if read == 0 {
            return Err(EtlError::auth("no authorization code entered (stdin closed)"));
        }

        Ok(line)
    }
}
