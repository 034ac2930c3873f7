use crate::adapters::strava::snippet;
use crate::domain::model::TrmnlPayload;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Posts merge variables to a TRMNL custom plugin webhook.
#[derive(Debug, Clone)]
pub struct TrmnlPublisher {
    webhook_url: String,
    client: Client,
}

impl TrmnlPublisher {
    pub fn new(api_url: &str, plugin_uuid: &str) -> Self {
        Self {
            webhook_url: format!(
                "{}/api/custom_plugins/{}",
                api_url.trim_end_matches('/'),
                plugin_uuid
            ),
            client: Client::new(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Single attempt. Anything but a 2xx becomes an error.
    pub async fn publish(&self, payload: &TrmnlPayload) -> Result<String> {
        tracing::debug!("Posting merge variables to {}", self.webhook_url);
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("TRMNL response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                endpoint: "TRMNL webhook".to_string(),
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MergeVariables;
    use httpmock::prelude::*;

    fn payload() -> TrmnlPayload {
        TrmnlPayload {
            merge_variables: MergeVariables {
                weekly_distance: 10.0,
                weekly_goal: 30.0,
                weekly_percent: 33.3,
                weekly_remaining: 20.0,
                yearly_distance: 500.0,
                yearly_goal: 1500.0,
                yearly_percent: 33.3,
                yearly_remaining: 1000.0,
            },
        }
    }

    #[test]
    fn test_webhook_url_is_keyed_by_plugin_uuid() {
        let publisher = TrmnlPublisher::new("https://usetrmnl.com/", "abc-123");
        assert_eq!(
            publisher.webhook_url(),
            "https://usetrmnl.com/api/custom_plugins/abc-123"
        );
    }

    #[tokio::test]
    async fn test_publish_sends_merge_variables() {
        let server = MockServer::start();
        let webhook = server.mock(|when, then| {
            when.method(POST)
                .path("/api/custom_plugins/plugin-1")
                .header("content-type", "application/json")
                .body_contains("\"merge_variables\"")
                .body_contains("\"weekly_percent\":33.3");
            then.status(200).body(r#"{"message":null}"#);
        });

        let publisher = TrmnlPublisher::new(&server.base_url(), "plugin-1");
        let body = publisher.publish(&payload()).await.unwrap();

        webhook.assert();
        assert!(body.contains("message"));
    }

    #[tokio::test]
    async fn test_publish_rejects_non_2xx() {
        let server = MockServer::start();
        let webhook = server.mock(|when, then| {
            when.method(POST).path("/api/custom_plugins/plugin-1");
            then.status(429).body("rate limited");
        });

        let publisher = TrmnlPublisher::new(&server.base_url(), "plugin-1");
        let err = publisher.publish(&payload()).await.unwrap_err();

        webhook.assert_hits(1);
        match err {
            EtlError::HttpStatusError { status, body, .. } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
