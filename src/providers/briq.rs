use super::*;
use crate::config::Config;
use std::time::Duration;

/// Briq payment API client. Authenticates with the API token as the
/// basic-auth username, no password.
pub struct Briq {
    base: String,
    token: String,
}

impl From<&Config> for Briq {
    fn from(config: &Config) -> Self {
        Self {
            base: config.briq_base_url.clone(),
            token: config.briq_token.clone(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Bank for Briq {
    async fn transfer(&self, transaction: &Transaction, organization: &str) -> anyhow::Result<()> {
        let response = awc::Client::builder()
            .timeout(Duration::from_secs(10))
            .finish()
            .post(format!(
                "{}/organizations/{}/transactions",
                self.base, organization
            ))
            .basic_auth(&self.token, "")
            .send_json(transaction)
            .await
            .map_err(|e| anyhow::anyhow!("briq transfer failed: {}", e))?;
        match response.status().is_success() {
            true => Ok(()),
            false => Err(anyhow::anyhow!("briq transfer rejected: {}", response.status())),
        }
    }
}
