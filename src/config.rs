/// What a decisive game is worth.
#[derive(Debug, Clone)]
pub struct Stake {
    pub amount: u32,
    pub currency: String,
}

/// Runtime configuration, read once from the environment at startup.
/// Every variable has the historical default so a bare process comes
/// up in a sandbox-friendly shape; real deployments override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub production: bool,
    pub verification_token: String,
    pub slack_token: String,
    pub slack_base_url: String,
    pub briq_token: String,
    pub briq_base_url: String,
    pub stake: Stake,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: var("PORT", "8085").parse().expect("PORT must be a port number"),
            production: var("RUN_ENV", "development") == "production",
            verification_token: var("SLACK_VERIFICATION_TOKEN", "token-example"),
            slack_token: var("SLACK_TOKEN", "token-example"),
            slack_base_url: var("SLACK_BASE_URL", "https://slack.com/api"),
            briq_token: var("BRIQ_TOKEN", "token-example"),
            briq_base_url: var("BRIQ_BASE_URL", "https://api.givebriq.com/v0"),
            stake: Stake {
                amount: var("STAKE_AMOUNT", "1").parse().expect("STAKE_AMOUNT must be a number"),
                currency: var("STAKE_CURRENCY", "bq"),
            },
        }
    }
}

fn var(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8085,
            production: false,
            verification_token: "token-example".to_string(),
            slack_token: "token-example".to_string(),
            slack_base_url: "https://slack.com/api".to_string(),
            briq_token: "token-example".to_string(),
            briq_base_url: "https://api.givebriq.com/v0".to_string(),
            stake: Stake {
                amount: 1,
                currency: "bq".to_string(),
            },
        }
    }
}
