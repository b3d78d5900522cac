use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
///
/// `GROQ_API_KEY` is optional: without it the service still starts and
/// reports the provider as unavailable.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_concurrent_evaluations: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_concurrent_evaluations = lookup("MAX_CONCURRENT_EVALUATIONS")
            .unwrap_or_else(|| "4".to_string())
            .parse::<usize>()
            .context("MAX_CONCURRENT_EVALUATIONS must be a positive integer")?;
        if max_concurrent_evaluations == 0 {
            bail!("MAX_CONCURRENT_EVALUATIONS must be at least 1");
        }

        Ok(Config {
            groq_api_key: lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_concurrent_evaluations,
        })
    }
}
