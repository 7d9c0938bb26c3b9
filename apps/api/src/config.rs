use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::render::table::MissingSeparator;

const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub llm_max_tokens: u32,
    /// The single identity accepted by the basic-auth gate.
    pub auth_user: String,
    pub auth_password: String,
    pub cors_origin: String,
    /// Overrides the bundled logo embedded in exports.
    pub logo_path: Option<PathBuf>,
    pub missing_separator: MissingSeparator,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS")
                .unwrap_or_else(|_| "4096".to_string())
                .parse::<u32>()
                .context("LLM_MAX_TOKENS must be a positive integer")?,
            auth_user: require_env("BASIC_AUTH_USER")?,
            auth_password: require_env("BASIC_AUTH_PASSWORD")?,
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            logo_path: std::env::var("LOGO_PATH").ok().map(PathBuf::from),
            missing_separator: parse_missing_separator(
                &std::env::var("TABLE_MISSING_SEPARATOR")
                    .unwrap_or_else(|_| "after-header".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_missing_separator(value: &str) -> Result<MissingSeparator> {
    value
        .parse::<MissingSeparator>()
        .context("TABLE_MISSING_SEPARATOR must be 'after-header' or 'rescan'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_separator_policy_parses() {
        assert_eq!(
            parse_missing_separator("rescan").unwrap(),
            MissingSeparator::Rescan
        );
        assert_eq!(
            parse_missing_separator("after-header").unwrap(),
            MissingSeparator::AfterHeader
        );
    }

    #[test]
    fn test_unknown_missing_separator_policy_keeps_both_messages() {
        let err = parse_missing_separator("sometimes").unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("TABLE_MISSING_SEPARATOR must be"));
        assert!(chain.contains("unknown missing-separator policy 'sometimes'"));
    }
}
