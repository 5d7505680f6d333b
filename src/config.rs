//! Configuration constants and environment overrides.

use std::error::Error;

/// Report file written in the working directory.
pub const REPORT_FILE: &str = "statisticLS.csv";

/// First line of the report.
pub const CSV_HEADER: &str = "Subscription-Name, ID, LS, ResourceGroup, LS";

/// Prefix Azure puts in front of a subscription GUID in its resource id.
pub const SUBSCRIPTION_ID_PREFIX: &str = "/subscriptions/";

/// Tag holding the Leistungsschein (billing / cost-center) number.
pub const LS_TAG: &str = "Leistungsschein";

/// Rows requested per `az graph query` call (Azure maximum).
pub const GRAPH_PAGE_SIZE: u32 = 1000;

/// Refuse CLI responses larger than this.
pub const MAX_CLI_OUTPUT_BYTES: usize = 5_000_000;

/// Default log4rs config file.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Runtime configuration, read after `dotenv` has loaded `.env`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the CSV report (`LS_REPORT_FILE`).
    pub report_file: String,
    /// Path of the log4rs yaml (`LS_REPORT_LOG_CONFIG`).
    pub log_config: String,
    /// `--first` value for graph queries (`LS_REPORT_PAGE_SIZE`).
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            report_file: REPORT_FILE.to_string(),
            log_config: LOG_CONFIG_FILE.to_string(),
            page_size: GRAPH_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Build the config from the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(file) = lookup("LS_REPORT_FILE") {
            config.report_file = file;
        }
        config.log_config = log_config_from_lookup(&lookup);
        if let Some(size) = lookup("LS_REPORT_PAGE_SIZE") {
            config.page_size = size
                .trim()
                .parse()
                .map_err(|e| format!("Invalid LS_REPORT_PAGE_SIZE '{size}': {e}"))?;
            if config.page_size == 0 || config.page_size > GRAPH_PAGE_SIZE {
                return Err(format!(
                    "LS_REPORT_PAGE_SIZE must be between 1 and {GRAPH_PAGE_SIZE}, got {}",
                    config.page_size
                )
                .into());
            }
        }
        Ok(config)
    }
}

/// log4rs config path, readable before the rest of the config is parsed.
pub fn log_config_path() -> String {
    log_config_from_lookup(|key| std::env::var(key).ok())
}

fn log_config_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LS_REPORT_LOG_CONFIG").unwrap_or_else(|| LOG_CONFIG_FILE.to_string())
}
