use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::{models::retry::RetryConfig, phone::PhoneRules};

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub gateway_base_url: String,
    pub gateway_api_token: String,
    #[serde(default = "default_gateway_timeout_seconds")]
    pub gateway_timeout_seconds: u64,

    pub attempt_ttl_seconds: u64,

    pub max_retry_attempts: u32,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    pub retry_backoff_multiplier: u64,

    // Region rule table for phone normalization. Defaults are Argentina.
    #[serde(default = "default_messaging_country_code")]
    pub phone_messaging_country_code: String,
    #[serde(default = "default_bare_country_code")]
    pub phone_bare_country_code: String,
    #[serde(default = "default_mobile_prefixes")]
    pub phone_mobile_prefixes: Vec<String>,
    #[serde(default = "default_area_codes")]
    pub phone_default_area_codes: Vec<String>,
    #[serde(default = "default_max_local_length")]
    pub phone_max_local_length: usize,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_retry_attempts,
            initial_delay_ms: self.initial_retry_delay_ms,
            max_delay_ms: self.max_retry_delay_ms,
            backoff_multiplier: self.retry_backoff_multiplier,
        }
    }

    pub fn phone_rules(&self) -> PhoneRules {
        PhoneRules {
            messaging_country_code: self.phone_messaging_country_code.clone(),
            bare_country_code: self.phone_bare_country_code.clone(),
            mobile_prefixes: self.phone_mobile_prefixes.clone(),
            default_area_codes: self.phone_default_area_codes.clone(),
            max_local_length: self.phone_max_local_length,
        }
    }

    pub fn attempt_ttl(&self) -> Duration {
        Duration::from_secs(self.attempt_ttl_seconds)
    }
}

fn default_gateway_timeout_seconds() -> u64 {
    10
}

fn default_messaging_country_code() -> String {
    "549".to_string()
}

fn default_bare_country_code() -> String {
    "54".to_string()
}

fn default_mobile_prefixes() -> Vec<String> {
    vec!["15".to_string()]
}

fn default_area_codes() -> Vec<String> {
    vec!["11".to_string()]
}

fn default_max_local_length() -> usize {
    10
}
