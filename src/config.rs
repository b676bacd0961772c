use crate::error::{Error, Result};
use crate::scoring::weights::ScoreWeights;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub api_key: String,
    pub webhook_secret: String,
    pub integration_rps: u32,
    pub public_rps: u32,
    pub ats_webhook_url: Option<String>,
    pub default_weights: ScoreWeights,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let default_weights = ScoreWeights {
            tms: get_env_parse_or("FIT_WEIGHT_TMS", 0.5)?,
            srs: get_env_parse_or("FIT_WEIGHT_SRS", 0.3)?,
            rns: get_env_parse_or("FIT_WEIGHT_RNS", 0.2)?,
        };
        default_weights
            .validate()
            .map_err(|e| Error::Config(format!("Invalid FIT_WEIGHT_* values: {}", e)))?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            api_key: get_env("API_KEY")?,
            webhook_secret: get_env("WEBHOOK_SECRET")?,
            integration_rps: get_env_parse("INTEGRATION_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            ats_webhook_url: env::var("ATS_WEBHOOK_URL").ok(),
            default_weights,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
