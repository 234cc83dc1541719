//! Settings for the application, read from `settings.toml` and overridden by
//! `SPENDOSENSE__*` environment variables and command-line flags.
//!
//! See `settings.toml` for the configuration.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    /// IANA name used for calendar days and months.
    pub timezone: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Supabase {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Deserialize)]
pub struct Gemini {
    pub api_key: String,
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    /// Without it data lives in memory and is lost on exit.
    pub supabase: Option<Supabase>,
    pub gemini: Option<Gemini>,
}

#[derive(Debug, Parser)]
#[command(name = "spendosense", about = "Personal finance API server")]
struct Args {
    /// Config file path, without extension.
    #[arg(long)]
    config: Option<String>,
    /// Log level (e.g. info, debug).
    #[arg(long)]
    level: Option<String>,
    /// Address to bind.
    #[arg(long)]
    bind: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SPENDOSENSE").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }
}
