use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    20
}

/// Admin account created on startup if no user with this username exists.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// YouTube Data API settings. Without an API key, metadata lookups fall back
/// to a payload built from the video ID alone.
#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    #[serde(default = "default_video_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_video_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_video_api_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".into()
}
fn default_video_timeout_secs() -> u64 {
    10
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            api_base_url: default_video_api_base_url(),
            timeout_secs: default_video_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub video: VideoConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("log.level", "info")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PIXELLENS__VIDEO__YOUTUBE_API_KEY)
            .add_source(Environment::with_prefix("PIXELLENS").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Treats a blank key the same as a missing one.
    pub fn youtube_api_key(&self) -> Option<&str> {
        self.video
            .youtube_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
