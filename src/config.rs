use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Free-text product category, used in reports and exports
    #[serde(default = "default_category")]
    pub category: String,

    /// JSON file loaded into the catalog at start-up
    #[serde(default)]
    pub seed_file: Option<String>,

    /// Where `POST /api/v1/export` writes its snapshot
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_category() -> String {
    "product".to_string()
}

fn default_export_path() -> String {
    "data/export.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            category: default_category(),
            seed_file: None,
            export_path: default_export_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
