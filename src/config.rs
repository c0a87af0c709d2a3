use std::path::PathBuf;

/// Default upstream model identifier.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default OpenAI-compatible API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_AGENT_CARD: &str = "assets/agent.json";
const DEFAULT_DOCS_DIR: &str = "site";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub agent_card_path: PathBuf,
    pub docs_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// A `.env` file in the working directory is read first; variables
    /// already set in the process environment win.
    ///
    /// - `OPENAI_API_KEY` (required, `OPEN_API_KEY` accepted): upstream credential
    /// - `ETYMO_MODEL` (optional, `MODEL` accepted, default `gpt-4o-mini`)
    /// - `OPENAI_BASE_URL` (optional, default `https://api.openai.com/v1`)
    /// - `HOST` / `PORT` (optional, default `0.0.0.0:8000`)
    /// - `ETYMO_AGENT_CARD` (optional, default `assets/agent.json`)
    /// - `ETYMO_DOCS_DIR` (optional, default `site`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let api_key = first_var(&["OPENAI_API_KEY", "OPEN_API_KEY"])
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let model = first_var(&["ETYMO_MODEL", "MODEL"]).unwrap_or_else(|| DEFAULT_MODEL.into());

        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.into());

        let port = match std::env::var("PORT") {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a TCP port number",
                value: val.clone(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let agent_card_path = std::env::var("ETYMO_AGENT_CARD")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AGENT_CARD));

        let docs_dir = std::env::var("ETYMO_DOCS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOCS_DIR));

        Ok(Self {
            api_key,
            model,
            base_url,
            host,
            port,
            agent_card_path,
            docs_dir,
        })
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| std::env::var(name).ok())
}
