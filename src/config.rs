use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub bot: BotIdentity,
    pub testing_bot: Option<BotIdentity>,
    pub groupme: GroupMeConfig,
    pub generation: GenerationConfig,
    pub captioning: CaptioningConfig,
    pub assets: AssetsConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 25566,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotIdentity {
    pub name: String,
    pub bot_id: String,
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupMeConfig {
    pub api_url: String,
    pub image_url: String,
    pub access_token: Option<String>,
    pub webhook_path: String,
}

impl Default for GroupMeConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groupme.com".to_string(),
            image_url: "https://image.groupme.com".to_string(),
            access_token: None,
            webhook_path: "/bot/message".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub url: String,
    pub top_p: f32,
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8500".to_string(),
            top_p: 0.9,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptioningConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for CaptioningConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8501".to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub images_csv: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            images_csv: "~/.etabot/images.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub unsolicited_chance_percent: u32,
    pub short_length_min: u32,
    pub short_length_max: u32,
    /// Temperatures are drawn as whole percents, then divided by 100.
    pub short_temperature_min_percent: u32,
    pub short_temperature_max_percent: u32,
    pub storytime_length: u32,
    pub storytime_temperature: f32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            unsolicited_chance_percent: 10,
            short_length_min: 30,
            short_length_max: 80,
            short_temperature_min_percent: 45,
            short_temperature_max_percent: 75,
            storytime_length: 250,
            storytime_temperature: 0.9,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            bot: BotIdentity::default(),
            testing_bot: None,
            groupme: GroupMeConfig::default(),
            generation: GenerationConfig::default(),
            captioning: CaptioningConfig::default(),
            assets: AssetsConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl Config {
    /// Picks the identity to run as. `--testing` swaps in `testing_bot`.
    pub fn active_bot(&self, testing: bool) -> Result<&BotIdentity, ConfigError> {
        let bot = if testing {
            self.testing_bot
                .as_ref()
                .ok_or(ConfigError::MissingTestingBot)?
        } else {
            &self.bot
        };
        if bot.name.trim().is_empty() {
            return Err(ConfigError::MissingBotName);
        }
        if bot.bot_id.trim().is_empty() {
            return Err(ConfigError::MissingBotId);
        }
        Ok(bot)
    }

    pub fn webhook_path(&self) -> Result<&str, ConfigError> {
        let path = self.groupme.webhook_path.as_str();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidWebhookPath(path.to_string()));
        }
        Ok(path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn resolve_config_path() -> PathBuf {
    env::var("ETABOT_CONFIG")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_tilde("~/.etabot/etabot.json"))
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(resolve_config_path);

    let mut cfg = if config_path.exists() {
        let raw = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.display().to_string(),
            source,
        })?;
        serde_json::from_str::<Config>(&raw).map_err(|source| ConfigError::Parse {
            path: config_path.display().to_string(),
            source,
        })?
    } else {
        Config::default()
    };

    apply_overrides(&mut cfg, |key| env::var(key).ok());
    Ok(cfg)
}

pub fn apply_overrides<F>(cfg: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(name) = get("ETABOT_BOT_NAME") {
        cfg.bot.name = name;
    }
    if let Some(id) = get("ETABOT_BOT_ID") {
        cfg.bot.bot_id = id;
    }
    if let Some(group) = get("ETABOT_GROUP_ID") {
        cfg.bot.group_id = Some(group);
    }

    let testing_name = get("ETABOT_TESTING_BOT_NAME");
    let testing_id = get("ETABOT_TESTING_BOT_ID");
    let testing_group = get("ETABOT_TESTING_GROUP_ID");
    if testing_name.is_some() || testing_id.is_some() || testing_group.is_some() {
        let testing = cfg.testing_bot.get_or_insert_with(BotIdentity::default);
        if let Some(name) = testing_name {
            testing.name = name;
        }
        if let Some(id) = testing_id {
            testing.bot_id = id;
        }
        if let Some(group) = testing_group {
            testing.group_id = Some(group);
        }
    }

    if let Some(token) = get("ETABOT_GROUPME_TOKEN") {
        cfg.groupme.access_token = Some(token);
    }
    if let Some(url) = get("ETABOT_GENERATION_URL") {
        cfg.generation.url = url;
    }
    if let Some(url) = get("ETABOT_CAPTIONING_URL") {
        cfg.captioning.url = url;
    }
    if let Some(path) = get("ETABOT_IMAGES_CSV") {
        cfg.assets.images_csv = path;
    }
    if let Some(port) = get("ETABOT_PORT").and_then(|p| p.parse().ok()) {
        cfg.server.port = port;
    }
}
