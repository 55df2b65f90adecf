use crate::config::expand_tilde;
use crate::error::ConfigError;
use rand::Rng;
use std::fs;

#[derive(Debug, Clone)]
pub struct AssetStore {
    urls: Vec<String>,
}

impl AssetStore {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let resolved = expand_tilde(path);
        let raw = fs::read_to_string(&resolved).map_err(|source| ConfigError::Io {
            path: resolved.display().to_string(),
            source,
        })?;
        let urls = parse_image_csv(&raw);
        if urls.is_empty() {
            return Err(ConfigError::EmptyAssetList(resolved.display().to_string()));
        }
        Ok(Self { urls })
    }

    pub fn from_urls(urls: Vec<String>) -> Result<Self, ConfigError> {
        if urls.is_empty() {
            return Err(ConfigError::EmptyAssetList("<inline>".to_string()));
        }
        Ok(Self { urls })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn random_image_url<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.random_range(0..self.urls.len());
        &self.urls[index]
    }
}

pub fn parse_image_csv(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| line.split(',').next())
        .map(|cell| cell.trim().trim_matches('"').trim())
        .filter(|cell| cell.starts_with("http://") || cell.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
