use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tilehop::math::units::world;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub address: String,
    pub start: Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Start {
    pub x: f32,
    pub y: f32,
}

impl Start {
    pub fn position(&self) -> world::Point2D {
        world::Point2D::new(self.x, self.y)
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        PathBuf::from("./settings.toml")
    }

    /// Reads `settings.toml` when present, then applies `SERVER_ADDR`.
    pub fn load() -> anyhow::Result<Self> {
        let settings = match std::fs::read_to_string(Self::path()) {
            Ok(contents) => Self::from_toml(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(settings.with_address_override(std::env::var("SERVER_ADDR").ok()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_address_override(mut self, address: Option<String>) -> Self {
        if let Some(address) = address.filter(|address| !address.is_empty()) {
            self.address = address;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            address: format!("127.0.0.1:{}", tilehop::DEFAULT_PORT),
            start: Start { x: 100.0, y: 400.0 },
        }
    }
}
