use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tilehop::math::units::world::*;
use tilehop::DEFAULT_PORT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: String,
    pub port: u16,
    pub start: Start,
    pub map: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0".to_owned(),
            port: DEFAULT_PORT,
            start: Start { x: 100.0, y: 100.0 },
            map: PathBuf::from("maps/map.json"),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Reads `config.toml` if there is one, then applies `PORT`.
    pub fn load() -> Result<Self> {
        let config = match std::fs::read_to_string(Self::path()) {
            Ok(contents) => Self::from_toml(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e).context("read config"),
        };

        config.with_port_override(std::env::var("PORT").ok().as_deref())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self> {
        if let Some(port) = port {
            self.port = port.trim().parse().with_context(|| format!("invalid PORT {port:?}"))?;
        }
        Ok(self)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Start {
    pub x: f32,
    pub y: f32,
}

impl Start {
    pub fn position(&self) -> Point2D<f32> {
        Point2D::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_toml("port = 4000\n[start]\nx = 5.0\ny = 6.0\n").unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.start.position(), Point2D::new(5.0, 6.0));
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.address(), "0.0.0.0:4000");
    }

    #[test]
    fn port_override() {
        let config = Config::default().with_port_override(Some("8080")).unwrap();
        assert_eq!(config.port, 8080);

        assert!(Config::default().with_port_override(Some("http")).is_err());
        assert_eq!(Config::default().with_port_override(None).unwrap().port, DEFAULT_PORT);
    }
}
