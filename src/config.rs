use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub media: MediaConfig,
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    /// Capture device to wire in: "synthetic" or "none"
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub audio: bool,
    /// Chunk cadence of the synthetic device
    pub chunk_interval_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// Redirect target handed back on test submission
    pub listing_route: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
