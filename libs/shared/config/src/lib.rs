use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub schedules_file: String,
    pub appointments_file: String,
    pub knowledge_base_file: String,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            schedules_file: "schedules.json".to_string(),
            appointments_file: "appointments.json".to_string(),
            knowledge_base_file: "knowledge_base.json".to_string(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            data_dir: env::var("CLINIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using current directory");
                    defaults.data_dir.clone()
                }),
            schedules_file: env::var("SCHEDULES_FILE")
                .unwrap_or_else(|_| defaults.schedules_file.clone()),
            appointments_file: env::var("APPOINTMENTS_FILE")
                .unwrap_or_else(|_| defaults.appointments_file.clone()),
            knowledge_base_file: env::var("KNOWLEDGE_BASE_FILE")
                .unwrap_or_else(|_| defaults.knowledge_base_file.clone()),
            host: match env::var("HOST") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("HOST '{}' is not a valid IP address, using default", raw);
                    defaults.host
                }),
                Err(_) => defaults.host,
            },
            port: match env::var("PORT") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("PORT '{}' is not a valid port, using default", raw);
                    defaults.port
                }),
                Err(_) => defaults.port,
            },
        };

        if !config.is_configured() {
            warn!(
                "Schedule document not found at {} - availability queries will fail",
                config.schedules_path().display()
            );
        }

        config
    }

    /// Config rooted at `data_dir` with default file names, used by tests and tooling.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn schedules_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedules_file)
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.data_dir.join(&self.appointments_file)
    }

    pub fn knowledge_base_path(&self) -> PathBuf {
        self.data_dir.join(&self.knowledge_base_file)
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_configured(&self) -> bool {
        self.schedules_path().is_file()
    }
}
