use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use hanzi_algo::SchedulerParams;

use crate::db::config::StoreConfig;
use crate::logging::LogSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log: LogSettings,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub store: StoreConfig,
    pub scheduler: SchedulerParams,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let data_dir = env_path("DATA_DIR").unwrap_or_else(|| PathBuf::from("./data"));
        let static_dir = env_path("STATIC_DIR").unwrap_or_else(|| PathBuf::from("."));

        Self {
            host,
            port,
            log: LogSettings::from_env(),
            data_dir,
            static_dir,
            store: StoreConfig::from_env(),
            scheduler: scheduler_params_from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Scheduler quotas, each overridable by env; bad values keep the default.
pub fn scheduler_params_from_env() -> SchedulerParams {
    let defaults = SchedulerParams::default();

    let forget_threshold = std::env::var("FORGET_THRESHOLD")
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| *value > 0.0 && *value < 1.0)
        .unwrap_or(defaults.forget_threshold);

    SchedulerParams {
        forget_threshold,
        max_total_questions: env_usize("MAX_TOTAL_QUESTIONS", defaults.max_total_questions),
        near_due_pick: env_usize("NEAR_DUE_PICK", defaults.near_due_pick),
        current_lesson_quota: env_usize("CURRENT_LESSON_QUOTA", defaults.current_lesson_quota),
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
