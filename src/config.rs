use std::env;

use chrono::NaiveTime;
use chrono_tz::Tz;
use dotenvy::dotenv;

use crate::engine::EngineConfig;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub api_prefix: String,

    // Diagnostics console
    pub console_username: String,
    pub console_password: String,
    pub rate_console_per_min: u32,

    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let device_tz: Tz = env::var("DEVICE_TZ")
            .unwrap_or_else(|_| "Asia/Karachi".to_string())
            .parse()
            .expect("DEVICE_TZ must be a valid IANA timezone");

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            console_username: env::var("CONSOLE_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            console_password: env::var("CONSOLE_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
            rate_console_per_min: env::var("RATE_CONSOLE_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            engine: EngineConfig {
                device_tz,
                night_shift_start: clock_from_env("NIGHT_SHIFT_START", "21:00"),
                night_shift_end: clock_from_env("NIGHT_SHIFT_END", "06:00"),
                late_grace_minutes: env::var("LATE_GRACE_MINUTES")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .unwrap(),
                night_cutoff_hour: env::var("NIGHT_CUTOFF_HOUR")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap(),
            },
        }
    }
}

fn clock_from_env(key: &str, default: &str) -> NaiveTime {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .unwrap_or_else(|_| panic!("{key} must be HH:MM, got {raw:?}"))
}
