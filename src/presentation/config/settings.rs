use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub transcription: TranscriptionSettings,
    pub vad: VadSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub model: String,
    pub api_token: Option<String>,
    pub base_url: Option<String>,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct VadSettings {
    pub silence_threshold: f32,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                port: env_parsed("SERVER_PORT", 3000),
            },
            database: DatabaseSettings {
                url: env_or("DATABASE_URL", "sqlite:transcriptions.db?mode=rwc"),
                // A single writer connection keeps record ids strictly ordered.
                max_connections: 1,
            },
            transcription: TranscriptionSettings {
                model: env_or("WHISPER_MODEL", "openai/whisper-tiny"),
                // A missing token degrades to unauthenticated calls; it must
                // not prevent startup.
                api_token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
                base_url: std::env::var("HF_API_BASE_URL").ok(),
                max_retries: env_parsed("HF_MAX_RETRIES", 5),
                retry_delay: Duration::from_secs(env_parsed("HF_RETRY_DELAY", 2)),
            },
            vad: VadSettings {
                silence_threshold: env_parsed("VAD_THRESHOLD", 0.3f32).clamp(0.0, 1.0),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
