/*
 * Responsibility
 * - 環境変数からの設定読み込み (AUTH_CALLBACK_TIMEOUT_MS)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::time::Duration;

pub const CALLBACK_TIMEOUT_ENV: &str = "AUTH_CALLBACK_TIMEOUT_MS";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextConfig {
    /// How long `authenticate`/`login` wait for their callback.
    /// `None` waits for as long as the collaborator takes.
    pub callback_timeout: Option<Duration>,
}

impl ContextConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let callback_timeout = match std::env::var(CALLBACK_TIMEOUT_ENV) {
            Ok(raw) => parse_timeout_ms(&raw)?,
            Err(_) => None,
        };

        Ok(Self { callback_timeout })
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let ms = raw
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(CALLBACK_TIMEOUT_ENV))?;

    // 0 は「待ち続ける」扱い
    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}
