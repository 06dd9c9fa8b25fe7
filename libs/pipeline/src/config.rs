use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

// ═══════════════════════════════════════════════════════════════
//  Retry Policy
// ═══════════════════════════════════════════════════════════════

/// Повторы для transient-ошибок fetch: экспоненциальный backoff.
///
/// `attempts` — общее число попыток fetch подряд, включая первую: при
/// `attempts = 5` пятая подряд неудача фатальна. Успешный fetch сбрасывает счётчик.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    #[serde(default = "default_retry_initial_ms")]
    pub initial_ms: u64,
    #[serde(default = "default_retry_max_ms")]
    pub max_ms: u64,
    #[serde(default = "default_retry_multiplier")]
    pub multiplier: f64,
}

fn default_retry_attempts() -> u32 {
    5
}
fn default_retry_initial_ms() -> u64 {
    200
}
fn default_retry_max_ms() -> u64 {
    10_000
}
fn default_retry_multiplier() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            initial_ms: default_retry_initial_ms(),
            max_ms: default_retry_max_ms(),
            multiplier: default_retry_multiplier(),
        }
    }
}

impl RetryPolicy {
    /// Без повторов: первая же ошибка фатальна.
    pub fn none() -> Self {
        Self { attempts: 1, ..Self::default() }
    }

    /// Пауза перед повтором номер `failures` (1 = после первой неудачи).
    pub fn backoff(&self, failures: u32) -> Duration {
        let exp = failures.saturating_sub(1).min(32) as i32;
        let ms = self.initial_ms as f64 * self.multiplier.max(1.0).powi(exp);
        Duration::from_millis((ms as u64).min(self.max_ms))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.attempts == 0 {
            return Err("retry attempts must be at least 1".into());
        }
        if self.initial_ms > self.max_ms {
            return Err(format!(
                "retry initial backoff ({}ms) exceeds max backoff ({}ms)",
                self.initial_ms, self.max_ms
            ));
        }
        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(format!("retry multiplier must be >= 1.0, got {}", self.multiplier));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Poll Settings
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct PollSettings {
    /// Пауза после пустой пачки. Ноль — сразу опрашивать снова.
    pub idle_backoff: Duration,
    pub retry: RetryPolicy,
}

// ═══════════════════════════════════════════════════════════════
//  Sink Settings
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct SinkSettings {
    pub path: PathBuf,
    /// fsync после каждой записи.
    pub sync: bool,
}

impl SinkSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), sync: false }
    }
}
