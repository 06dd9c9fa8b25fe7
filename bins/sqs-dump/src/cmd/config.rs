use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use serde::Deserialize;

use pipeline::config::{PollSettings, RetryPolicy, SinkSettings};
use queue_sqs::SqsSettings;

use super::error::DumpError;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

/// Необязательный TOML с несекретными настройками.
/// Ключи доступа сюда не попадают — только env или флаги.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub region: Option<String>,
    pub queue_url: Option<String>,
    pub endpoint_url: Option<String>,
    pub output: Option<PathBuf>,
    pub include_attributes: Option<bool>,
    pub max_messages: Option<i32>,
    pub wait_time_seconds: Option<i32>,
    pub idle_backoff_ms: Option<u64>,
    pub sync: Option<bool>,
    pub progress: Option<bool>,
    pub retry: Option<RetryPolicy>,
}

pub fn load_config(path: &str) -> Result<Config, DumpError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| DumpError::Config(format!("cannot read config {path}: {e}")))?;
    toml::from_str(&content).map_err(|e| DumpError::Config(format!("bad config {path}: {e}")))
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug, Default)]
pub struct DumpArgs {
    /// Путь к sqs-dump.toml (может отсутствовать)
    #[arg(long, default_value = "sqs-dump.toml", env = "SQS_DUMP_CONFIG")]
    pub config: String,

    /// AWS region очереди
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Для временных credentials (STS)
    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// URL очереди, напр. https://sqs.eu-west-1.amazonaws.com/123456789012/orders
    #[arg(long, env = "SQS_QUEUE_URL")]
    pub queue_url: Option<String>,

    /// Свой endpoint (LocalStack, ElasticMQ)
    #[arg(long, env = "SQS_DUMP_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Выходной NDJSON файл [default: messages.json]
    #[arg(long, env = "SQS_DUMP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Запрашивать и сохранять атрибуты сообщений [default: true]
    #[arg(long, env = "SQS_DUMP_INCLUDE_ATTRIBUTES")]
    pub include_attributes: Option<bool>,

    /// Сообщений за один ReceiveMessage, 1..=10 [default: 10]
    #[arg(long, env = "SQS_DUMP_MAX_MESSAGES")]
    pub max_messages: Option<i32>,

    /// Long polling, 0..=20 секунд [default: 0]
    #[arg(long, env = "SQS_DUMP_WAIT_TIME_SECONDS")]
    pub wait_time_seconds: Option<i32>,

    /// Пауза после пустой пачки в мс [default: 0]
    #[arg(long, env = "SQS_DUMP_IDLE_BACKOFF_MS")]
    pub idle_backoff_ms: Option<u64>,

    /// fsync после каждой записи [default: false]
    #[arg(long, env = "SQS_DUMP_SYNC")]
    pub sync: Option<bool>,

    /// Печатать `.` в stdout на каждую записанную строку [default: true]
    #[arg(long, env = "SQS_DUMP_PROGRESS")]
    pub progress: Option<bool>,

    /// Всего попыток fetch подряд, включая первую; 1 отключает повторы [default: 5]
    #[arg(long, env = "SQS_DUMP_RETRY_ATTEMPTS")]
    pub retry_attempts: Option<u32>,

    /// Первая пауза перед повтором в мс [default: 200]
    #[arg(long, env = "SQS_DUMP_RETRY_INITIAL_MS")]
    pub retry_initial_ms: Option<u64>,

    /// Максимальная пауза перед повтором в мс [default: 10000]
    #[arg(long, env = "SQS_DUMP_RETRY_MAX_MS")]
    pub retry_max_ms: Option<u64>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговая конфигурация после мержа: sqs-dump.toml < env/CLI.
///
/// Строится и валидируется до любого обращения к сети или к выходному файлу.
pub struct Effective {
    pub sqs: SqsSettings,
    pub sink: SinkSettings,
    pub poll: PollSettings,
    pub include_attributes: bool,
    pub progress: bool,
}

impl Effective {
    pub fn new(args: &DumpArgs) -> Result<Self, DumpError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                Config::default()
            }
        };

        let region = required(args.region.clone().or(cfg.region), "queue region", "AWS_REGION", "region")?;
        let access_key_id =
            required(args.access_key_id.clone(), "access key id", "AWS_ACCESS_KEY_ID", "access-key-id")?;
        let secret_access_key = required(
            args.secret_access_key.clone(),
            "secret access key",
            "AWS_SECRET_ACCESS_KEY",
            "secret-access-key",
        )?;
        let queue_url = required(args.queue_url.clone().or(cfg.queue_url), "queue URL", "SQS_QUEUE_URL", "queue-url")?;
        validate_url("queue URL", &queue_url)?;

        let endpoint_url = args.endpoint_url.clone().or(cfg.endpoint_url).filter(|s| !s.is_empty());
        if let Some(ref endpoint) = endpoint_url {
            validate_url("endpoint URL", endpoint)?;
        }

        let include_attributes = args.include_attributes.or(cfg.include_attributes).unwrap_or(true);

        let sqs = SqsSettings {
            region,
            access_key_id,
            secret_access_key,
            session_token: args.session_token.clone().filter(|s| !s.is_empty()),
            queue_url,
            endpoint_url,
            max_messages: args.max_messages.or(cfg.max_messages).unwrap_or(queue_sqs::MAX_BATCH),
            wait_time_seconds: args.wait_time_seconds.or(cfg.wait_time_seconds).unwrap_or(0),
            include_attributes,
        };
        sqs.validate().map_err(DumpError::Config)?;

        let file_retry = cfg.retry.unwrap_or_default();
        let retry = RetryPolicy {
            attempts: args.retry_attempts.unwrap_or(file_retry.attempts),
            initial_ms: args.retry_initial_ms.unwrap_or(file_retry.initial_ms),
            max_ms: args.retry_max_ms.unwrap_or(file_retry.max_ms),
            multiplier: file_retry.multiplier,
        };
        retry.validate().map_err(DumpError::Config)?;

        let poll = PollSettings {
            idle_backoff: Duration::from_millis(args.idle_backoff_ms.or(cfg.idle_backoff_ms).unwrap_or(0)),
            retry,
        };

        let sink = SinkSettings {
            path: args.output.clone().or(cfg.output).unwrap_or_else(|| PathBuf::from("messages.json")),
            sync: args.sync.or(cfg.sync).unwrap_or(false),
        };

        let progress = args.progress.or(cfg.progress).unwrap_or(true);

        Ok(Self { sqs, sink, poll, include_attributes, progress })
    }
}

/// Пустое значение считается отсутствующим, пробелы по краям срезаются.
fn required(
    value: Option<String>,
    name: &'static str,
    env: &'static str,
    flag: &'static str,
) -> Result<String, DumpError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(DumpError::Missing { name, env, flag })
}

fn validate_url(name: &str, value: &str) -> Result<(), DumpError> {
    let parsed = url::Url::parse(value).map_err(|e| DumpError::Config(format!("invalid {name} '{value}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DumpError::Config(format!("invalid {name} '{value}': unsupported scheme '{other}'"))),
    }
}
