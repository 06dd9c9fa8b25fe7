use std::future::Future;
use std::pin::Pin;

mod error;
mod types;

pub use error::{ErrorKind, ProviderError};
pub use types::{Base64Bytes, MessageAttribute, RawMessage, Record};

// ════════════════════════════════════════════════════════════════
//  Queue side
// ════════════════════════════════════════════════════════════════

/// Клиент очереди: выдаёт очередную пачку сообщений из одной, заранее
/// сконфигурированной очереди.
///
/// Пустая пачка — нормальный результат, а не признак конца очереди.
/// Реализации не валидируют сообщения, это делает pipeline.
pub trait QueueClient: Send + Sync {
    /// Получить до N сообщений (N задаётся конфигурацией клиента).
    fn fetch_batch(&self) -> Pin<Box<dyn Future<Output = Result<Vec<RawMessage>, ProviderError>> + Send + '_>>;

    /// Адрес очереди (для логирования).
    fn address(&self) -> &str;
}

// ════════════════════════════════════════════════════════════════
//  Sink side
// ════════════════════════════════════════════════════════════════

/// Append-only приёмник строк.
///
/// Все методы **блокирующие**. `append` возвращается только когда байты
/// целиком записаны, либо с ошибкой.
pub trait RecordSink: Send {
    /// Дописать одну строку (вместе с завершающим `\n`).
    fn append(&mut self, line: &[u8]) -> std::io::Result<()>;

    /// Сбросить буферы перед штатным завершением.
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn append(&mut self, line: &[u8]) -> std::io::Result<()> {
        (**self).append(line)
    }

    fn close(&mut self) -> std::io::Result<()> {
        (**self).close()
    }
}
