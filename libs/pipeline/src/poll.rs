use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use dump_api::{QueueClient, RawMessage, RecordSink};

use crate::config::PollSettings;
use crate::record::RecordBuilder;
use crate::PipelineError;

// ═══════════════════════════════════════════════════════════════
//  Poll loop — fetch → build → serialize → append
// ═══════════════════════════════════════════════════════════════

/// Итоги работы цикла после штатной остановки.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Успешных fetch'ей, включая пустые.
    pub batches: u64,
    pub empty_batches: u64,
    pub records: u64,
}

/// Цикл опроса очереди.
///
/// Два состояния: RUNNING и STOPPED. Остановка — либо по отмене токена
/// (проверяется только между итерациями и во время пауз), либо по фатальной
/// ошибке. Начатые fetch и запись всегда доходят до конца.
pub struct PollLoop {
    queue: Arc<dyn QueueClient>,
    sink: Box<dyn RecordSink>,
    builder: RecordBuilder,
    settings: PollSettings,
    token: CancellationToken,
}

impl PollLoop {
    pub fn new(
        queue: Arc<dyn QueueClient>,
        sink: Box<dyn RecordSink>,
        builder: RecordBuilder,
        settings: PollSettings,
        token: CancellationToken,
    ) -> Self {
        Self { queue, sink, builder, settings, token }
    }

    /// Крутиться до отмены токена. `Ok` — штатная остановка,
    /// `Err` — фатальная ошибка fetch, сборки или записи.
    pub async fn run(mut self) -> Result<PollSummary, PipelineError> {
        let mut summary = PollSummary::default();
        let mut failures: u32 = 0;

        tracing::info!(
            queue = %self.queue.address(),
            attributes = self.builder.include_attributes(),
            "polling started"
        );

        while !self.token.is_cancelled() {
            let batch = match self.queue.fetch_batch().await {
                Ok(batch) => {
                    failures = 0;
                    batch
                }
                Err(e) => {
                    failures += 1;
                    let queue = self.queue.address().to_string();
                    if !e.is_transient() {
                        return Err(PipelineError::Fetch { queue, source: e });
                    }
                    let retry = self.settings.retry;
                    if failures >= retry.attempts {
                        return Err(PipelineError::RetriesExhausted { queue, attempts: failures, source: e });
                    }
                    let delay = retry.backoff(failures);
                    tracing::warn!(
                        %queue,
                        error = %e,
                        attempt = failures,
                        backoff_ms = delay.as_millis() as u64,
                        "fetch failed, retrying"
                    );
                    if !pause(&self.token, delay).await {
                        break;
                    }
                    continue;
                }
            };

            summary.batches += 1;

            if batch.is_empty() {
                summary.empty_batches += 1;
                tracing::trace!("empty batch");
                let idle = self.settings.idle_backoff;
                if !idle.is_zero() && !pause(&self.token, idle).await {
                    break;
                }
                continue;
            }

            tracing::debug!(batch_size = batch.len(), "received batch");
            for raw in batch {
                self.persist(raw)?;
                summary.records += 1;
            }
        }

        self.sink.close().map_err(PipelineError::SinkClose)?;
        tracing::info!(
            batches = summary.batches,
            empty_batches = summary.empty_batches,
            records = summary.records,
            "polling stopped"
        );
        Ok(summary)
    }

    fn persist(&mut self, raw: RawMessage) -> Result<(), PipelineError> {
        let record = self.builder.build(raw)?;
        let line = record
            .to_line()
            .map_err(|e| PipelineError::Serialize { message_id: record.id.clone(), source: e })?;
        self.sink
            .append(&line)
            .map_err(|e| PipelineError::SinkWrite { message_id: record.id.clone(), source: e })?;
        tracing::trace!(message_id = %record.id, bytes = line.len(), "record written");
        Ok(())
    }
}

/// Пауза, прерываемая отменой. `false` — токен отменён.
async fn pause(token: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = token.cancelled() => false,
    }
}
