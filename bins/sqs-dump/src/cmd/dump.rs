use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use dump_api::RecordSink;
use pipeline::{FileSink, PollLoop, PollSummary, ProgressSink, RecordBuilder};
use queue_sqs::SqsQueue;

use super::config::Effective;
use super::error::DumpError;

// ═══════════════════════════════════════════════════════════════
//  run — открыть файл, поднять клиент, крутить цикл до Ctrl+C
// ═══════════════════════════════════════════════════════════════

pub async fn run(eff: Effective) -> Result<PollSummary, DumpError> {
    let queue = SqsQueue::new(&eff.sqs)?;
    let sink = FileSink::open(&eff.sink)?;

    tracing::info!(
        output = %sink.path().display(),
        sync = eff.sink.sync,
        progress = eff.progress,
        "appending records"
    );
    let sink: Box<dyn RecordSink> = if eff.progress {
        Box::new(ProgressSink::new(sink, std::io::stdout()))
    } else {
        Box::new(sink)
    };

    let token = CancellationToken::new();
    let listener = pipeline::spawn_interrupt_listener(token.clone());

    let poll = PollLoop::new(
        Arc::new(queue),
        sink,
        RecordBuilder::new(eff.include_attributes),
        eff.poll,
        token.clone(),
    );
    let result = poll.run().await;

    // После фатальной ошибки слушатель ещё ждёт сигнала.
    token.cancel();
    if let Err(e) = listener.await {
        tracing::warn!(error = %e, "interrupt listener task failed");
    }

    Ok(result?)
}
