use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Ждать одного Ctrl+C и отменить токен.
///
/// Одноразовый слушатель: после первого сигнала задача завершается.
/// Повторный сигнал обрабатывается уже поведением runtime по умолчанию.
pub fn spawn_interrupt_listener(token: CancellationToken) -> JoinHandle<()> {
    spawn_cancel_on(tokio::signal::ctrl_c(), token)
}

/// Отменить токен, когда завершится `signal`.
///
/// Если токен отменили раньше (фатальная ошибка цикла), задача просто
/// выходит. Ошибка установки обработчика логируется, токен не трогается.
pub fn spawn_cancel_on<F>(signal: F, token: CancellationToken) -> JoinHandle<()>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            result = signal => match result {
                Ok(()) => {
                    tracing::info!("interrupt received, stopping after the current batch");
                    token.cancel();
                }
                Err(e) => {
                    tracing::error!(error = %e, "cannot listen for interrupt");
                }
            },
            _ = token.cancelled() => {}
        }
    })
}
