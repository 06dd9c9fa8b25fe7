use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use dump_api::RecordSink;

use crate::config::SinkSettings;
use crate::PipelineError;

// ════════════════════════════════════════════════════════════════
//  FileSink
// ════════════════════════════════════════════════════════════════

/// Append-only NDJSON файл.
///
/// Открывается один раз при старте (create + append, без truncate).
/// Каждая строка пишется одним `write_all`, поэтому строки разных вызовов
/// не перемешиваются. Файл закрывается в `Drop` на любом пути выхода.
pub struct FileSink {
    path: PathBuf,
    file: File,
    sync: bool,
}

impl FileSink {
    pub fn open(settings: &SinkSettings) -> Result<Self, PipelineError> {
        let file = open_append(&settings.path)
            .map_err(|e| PipelineError::SinkOpen { path: settings.path.clone(), source: e })?;
        tracing::info!(path = %settings.path.display(), sync = settings.sync, "opened output file");
        Ok(Self { path: settings.path.clone(), file, sync: settings.sync })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn open_append(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    std::fs::OpenOptions::new().create(true).append(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn open_append(path: &Path) -> std::io::Result<File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

impl RecordSink for FileSink {
    fn append(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.file.write_all(line)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_data()?;
        }
        Ok(())
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}

// ════════════════════════════════════════════════════════════════
//  ProgressSink
// ════════════════════════════════════════════════════════════════

/// Печатает `.` в `out` после каждой записанной строки.
///
/// Ошибка вывода прогресса не фатальна: запись уже на диске.
pub struct ProgressSink<S, W> {
    inner: S,
    out: W,
    dots: u64,
}

impl<S: RecordSink, W: Write + Send> ProgressSink<S, W> {
    pub fn new(inner: S, out: W) -> Self {
        Self { inner, out, dots: 0 }
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.out.write_all(bytes).and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "progress output failed");
        }
    }
}

impl<S: RecordSink, W: Write + Send> RecordSink for ProgressSink<S, W> {
    fn append(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.inner.append(line)?;
        self.dots += 1;
        self.emit(b".");
        Ok(())
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.inner.close()?;
        if self.dots > 0 {
            self.emit(b"\n");
        }
        Ok(())
    }
}
