pub mod config;
pub mod error;
mod poll;
mod record;
mod signal;
mod sink;

pub use error::{BuildError, PipelineError};
pub use poll::{PollLoop, PollSummary};
pub use record::RecordBuilder;
pub use signal::{spawn_cancel_on, spawn_interrupt_listener};
pub use sink::{FileSink, ProgressSink};
