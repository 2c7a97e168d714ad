//! Logging setup: console always, size-rotated file optionally.

use std::path::Path;
use std::sync::Mutex;

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Per-file cap before the writer rotates.
const MAX_LOG_BYTES: usize = 1024 * 1024;
/// Rotated files kept beside the live one; older ones are removed.
const MAX_LOG_FILES: usize = 50;

/// Install the global subscriber.
///
/// Console output is always on. When `log_dir` is given, the same events
/// also go to `<log_dir>/rolodex.log`, rotated at [`MAX_LOG_BYTES`] with
/// at most [`MAX_LOG_FILES`] rotated files kept. The log file itself is
/// only created on the first write.
pub fn init(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer();

    match log_dir {
        Some(dir) => {
            let rotate = FileRotate::new(
                dir.join("rolodex.log"),
                AppendCount::new(MAX_LOG_FILES),
                ContentLimit::Bytes(MAX_LOG_BYTES),
                Compression::None,
                None,
            );
            let file = fmt::layer().with_ansi(false).with_writer(Mutex::new(rotate));
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
        }
    }
}
