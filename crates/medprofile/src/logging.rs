#[cfg(feature = "native")]
pub use native::init_logging;

#[cfg(feature = "native")]
mod native {
    use std::fs::{self, File, OpenOptions};
    use std::io::{Read, Seek, SeekFrom, Write};
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    /// Log file name inside the data directory
    pub const LOG_FILE: &str = "medprofile.log";
    /// Maximum log file size before rotation (5 MB)
    const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
    /// Size to keep after rotation (1 MB of most recent logs)
    const KEEP_SIZE: u64 = 1024 * 1024;

    /// Rotate log file if it exceeds `max_size`, keeping the last `keep` bytes
    /// starting from a line boundary.
    pub(super) fn rotate_log_if_needed(
        log_path: &Path,
        max_size: u64,
        keep: u64,
    ) -> std::io::Result<()> {
        if !log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(log_path)?;
        if metadata.len() <= max_size {
            return Ok(());
        }

        let mut file = File::open(log_path)?;
        let start_pos = metadata.len().saturating_sub(keep);

        file.seek(SeekFrom::Start(start_pos))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        drop(file);

        // Skip to the first newline to avoid partial lines
        let skip = buffer
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);

        let mut file = File::create(log_path)?;
        file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
        file.write_all(&buffer[skip..])?;

        Ok(())
    }

    /// A writer factory that produces writers for the shared log file
    #[derive(Clone)]
    struct LogWriterFactory {
        file: Arc<Mutex<File>>,
    }

    /// A writer that holds a reference to the shared file
    struct LogWriter {
        file: Arc<Mutex<File>>,
    }

    impl Write for LogWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            match self.file.lock() {
                Ok(mut file) => file.write(buf),
                // Poisoned by a panic mid-write; the file itself is still usable
                Err(poisoned) => poisoned.into_inner().write(buf),
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            match self.file.lock() {
                Ok(mut file) => file.flush(),
                Err(poisoned) => poisoned.into_inner().flush(),
            }
        }
    }

    impl<'a> MakeWriter<'a> for LogWriterFactory {
        type Writer = LogWriter;

        fn make_writer(&'a self) -> Self::Writer {
            LogWriter {
                file: self.file.clone(),
            }
        }
    }

    /// Initialize logging to write to a file in the data directory.
    ///
    /// Logs are written to `{data_dir}/medprofile.log`. When the log exceeds
    /// 5MB, older entries are removed keeping only the last 1MB. `RUST_LOG`
    /// overrides `level` when set.
    pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
        fs::create_dir_all(data_dir)?;

        let log_path = data_dir.join(LOG_FILE);

        if let Err(e) = rotate_log_if_needed(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
            eprintln!("Warning: Failed to rotate log file: {}", e);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let writer_factory = LogWriterFactory {
            file: Arc::new(Mutex::new(file)),
        };

        let default_filter = format!("medprofile={level},medprofile_core={level}");
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(writer_factory)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()?;

        tracing::info!(log_path = %log_path.display(), "Logging initialized");
        Ok(())
    }
}

/// Send `tracing` output to the browser console.
#[cfg(feature = "web")]
pub fn init_logging_web() {
    tracing_wasm::set_as_global_default();
}
