use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{filter::FilterFn, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// Returns true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

// -------- per-target level plan --------

/// Resolved sink levels of one config section. `None` = sink disabled.
#[derive(Debug, Clone)]
struct SinkLevels {
    console: Option<Level>,
    file: Option<Level>,
}

impl SinkLevels {
    fn from_section(section: &Section) -> Self {
        let file = if section.file.trim().is_empty() {
            None
        } else {
            parse_tracing_level(&section.file_level)
        };
        Self {
            console: parse_tracing_level(&section.console_level),
            file,
        }
    }

    const OFF: SinkLevels = SinkLevels {
        console: None,
        file: None,
    };
}

#[derive(Debug, Clone)]
struct LevelPlan {
    default: SinkLevels,
    by_crate: Vec<(String, SinkLevels)>,
}

impl LevelPlan {
    fn from_config(cfg: &LoggingConfig) -> Self {
        let default = cfg
            .get(DEFAULT_SECTION)
            .map(SinkLevels::from_section)
            .unwrap_or(SinkLevels::OFF);
        let by_crate = cfg
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
            .map(|(k, v)| (k.clone(), SinkLevels::from_section(v)))
            .collect();
        Self { default, by_crate }
    }

    /// Explicit crate sections win over "default" for every sink.
    fn levels_for(&self, target: &str) -> &SinkLevels {
        self.by_crate
            .iter()
            .find(|(name, _)| matches_crate_prefix(target, name))
            .map(|(_, levels)| levels)
            .unwrap_or(&self.default)
    }

    fn console_enabled(&self, meta: &tracing::Metadata<'_>) -> bool {
        self.levels_for(meta.target())
            .console
            .is_some_and(|max| meta.level() <= &max)
    }

    fn file_enabled(&self, meta: &tracing::Metadata<'_>) -> bool {
        self.levels_for(meta.target())
            .file
            .is_some_and(|max| meta.level() <= &max)
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file writer poisoned"))?
            .flush()
    }
}

// A writer handle that may be None (drops writes)
struct RoutedWriter(Option<RotWriter>);

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            // pretend we wrote everything
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes log records to files by target prefix, falling back to the
/// "default" file.
#[derive(Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn build(cfg: &LoggingConfig, base_dir: &Path) -> Self {
        let mut router = FileRouter::default();
        for (name, section) in cfg {
            let Some(writer) = open_section_file(name, section, base_dir) else {
                continue;
            };
            if name == DEFAULT_SECTION {
                router.default = Some(writer);
            } else {
                router.by_prefix.insert(name.clone(), writer);
            }
        }
        router
    }

    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(name, _)| matches_crate_prefix(target, name))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedWriter(self.resolve_for(meta.target()))
    }
}

// -------- path resolution helpers --------

/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Size threshold for rotation; 100 MiB when unset, saturating on overflow.
fn max_bytes_for(section: &Section) -> usize {
    let bytes = section.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// `max_age_days` wins over `max_backups` when both are set.
fn file_limit_for(section: &Section) -> FileLimit {
    match section.max_age_days {
        Some(days) => FileLimit::Age(chrono::Duration::days(i64::from(days.max(1)))),
        None => FileLimit::MaxFiles(section.max_backups.unwrap_or(3).max(1)),
    }
}

fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    file_limit: FileLimit,
) -> io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(file_limit),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn open_section_file(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let log_path = resolve_log_path(&section.file, base_dir);
    let max_bytes = max_bytes_for(section);

    match create_rotating_writer_at_path(&log_path, max_bytes, file_limit_for(section)) {
        Ok(writer) => Some(writer),
        Err(e) => {
            // No subscriber yet, so stderr is the only channel.
            eprintln!(
                "Failed to init log file for subsystem '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: subsystem → section map, "default" is the catch-all
/// - `base_dir`: base directory used to resolve relative log file paths (usually app.home_dir)
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let plan = Arc::new(LevelPlan::from_config(cfg));
    let router = FileRouter::build(cfg, base_dir);
    let ansi = atty::is(atty::Stream::Stdout);

    let console_plan = Arc::clone(&plan);
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(FilterFn::new(move |meta| console_plan.console_enabled(meta)));

    let file_layer = (!router.is_empty()).then(|| {
        let file_plan = Arc::clone(&plan);
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(router)
            .with_filter(FilterFn::new(move |meta| file_plan.file_enabled(meta)))
    });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

// =================== tests ===================
