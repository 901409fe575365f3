use parking_lot::Mutex;
/// Debug logging for fontkeep
///
/// Every `log::info!()` / `log::debug!()` etc. from fontkeep and its crates
/// is routed through a `log::Log` bridge into a session log file:
/// /tmp/fontkeep_debug.log on Unix/macOS, %TEMP%\fontkeep_debug.log on
/// Windows. When RUST_LOG is set, records are mirrored to stderr as well.
///
/// Level precedence:
/// - `--log-level` on the command line
/// - DEBUG_LEVEL environment variable:
///   - 0 or unset: No debugging
///   - 1: Errors only
///   - 2: Info level (loads, shutdown)
///   - 3: Debug level (cache traffic, handle lifecycle)
///   - 4: Trace level (every operation)
/// - RUST_LOG when it names a plain level (e.g. `debug`)
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Option<Self> {
        let val = std::env::var("DEBUG_LEVEL").ok()?;
        Self::from_number(&val)
    }

    fn from_number(val: &str) -> Option<Self> {
        match val.trim().parse::<u8>() {
            Ok(0) => Some(DebugLevel::Off),
            Ok(1) => Some(DebugLevel::Error),
            Ok(2) => Some(DebugLevel::Info),
            Ok(3) => Some(DebugLevel::Debug),
            Ok(4) => Some(DebugLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }

    fn from_level(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }
}

/// Pick the effective level filter.
///
/// `cli` wins, then DEBUG_LEVEL (`debug_level`), then RUST_LOG (`rust_log`)
/// when it is a bare level name. Anything else is `Off`.
pub fn resolve_level(
    cli: Option<log::LevelFilter>,
    debug_level: Option<&str>,
    rust_log: Option<&str>,
) -> log::LevelFilter {
    if let Some(level) = cli {
        return level;
    }
    if let Some(level) = debug_level.and_then(DebugLevel::from_number) {
        return level.to_level_filter();
    }
    rust_log
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Off)
}

/// Location of the session log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let log_path = PathBuf::from("/tmp/fontkeep_debug.log");
    #[cfg(not(unix))]
    let log_path = std::env::temp_dir().join("fontkeep_debug.log");
    log_path
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(level: DebugLevel, mirror_stderr: bool) -> Self {
        let file = if level != DebugLevel::Off {
            match OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
            {
                Ok(f) => Some(f),
                // Logging must never take the tool down
                Err(_e) => None,
            }
        } else {
            None
        };

        let mut logger = DebugLogger {
            level,
            file,
            mirror_stderr,
        };
        if logger.file.is_some() {
            logger.write_raw(&format!(
                "\n{}\nfontkeep debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                level,
                "=".repeat(80)
            ));
        }
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level > self.level {
            return;
        }
        let level_str = match level {
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
            DebugLevel::Off => return,
        };
        let line = format!("[{}] [{}] [{}] {}\n", get_timestamp(), level_str, category, msg);
        self.write_raw(&line);
        if self.mirror_stderr {
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| {
        let level = DebugLevel::from_env().unwrap_or(DebugLevel::Off);
        Mutex::new(DebugLogger::new(level, false))
    })
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// `log` facade backend writing into the debug log.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = match record.level() {
            log::Level::Warn => format!("WARN: {}", record.args()),
            _ => format!("{}", record.args()),
        };
        log(
            DebugLevel::from_level(record.level()),
            record.target(),
            &msg,
        );
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

/// Install the `log` bridge.
///
/// Safe to call more than once; only the first call installs the backend.
/// Returns the effective level filter.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) -> log::LevelFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let debug_level = std::env::var("DEBUG_LEVEL").ok();
    let filter = resolve_level(cli_level, debug_level.as_deref(), rust_log.as_deref());

    let level = match filter.to_level() {
        None => DebugLevel::Off,
        Some(level) => DebugLevel::from_level(level),
    };
    let mirror_stderr = rust_log.is_some();
    {
        let mut logger = get_logger().lock();
        if logger.file.is_none() && level != DebugLevel::Off {
            *logger = DebugLogger::new(level, mirror_stderr);
        } else {
            logger.level = level;
            logger.mirror_stderr = mirror_stderr;
        }
    }

    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(filter);
    }
    filter
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}
