use std::sync::OnceLock;

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer + unit that emitted a log line
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// One log line with optional `key=value` context (asset, generation, url, ...)
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &'static str, value: impl std::fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    pub fn format_line(&self) -> String {
        let timestamp = get_time_provider().format_timestamp(self.timestamp);
        let mut line = format!("[{}] {} {} | {}", timestamp, self.level, self.component, self.message);
        if !self.fields.is_empty() {
            let context: Vec<String> = self.fields.iter().map(|(key, value)| format!("{key}={value}")).collect();
            line.push_str(" | ");
            line.push_str(&context.join(" "));
        }
        line
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Log sink. Level filtering happens in [`LevelFilter`], sinks only write.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Lets callers skip building messages nobody will see
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }
}

/// Drops entries below `min_level` before they reach the sink
pub struct LevelFilter {
    sink: Box<dyn Logger>,
    min_level: LogLevel,
}

impl LevelFilter {
    pub fn new(sink: Box<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }
}

impl Logger for LevelFilter {
    fn log(&self, entry: LogEntry) {
        if self.enabled(entry.level) {
            self.sink.log(entry);
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

static GLOBAL_LOGGER: OnceLock<LevelFilter> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the global sink behind a level filter. Later calls are ignored.
pub fn init_logger(sink: Box<dyn Logger>, min_level: LogLevel) {
    let _ = GLOBAL_LOGGER.set(LevelFilter::new(sink, min_level));
}

/// Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    match GLOBAL_LOGGER.get() {
        Some(filter) => filter as &dyn Logger,
        None => &NoOpLogger,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&BasicTimeProvider)
}

struct NoOpLogger;
impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Monotonic counter, used until the browser clock is installed (and in native tests)
struct BasicTimeProvider;
impl TimeProvider for BasicTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

/// Debug-build only; the message is not formatted when debug is filtered out
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            let logger = $crate::domain::logging::get_logger();
            if logger.enabled($crate::domain::logging::LogLevel::Debug) {
                logger.debug($component, &format!($($arg)*));
            }
        }
    };
}
