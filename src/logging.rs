//! Structured logging for the burst client and target server
//!
//! Log lines always go to stderr so the client's stdout carries nothing but
//! its report. Console and JSON renderings are supported; entries carry a UTC
//! timestamp, structured fields and the run ID tying every line of one client
//! run together.

use crate::error::AppError;
use crate::models::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Shared logging context for session tracking
#[derive(Debug, Default)]
struct LogContext {
    /// Correlation ID attached to every entry
    session_id: Option<String>,
}

/// Logger implementation with multiple output formats
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a new logger that only reports warnings and above
    pub fn new(name: &str) -> Self {
        Self {
            min_level: LogLevel::Warn,
            use_color: false,
            format: LogFormat::Console,
            name: name.to_string(),
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger for the given verbosity flags
    pub fn for_verbosity(name: &str, verbose: bool, debug: bool, use_color: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color,
            format: if debug { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Start a correlated operation and make its ID the session ID
    pub async fn start_operation(&self, operation_name: &str) -> String {
        let correlation_id = Uuid::new_v4().to_string();
        self.set_session_id(correlation_id.clone()).await;

        self.info(&format!("Started operation: {}", operation_name))
            .field("operation", operation_name)
            .log()
            .await;

        correlation_id
    }

    /// End a correlated operation
    pub async fn end_operation(&self, operation_name: &str, success: bool) {
        self.info(&format!("Completed operation: {} (success: {})", operation_name, success))
            .field("operation", operation_name)
            .field("success", success)
            .log()
            .await;
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Render an entry with the shared context applied, or `None` if filtered out
    async fn render(&self, mut entry: LogEntry) -> Option<String> {
        if !self.would_log(entry.level) {
            return None;
        }

        entry.correlation_id = self.context.read().await.session_id.clone();

        Some(match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
        })
    }

    async fn write_entry(&self, entry: LogEntry) {
        if let Some(output) = self.render(entry).await {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if let Some(correlation_id) = &entry.correlation_id {
            let short = correlation_id.get(..8).unwrap_or(correlation_id);
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields_str: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields_str.sort();
            output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add run summary figures
    pub fn summary(self, summary: &RunSummary) -> Self {
        self.field("total", summary.total)
            .field("successes", summary.successes)
            .field("failures", summary.failures())
            .field("abandoned", summary.abandoned)
            .field("elapsed_secs", summary.elapsed_secs())
            .field("qps", summary.throughput())
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }

    #[cfg(test)]
    async fn render(self) -> Option<String> {
        self.logger.render(self.entry).await
    }
}
