// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Default log file used when a file writer is requested without a path.
pub const DEFAULT_LOG_FILE_PATH: &str = "sb_buffer_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level, and whether the subscriber
/// is installed globally or only for the current thread.
///
/// You can use the [`crate::init_tracing()`] to initialize the tracing system with this
/// configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
    pub scope: TracingScope,
}

/// - `String` is the file path to use for the log file. Eg: `/tmp/sb_buffer_log.txt`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// Where the subscriber is installed.
/// - [`TracingScope::Global`] can't be unset or changed once set. Great for apps.
/// - [`TracingScope::ThreadLocal`] lasts as long as the returned guard. Great for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingScope {
    #[default]
    Global,
    ThreadLocal,
}

impl TracingConfig {
    /// Log to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new_file_and_display(
        filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level: tracing::Level::DEBUG,
            scope: TracingScope::default(),
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level: tracing::Level::DEBUG,
            scope: TracingScope::default(),
        }
    }

    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level: tracing::Level::DEBUG,
            scope: TracingScope::default(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: TracingScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_constructors() {
        let config = TracingConfig::new_file(None);
        assert_eq2!(
            config.get_writer_config(),
            WriterConfig::File(DEFAULT_LOG_FILE_PATH.to_string())
        );
        assert_eq2!(config.get_level_filter(), LevelFilter::DEBUG);
        assert_eq2!(config.scope, TracingScope::Global);

        let config = TracingConfig::new_file_and_display(
            Some("/tmp/foo.log".to_string()),
            DisplayPreference::Stderr,
        );
        assert_eq2!(
            config.get_writer_config(),
            WriterConfig::DisplayAndFile(
                DisplayPreference::Stderr,
                "/tmp/foo.log".to_string()
            )
        );
    }

    #[test]
    fn test_builders() {
        let config = TracingConfig::new_display(DisplayPreference::Stdout)
            .with_level(tracing::Level::WARN)
            .with_scope(TracingScope::ThreadLocal);
        assert_eq2!(config.get_level_filter(), LevelFilter::WARN);
        assert_eq2!(config.scope, TracingScope::ThreadLocal);
    }
}
