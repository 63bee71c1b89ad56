//! Structured diagnostic events
//!
//! The simulation never owns a logger. It is handed a [`Telemetry`]
//! collaborator and emits fire-and-forget events into it. Filtering,
//! buffering and export belong to the sink.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a telemetry event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl TelemetryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryLevel::Debug => "debug",
            TelemetryLevel::Info => "info",
            TelemetryLevel::Warning => "warning",
            TelemetryLevel::Error => "error",
        }
    }

    fn to_log_level(self) -> log::Level {
        match self {
            TelemetryLevel::Debug => log::Level::Debug,
            TelemetryLevel::Info => log::Level::Info,
            TelemetryLevel::Warning => log::Level::Warn,
            TelemetryLevel::Error => log::Level::Error,
        }
    }
}

/// Subsystem an event originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryCategory {
    Game,
    Character,
    Terrain,
    Collision,
    Input,
    Score,
}

impl TelemetryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryCategory::Game => "game",
            TelemetryCategory::Character => "character",
            TelemetryCategory::Terrain => "terrain",
            TelemetryCategory::Collision => "collision",
            TelemetryCategory::Input => "input",
            TelemetryCategory::Score => "score",
        }
    }

    /// `log` target used by [`LogTelemetry`]
    fn log_target(&self) -> &'static str {
        match self {
            TelemetryCategory::Game => "flappy_runner::game",
            TelemetryCategory::Character => "flappy_runner::character",
            TelemetryCategory::Terrain => "flappy_runner::terrain",
            TelemetryCategory::Collision => "flappy_runner::collision",
            TelemetryCategory::Input => "flappy_runner::input",
            TelemetryCategory::Score => "flappy_runner::score",
        }
    }
}

/// A single structured event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub level: TelemetryLevel,
    pub category: TelemetryCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl TelemetryEvent {
    pub fn new(level: TelemetryLevel, category: TelemetryCategory, message: impl Into<String>) -> Self {
        Self {
            level,
            category,
            message: message.into(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn debug(category: TelemetryCategory, message: impl Into<String>) -> Self {
        Self::new(TelemetryLevel::Debug, category, message)
    }

    pub fn info(category: TelemetryCategory, message: impl Into<String>) -> Self {
        Self::new(TelemetryLevel::Info, category, message)
    }
}

/// Sink for simulation diagnostics
pub trait Telemetry {
    /// Whether events of this level/category would be kept.
    /// The simulation skips building payloads when this returns false.
    fn enabled(&self, _level: TelemetryLevel, _category: TelemetryCategory) -> bool {
        true
    }

    fn emit(&mut self, event: TelemetryEvent);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl Telemetry for NullTelemetry {
    fn enabled(&self, _level: TelemetryLevel, _category: TelemetryCategory) -> bool {
        false
    }

    fn emit(&mut self, _event: TelemetryEvent) {}
}

/// Forwards events to the `log` facade, one target per category
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn enabled(&self, level: TelemetryLevel, category: TelemetryCategory) -> bool {
        log::log_enabled!(target: category.log_target(), level.to_log_level())
    }

    fn emit(&mut self, event: TelemetryEvent) {
        let target = event.category.log_target();
        let level = event.level.to_log_level();
        if event.data.is_null() {
            log::log!(target: target, level, "{}", event.message);
        } else {
            log::log!(target: target, level, "{} {}", event.message, event.data);
        }
    }
}

/// Collects every event, handy for inspecting a run after the fact
impl Telemetry for Vec<TelemetryEvent> {
    fn emit(&mut self, event: TelemetryEvent) {
        self.push(event);
    }
}

impl<T: Telemetry + ?Sized> Telemetry for &mut T {
    fn enabled(&self, level: TelemetryLevel, category: TelemetryCategory) -> bool {
        (**self).enabled(level, category)
    }

    fn emit(&mut self, event: TelemetryEvent) {
        (**self).emit(event);
    }
}
