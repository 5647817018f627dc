//! Diagnostic events emitted while an analysis runs.
//!
//! The analyzer never logs through a global channel on its own. Instead it
//! hands [`AnalysisEvent`]s to an injected [`AnalysisObserver`]. The default
//! observer, [`TracingObserver`], forwards them to `tracing`; tests and
//! embedders can capture them with a [`ClosureObserver`].
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_eda::DataAnalyzer;
//!
//! let analyzer = DataAnalyzer::builder()
//!     .on_event(|event| {
//!         println!("[{}] {}", event.stage.display_name(), event.message);
//!     })
//!     .build(&df)?;
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Analysis operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Snapshot taken and columns classified
    Initialization,
    BasicInfo,
    DescriptiveStatistics,
    Correlation,
    OutlierDetection,
    DataQuality,
    /// Full report assembled
    Report,
}

impl AnalysisStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initialization => "Initialization",
            Self::BasicInfo => "Basic Info",
            Self::DescriptiveStatistics => "Descriptive Statistics",
            Self::Correlation => "Correlation Analysis",
            Self::OutlierDetection => "Outlier Detection",
            Self::DataQuality => "Data Quality",
            Self::Report => "Report",
        }
    }
}

/// What happened at a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The stage finished and produced a result
    Completed,
    /// The stage had nothing to work on and returned an empty result
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEvent {
    pub stage: AnalysisStage,
    pub kind: EventKind,
    pub message: String,
}

impl AnalysisEvent {
    pub fn completed(stage: AnalysisStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind: EventKind::Completed,
            message: message.into(),
        }
    }

    pub fn empty_input(stage: AnalysisStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind: EventKind::EmptyInput,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.kind == EventKind::EmptyInput
    }
}

/// Receiver for analysis events.
///
/// Implementations must be `Send + Sync`; an analyzer may be shared across
/// threads and every operation reports through the same observer.
pub trait AnalysisObserver: Send + Sync {
    fn notify(&self, event: AnalysisEvent);
}

/// Forwards events to `tracing`: completions at `info`, empty inputs at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn notify(&self, event: AnalysisEvent) {
        match event.kind {
            EventKind::Completed => info!("{}: {}", event.stage.display_name(), event.message),
            EventKind::EmptyInput => warn!("{}: {}", event.stage.display_name(), event.message),
        }
    }
}

/// Wrapper that implements [`AnalysisObserver`] using a closure.
pub struct ClosureObserver<F>
where
    F: Fn(AnalysisEvent) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureObserver<F>
where
    F: Fn(AnalysisEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> AnalysisObserver for ClosureObserver<F>
where
    F: Fn(AnalysisEvent) + Send + Sync,
{
    fn notify(&self, event: AnalysisEvent) {
        (self.callback)(event);
    }
}

static_assertions::assert_impl_all!(AnalysisEvent: Send, Sync);
static_assertions::assert_impl_all!(TracingObserver: Send, Sync);
