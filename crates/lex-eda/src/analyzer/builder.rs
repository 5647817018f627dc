use super::DataAnalyzer;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::observer::{AnalysisObserver, ClosureObserver, TracingObserver};
use polars::prelude::DataFrame;
use std::sync::Arc;

/// Builder for [`DataAnalyzer`].
#[derive(Default)]
pub struct DataAnalyzerBuilder {
    config: Option<AnalysisConfig>,
    observer: Option<Arc<dyn AnalysisObserver>>,
}

static_assertions::assert_impl_all!(DataAnalyzerBuilder: Send);

impl DataAnalyzerBuilder {
    /// Set the analysis configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the observer that receives completion and empty-input events.
    ///
    /// Defaults to [`TracingObserver`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use lex_eda::observer::{AnalysisEvent, AnalysisObserver};
    /// use std::sync::Arc;
    ///
    /// struct Collector;
    ///
    /// impl AnalysisObserver for Collector {
    ///     fn notify(&self, event: AnalysisEvent) {
    ///         eprintln!("{:?}: {}", event.kind, event.message);
    ///     }
    /// }
    ///
    /// let analyzer = DataAnalyzer::builder()
    ///     .observer(Arc::new(Collector))
    ///     .build(&df)?;
    /// ```
    pub fn observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Set an event callback closure.
    ///
    /// Convenience over [`observer`](Self::observer) for simple handlers.
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(crate::observer::AnalysisEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(ClosureObserver::new(callback)));
        self
    }

    /// Snapshot `df` and build the analyzer.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self, df: &DataFrame) -> Result<DataAnalyzer> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver) as Arc<dyn AnalysisObserver>);

        Ok(DataAnalyzer::from_parts(df, config, observer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdaError;
    use polars::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_defaults() {
        let df = df!["a" => [1.0f64, 2.0]].unwrap();
        let analyzer = DataAnalyzer::builder().build(&df).unwrap();
        assert_eq!(analyzer.config(), &AnalysisConfig::default());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let df = df!["a" => [1.0f64]].unwrap();
        let config = AnalysisConfig {
            zscore_threshold: -1.0,
            ..AnalysisConfig::default()
        };
        let result = DataAnalyzer::builder().config(config).build(&df);
        assert!(matches!(result, Err(EdaError::Config(_))));
    }

    #[test]
    fn test_on_event_receives_initialization() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let df = df!["a" => [1.0f64]].unwrap();

        let _analyzer = DataAnalyzer::builder()
            .on_event(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build(&df)
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
