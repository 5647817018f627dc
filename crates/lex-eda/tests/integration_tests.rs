//! Integration tests for the analysis core.
//!
//! These tests load CSV fixtures from disk and verify end-to-end behaviour of
//! the analyzer, the loader and the report writer.

use lex_eda::{
    AnalysisConfig, AnalysisEvent, AnalysisStage, ColumnType, CorrelationMethod, CsvOptions,
    DataAnalyzer, DataFormat, DataLoader, EdaError, EventKind, OutlierMethod, ReportWriter,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let options = CsvOptions {
        try_parse_dates: true,
        ..CsvOptions::default()
    };
    DataLoader::load(fixtures_path().join(filename), DataFormat::Csv, &options)
        .expect("Failed to read CSV fixture")
}

fn collecting_analyzer(
    df: &DataFrame,
    config: AnalysisConfig,
) -> (DataAnalyzer, Arc<Mutex<Vec<AnalysisEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let analyzer = DataAnalyzer::builder()
        .config(config)
        .on_event(move |event| sink.lock().unwrap().push(event))
        .build(df)
        .unwrap();
    (analyzer, events)
}

// ============================================================================
// Sales fixture
// ============================================================================

#[test]
fn test_sales_classification() {
    let df = load_csv("sales.csv");
    let analyzer = DataAnalyzer::new(&df);
    let classification = analyzer.classification();

    assert_eq!(
        classification.numeric,
        vec!["order_id", "units", "unit_price", "discount"]
    );
    assert_eq!(classification.categorical, vec!["region"]);
    assert_eq!(classification.datetime, vec!["order_date"]);
}

#[test]
fn test_sales_descriptive_statistics() {
    let df = load_csv("sales.csv");
    let stats = DataAnalyzer::new(&df).descriptive_statistics().unwrap();

    assert_eq!(stats.len(), 4);
    for record in &stats {
        let (p25, p50, p75) = (
            record.p25.unwrap(),
            record.p50.unwrap(),
            record.p75.unwrap(),
        );
        assert!(p25 <= p50 && p50 <= p75, "{}: quartiles out of order", record.column);
        assert!((0.0..=100.0).contains(&record.missing_percentage));
    }

    let price = stats.iter().find(|s| s.column == "unit_price").unwrap();
    assert_eq!(price.count, 11);
    assert_eq!(price.missing_count, 1);

    let order_id = stats.iter().find(|s| s.column == "order_id").unwrap();
    assert_eq!(order_id.mean, Some(6.5));
    assert_eq!(order_id.min, Some(1.0));
    assert_eq!(order_id.max, Some(12.0));
}

#[test]
fn test_sales_outliers() {
    let df = load_csv("sales.csv");
    let outliers = DataAnalyzer::new(&df)
        .detect_outliers(OutlierMethod::Iqr)
        .unwrap();

    let units = outliers.iter().find(|o| o.column == "units").unwrap();
    assert_eq!(units.row_indices, vec![7]);
    assert_eq!(units.lower_bound, Some(7.5));
    assert_eq!(units.upper_bound, Some(19.5));

    let order_id = outliers.iter().find(|o| o.column == "order_id").unwrap();
    assert!(order_id.is_empty());
}

#[test]
fn test_zscore_rows_line_up_with_missing_cells() {
    let mut readings: Vec<Option<f64>> = vec![None, Some(f64::NAN)];
    readings.extend(std::iter::repeat_n(Some(10.0), 20));
    readings.push(Some(1000.0));
    let df = df!["reading" => readings].unwrap();

    let outliers = DataAnalyzer::new(&df)
        .detect_outliers(OutlierMethod::ZScore)
        .unwrap();

    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers[0].row_indices, vec![22]);
    let upper = outliers[0].upper_bound.unwrap();
    assert!(upper < 1000.0 && upper > 10.0);
}

#[test]
fn test_sales_correlation_all_methods() {
    let df = load_csv("sales.csv");
    let analyzer = DataAnalyzer::new(&df);

    for method in [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::Kendall,
    ] {
        let matrix = analyzer.correlation_analysis(method).unwrap();
        assert_eq!(matrix.columns.len(), 4);
        for i in 0..4 {
            assert_eq!(matrix.values[i][i], Some(1.0));
            for j in 0..4 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }
}

#[test]
fn test_sales_quality_report() {
    let df = load_csv("sales.csv");
    let quality = DataAnalyzer::new(&df).data_quality_report().unwrap();

    assert_eq!(quality.len(), 6);
    let region = quality.iter().find(|q| q.column == "region").unwrap();
    assert_eq!(region.column_type, ColumnType::Categorical);
    assert_eq!(region.null_count, 1);
    assert_eq!(region.unique_count, 4);

    let date = quality.iter().find(|q| q.column == "order_date").unwrap();
    assert_eq!(date.column_type, ColumnType::Datetime);
    assert_eq!(date.unique_count, 12);
}

#[test]
fn test_sales_full_report_is_repeatable() {
    let df = load_csv("sales.csv");
    let config = AnalysisConfig::builder()
        .correlation_method(CorrelationMethod::Spearman)
        .build()
        .unwrap();
    let (analyzer, events) = collecting_analyzer(&df, config);

    let first = analyzer.generate_report().unwrap();
    let second = analyzer.generate_report().unwrap();
    assert_eq!(first, second);

    assert_eq!(first.basic_info.rows, 12);
    assert_eq!(first.basic_info.columns, 6);
    assert_eq!(first.basic_info.missing_cells, 2);
    assert_eq!(first.basic_info.duplicate_rows, 0);
    assert_eq!(first.correlation_matrix.method, CorrelationMethod::Spearman);
    assert_eq!(first.total_outliers(), second.total_outliers());

    let events = events.lock().unwrap();
    assert!(events.iter().all(|e| e.kind == EventKind::Completed));
    assert_eq!(
        events.iter().filter(|e| e.stage == AnalysisStage::Report).count(),
        2
    );
}

// ============================================================================
// Text-only fixture
// ============================================================================

#[test]
fn test_text_only_dataset_degrades_to_empty_sections() {
    let df = load_csv("customers_text.csv");
    let (analyzer, events) = collecting_analyzer(&df, AnalysisConfig::default());

    let report = analyzer.generate_report().unwrap();
    assert!(report.descriptive_stats.is_empty());
    assert!(report.correlation_matrix.is_empty());
    assert!(report.outliers.is_empty());
    assert_eq!(report.data_quality.len(), 3);

    let warned: Vec<AnalysisStage> = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.is_warning())
        .map(|e| e.stage)
        .collect();
    assert_eq!(
        warned,
        vec![
            AnalysisStage::DescriptiveStatistics,
            AnalysisStage::Correlation,
            AnalysisStage::OutlierDetection,
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_method_names() {
    assert!(matches!(
        "invalid".parse::<CorrelationMethod>(),
        Err(EdaError::InvalidArgument(_))
    ));
    assert!(matches!(
        "median".parse::<OutlierMethod>(),
        Err(EdaError::InvalidArgument(_))
    ));
}

#[test]
fn test_missing_file() {
    let result = DataLoader::load(
        fixtures_path().join("does_not_exist.csv"),
        DataFormat::Csv,
        &CsvOptions::default(),
    );
    assert_eq!(result.unwrap_err().error_code(), "IO_ERROR");
}

// ============================================================================
// Snapshot and threading
// ============================================================================

#[test]
fn test_caller_mutation_not_observed() {
    let mut df = load_csv("sales.csv");
    let analyzer = DataAnalyzer::new(&df);
    let before = analyzer.descriptive_statistics().unwrap();

    df.replace("units", Series::new("units".into(), vec![0i64; 12]))
        .unwrap();

    assert_eq!(analyzer.descriptive_statistics().unwrap(), before);
}

#[test]
fn test_analyzer_moves_across_threads() {
    let df = DataLoader::create_sample_data(200, 42).unwrap();
    let analyzer = Arc::new(DataAnalyzer::new(&df));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || analyzer.generate_report().unwrap())
        })
        .collect();
    let reports: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(reports[0], reports[1]);
}

// ============================================================================
// Sample data and reports
// ============================================================================

#[test]
fn test_sample_data_report_end_to_end() {
    let df = DataLoader::create_sample_data(500, 42).unwrap();
    let report = DataAnalyzer::new(&df).generate_report().unwrap();

    assert_eq!(report.basic_info.rows, 500);
    assert_eq!(report.basic_info.numeric_columns, 3);
    assert_eq!(report.basic_info.categorical_columns, 2);
    assert_eq!(report.basic_info.datetime_columns, 1);
    assert_eq!(report.correlation_matrix.columns, vec!["id", "age", "salary"]);

    let dir = std::env::temp_dir().join(format!("lex_eda_it_{}", std::process::id()));
    let writer = ReportWriter::new(&dir);
    let json_path = writer.write_json(&report, "sample").unwrap();
    let text_path = writer.write_text(&report, "sample").unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["basic_info"]["rows"], 500);
    assert_eq!(json["correlation_matrix"]["method"], "pearson");
    assert!(std::fs::read_to_string(&text_path).unwrap().contains("salary"));

    let _ = std::fs::remove_dir_all(&dir);
}
