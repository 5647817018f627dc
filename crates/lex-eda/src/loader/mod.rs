//! Loading and saving tables.
//!
//! Reads CSV, JSON (records array or JSON lines) and Parquet files into
//! polars `DataFrame`s, writes them back out, and generates a deterministic
//! synthetic dataset for demos and tests.

use crate::error::{EdaError, Result, ResultExt};
use chrono::NaiveDate;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    Csv,
    /// A single JSON array of records
    Json,
    /// Newline-delimited JSON records
    JsonLines,
    Parquet,
}

impl DataFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "tsv" | "txt" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(EdaError::InvalidArgument(format!(
                "cannot infer table format from extension '{}' ({})",
                other,
                path.display()
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::JsonLines => "jsonl",
            Self::Parquet => "parquet",
        }
    }
}

/// Layout of a JSON table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    #[default]
    Records,
    Lines,
}

/// CSV parsing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// First row contains column names
    pub has_header: bool,
    pub separator: u8,
    /// `None` disables quote handling
    pub quote_char: Option<u8>,
    /// Rows sampled for type inference (`None` scans the whole file)
    pub infer_schema_length: Option<usize>,
    /// Parse date-like text columns as dates
    pub try_parse_dates: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            separator: b',',
            quote_char: Some(b'"'),
            infer_schema_length: Some(1000),
            try_parse_dates: false,
        }
    }
}

/// Reads and writes tables.
pub struct DataLoader;

impl DataLoader {
    /// Load a file in the given format.
    pub fn load(path: impl AsRef<Path>, format: DataFormat, csv: &CsvOptions) -> Result<DataFrame> {
        let path = path.as_ref();
        let df = match format {
            DataFormat::Csv => Self::load_csv(path, csv)?,
            DataFormat::Json => Self::load_json(path, JsonLayout::Records)?,
            DataFormat::JsonLines => Self::load_json(path, JsonLayout::Lines)?,
            DataFormat::Parquet => Self::load_parquet(path)?,
        };
        info!(
            "Loaded {}: {} rows x {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    pub fn load_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = open(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(options.has_header)
            .with_infer_schema_length(options.infer_schema_length)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(options.separator)
                    .with_quote_char(options.quote_char)
                    .with_try_parse_dates(options.try_parse_dates),
            )
            .into_reader_with_file_handle(file)
            .finish()
            .context(format!("Failed to parse CSV {}", path.display()))?;
        Ok(df)
    }

    pub fn load_json(path: impl AsRef<Path>, layout: JsonLayout) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = open(path)?;
        let format = match layout {
            JsonLayout::Records => JsonFormat::Json,
            JsonLayout::Lines => JsonFormat::JsonLines,
        };
        JsonReader::new(file)
            .with_json_format(format)
            .finish()
            .context(format!("Failed to parse JSON {}", path.display()))
    }

    pub fn load_parquet(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = open(path)?;
        ParquetReader::new(file)
            .finish()
            .context(format!("Failed to read Parquet {}", path.display()))
    }

    /// Write `df` to `dir/file_name` in the given format, creating `dir`.
    ///
    /// Returns the path written.
    pub fn save(
        df: &DataFrame,
        dir: impl AsRef<Path>,
        file_name: &str,
        format: DataFormat,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let mut file = File::create(&path)?;
        let mut df = df.clone();

        match format {
            DataFormat::Csv => CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(b',')
                .with_quote_char(b'"')
                .finish(&mut df)?,
            DataFormat::Json => JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(&mut df)?,
            DataFormat::JsonLines => JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(&mut df)?,
            DataFormat::Parquet => {
                ParquetWriter::new(&mut file).finish(&mut df)?;
            }
        }

        info!("Table saved: {}", path.display());
        Ok(path)
    }

    /// Deterministic synthetic customer table.
    ///
    /// Columns: `id`, `name`, `age` (18..80), `salary` (normal around
    /// 50 000 with sd 15 000, two decimals), `category` (A/B/C),
    /// `signup_date` (daily from 2020-01-01) and `active` (80% true).
    pub fn create_sample_data(rows: usize, seed: u64) -> Result<DataFrame> {
        let mut rng = StdRng::seed_from_u64(seed);
        let salary = Normal::<f64>::new(50_000.0, 15_000.0)
            .map_err(|e| EdaError::InvalidArgument(format!("salary distribution: {}", e)))?;

        let ids: Vec<i64> = (1..=rows as i64).collect();
        let names: Vec<String> = (1..=rows).map(|i| format!("Customer_{}", i)).collect();
        let ages: Vec<i64> = (0..rows).map(|_| rng.gen_range(18..80)).collect();
        let salaries: Vec<f64> = (0..rows)
            .map(|_| (salary.sample(&mut rng) * 100.0).round() / 100.0)
            .collect();
        let categories: Vec<&str> = (0..rows)
            .map(|_| ["A", "B", "C"][rng.gen_range(0..3)])
            .collect();
        let active: Vec<bool> = (0..rows).map(|_| rng.gen_bool(0.8)).collect();

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| EdaError::InvalidArgument("invalid epoch date".to_string()))?;
        let start = NaiveDate::from_ymd_opt(2020, 1, 1)
            .ok_or_else(|| EdaError::InvalidArgument("invalid start date".to_string()))?;
        let offset = start.signed_duration_since(epoch).num_days() as i32;
        let days: Vec<i32> = (0..rows as i32).map(|i| offset + i).collect();
        let signup_dates = Series::new("signup_date".into(), days).cast(&DataType::Date)?;

        let df = DataFrame::new(vec![
            Series::new("id".into(), ids).into(),
            Series::new("name".into(), names).into(),
            Series::new("age".into(), ages).into(),
            Series::new("salary".into(), salaries).into(),
            Series::new("category".into(), categories).into(),
            signup_dates.into(),
            Series::new("active".into(), active).into(),
        ])?;

        debug!("Generated sample data with {} rows (seed {})", rows, seed);
        Ok(df)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        EdaError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;
    use crate::table::column_type_of;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lex_eda_loader_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_sample_data_shape_and_types() {
        let df = DataLoader::create_sample_data(50, 42).unwrap();
        assert_eq!(df.shape(), (50, 7));

        let dtype = |name: &str| column_type_of(df.column(name).unwrap().dtype());
        assert_eq!(dtype("age"), ColumnType::Numeric);
        assert_eq!(dtype("salary"), ColumnType::Numeric);
        assert_eq!(dtype("category"), ColumnType::Categorical);
        assert_eq!(dtype("signup_date"), ColumnType::Datetime);
        assert_eq!(dtype("active"), ColumnType::Other);
    }

    #[test]
    fn test_sample_data_is_deterministic() {
        let a = DataLoader::create_sample_data(20, 7).unwrap();
        let b = DataLoader::create_sample_data(20, 7).unwrap();
        assert!(a.equals(&b));

        let c = DataLoader::create_sample_data(20, 8).unwrap();
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_sample_ages_in_range() {
        let df = DataLoader::create_sample_data(200, 1).unwrap();
        let ages = df.column("age").unwrap().i64().unwrap();
        assert!(ages.into_iter().flatten().all(|a| (18..80).contains(&a)));
    }

    #[test]
    fn test_csv_round_trip_through_disk() {
        let dir = temp_dir("csv");
        let df = df!["x" => [1i64, 2, 3], "s" => ["a", "b", "c"]].unwrap();

        let path = DataLoader::save(&df, &dir, "t.csv", DataFormat::Csv).unwrap();
        let loaded = DataLoader::load(&path, DataFormat::Csv, &CsvOptions::default()).unwrap();
        assert!(df.equals(&loaded));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_csv_custom_separator() {
        let dir = temp_dir("sep");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("semi.csv");
        fs::write(&path, "a;b\n1;x\n2;y\n").unwrap();

        let options = CsvOptions {
            separator: b';',
            ..CsvOptions::default()
        };
        let df = DataLoader::load_csv(&path, &options).unwrap();
        assert_eq!(df.shape(), (2, 2));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_json_lines_round_trip() {
        let dir = temp_dir("jsonl");
        let df = df!["x" => [1i64, 2], "s" => ["a", "b"]].unwrap();

        let path = DataLoader::save(&df, &dir, "t.jsonl", DataFormat::JsonLines).unwrap();
        let loaded = DataLoader::load_json(&path, JsonLayout::Lines).unwrap();
        assert_eq!(loaded.shape(), (2, 2));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = temp_dir("parquet");
        let df = DataLoader::create_sample_data(10, 3).unwrap();

        let path = DataLoader::save(&df, &dir, "t.parquet", DataFormat::Parquet).unwrap();
        let loaded = DataLoader::load_parquet(&path).unwrap();
        assert!(df.equals(&loaded));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DataLoader::load_csv("/definitely/not/here.csv", &CsvOptions::default())
            .unwrap_err();
        assert!(matches!(err, EdaError::Io(_)));
    }

    #[test]
    fn test_unreadable_parquet_names_the_file() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corrupt.parquet");
        fs::write(&path, "id,name\n1,a\n").unwrap();

        let err = DataLoader::load(&path, DataFormat::Parquet, &CsvOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "POLARS_ERROR");
        assert!(matches!(err, EdaError::WithContext { .. }));
        assert!(err.to_string().contains("corrupt.parquet"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_sample_salaries_center_on_mean() {
        let df = DataLoader::create_sample_data(2000, 42).unwrap();
        let mean = df.column("salary").unwrap().f64().unwrap().mean().unwrap();
        assert!((mean - 50_000.0).abs() < 2_000.0);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.CSV")).unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("a.ndjson")).unwrap(), DataFormat::JsonLines);
        assert_eq!(DataFormat::from_path(Path::new("a.parquet")).unwrap(), DataFormat::Parquet);
        assert!(matches!(
            DataFormat::from_path(Path::new("a.xlsx")),
            Err(EdaError::InvalidArgument(_))
        ));
    }
}
