//! Delimited-text dataset reader.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use ndarray::Array2;

/// Parsed dataset ready for feature selection.
#[derive(Debug)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Vec<i32>,
    pub sample_weight: Option<Vec<f64>>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Column names for a list of feature indices, e.g. a selection order.
    pub fn feature_names_for(&self, indices: &[usize]) -> Vec<&str> {
        indices
            .iter()
            .map(|&i| self.feature_names.get(i).map_or("", String::as_str))
            .collect()
    }
}

/// Configuration for reading a dataset with a header row.
#[derive(Debug, Clone)]
pub struct DatasetReaderConfig {
    pub delimiter: u8,
    /// Column holding the binary class label.
    pub label_column: String,
    /// Optional column holding per-sample weights.
    pub weight_column: Option<String>,
    /// Columns that are neither label, weight nor feature.
    pub ignore_columns: Vec<String>,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            label_column: "label".to_string(),
            weight_column: None,
            ignore_columns: Vec::new(),
        }
    }
}

/// Read a dataset using the default configuration.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_dataset_csv(path, &DatasetReaderConfig::default())
}

/// Read a delimited dataset. Every column that is not the label, the weight
/// or ignored is parsed as an `f64` feature.
pub fn read_dataset_csv<P: AsRef<Path>>(path: P, config: &DatasetReaderConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;
    let weight_idx = match &config.weight_column {
        Some(name) => Some(
            find_column(&headers, name)
                .ok_or_else(|| anyhow!("Missing weight column '{}'", name))?,
        ),
        None => None,
    };

    let ignore: HashSet<String> = config
        .ignore_columns
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();
    let feature_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, header)| {
            idx != label_idx
                && Some(idx) != weight_idx
                && !ignore.contains(&header.to_ascii_lowercase())
        })
        .map(|(idx, _)| idx)
        .collect();
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns detected in dataset header"));
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut weights = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = parse_field::<i32>(&record, &headers, label_idx, row_idx)?;
        labels.push(label);

        if let Some(idx) = weight_idx {
            weights.push(parse_field::<f64>(&record, &headers, idx, row_idx)?);
        }

        for &idx in &feature_indices {
            features.push(parse_field::<f64>(&record, &headers, idx, row_idx)?);
        }
    }
    if labels.is_empty() {
        return Err(anyhow!("Dataset contains no rows"));
    }

    let x = Array2::from_shape_vec((labels.len(), feature_indices.len()), features)
        .context("Failed to build feature matrix")?;
    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    log::info!(
        "Loaded {} samples with {} features from {}",
        x.nrows(),
        x.ncols(),
        path.as_ref().display()
    );

    Ok(Dataset {
        x,
        y: labels,
        sample_weight: weight_idx.map(|_| weights),
        feature_names,
    })
}

fn parse_field<T>(record: &StringRecord, headers: &StringRecord, idx: usize, row_idx: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let column = headers.get(idx).unwrap_or("");
    record
        .get(idx)
        .ok_or_else(|| anyhow!("Missing value for '{}' at row {}", column, row_idx + 1))?
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for '{}' at row {}", column, row_idx + 1))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
