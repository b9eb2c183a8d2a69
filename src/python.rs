//! Python bindings used by the upload/manual-entry UI.

use std::collections::HashMap;

use numpy::IntoPyArray;
use once_cell::sync::Lazy;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tokio::runtime::Runtime;

use crate::batch::MetricsPipeline;
use crate::config::{Metric, MetricSelection, Weights};
use crate::error::MetricsError;
use crate::score::{score_pairs_concurrently, TextPair};
use crate::table::Table;

// One jieba handle for the lifetime of the interpreter.
static PIPELINE: Lazy<MetricsPipeline> = Lazy::new(MetricsPipeline::new);

impl From<MetricsError> for PyErr {
    fn from(err: MetricsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn weights_or_default(weights: Option<Vec<f64>>) -> Result<Weights, MetricsError> {
    Ok(weights.map(Weights::new).transpose()?.unwrap_or_default())
}

/// Scores a table and returns `(headers, rows, summary)`.
#[pyfunction]
#[pyo3(signature = (headers, rows, candidate_col, reference_col, metrics, weights=None))]
fn compute_metrics(
    py: Python,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    candidate_col: &str,
    reference_col: &str,
    metrics: Vec<String>,
    weights: Option<Vec<f64>>,
) -> PyResult<(Vec<String>, Vec<Vec<String>>, HashMap<String, f64>)> {
    let table = Table::from_rows(headers, rows)?;
    let selection = MetricSelection::parse(&metrics)?;
    let weights = weights_or_default(weights)?;

    let (scored, summary) = py.allow_threads(|| {
        PIPELINE.compute(&table, candidate_col, reference_col, &selection, &weights)
    })?;

    let headers = scored.headers().into_iter().map(str::to_string).collect();
    let summary = summary
        .iter()
        .map(|(metric, mean)| (metric.column_name().to_string(), mean))
        .collect();
    Ok((headers, scored.to_string_rows(), summary))
}

/// Scores aligned candidate/reference lists concurrently; returns one numpy
/// array per metric column.
#[pyfunction]
#[pyo3(signature = (candidates, references, weights=None, workers=4))]
fn score_pairs<'py>(
    py: Python<'py>,
    candidates: Vec<String>,
    references: Vec<String>,
    weights: Option<Vec<f64>>,
    workers: usize,
) -> PyResult<Bound<'py, PyDict>> {
    if candidates.len() != references.len() {
        return Err(PyValueError::new_err(format!(
            "got {} candidates but {} references",
            candidates.len(),
            references.len()
        )));
    }
    let weights = weights_or_default(weights)?;
    let pairs: Vec<TextPair> = candidates
        .into_iter()
        .zip(references)
        .map(|(candidate, reference)| TextPair::new(candidate, reference))
        .collect();

    let scores = py.allow_threads(|| {
        let segmentation = PIPELINE.segmentation_for(
            pairs
                .iter()
                .flat_map(|p| [p.candidate.as_str(), p.reference.as_str()]),
        );
        let rt = Runtime::new()?;
        Ok::<_, std::io::Error>(rt.block_on(score_pairs_concurrently(
            pairs,
            segmentation,
            weights,
            workers,
        )))
    })?;

    let columns = PyDict::new(py);
    for metric in Metric::ALL {
        let column: Vec<f64> = scores.iter().map(|s| s.get(metric)).collect();
        columns.set_item(metric.column_name(), column.into_pyarray(py))?;
    }
    Ok(columns)
}

#[pyfunction]
fn has_han(texts: Vec<String>) -> bool {
    crate::script::has_han(&texts)
}

/// Parses the comma-separated weight text typed into the UI.
#[pyfunction]
fn parse_weights(text: &str) -> PyResult<Vec<f64>> {
    Ok(text.parse::<Weights>()?.into())
}

#[pymodule]
fn metriclab(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let _ = env_logger::try_init();
    m.add_function(wrap_pyfunction!(compute_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(score_pairs, m)?)?;
    m.add_function(wrap_pyfunction!(has_han, m)?)?;
    m.add_function(wrap_pyfunction!(parse_weights, m)?)?;
    Ok(())
}
