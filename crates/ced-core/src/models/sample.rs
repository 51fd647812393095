//! Column-major sample table.

use serde::Serialize;
use serde_json::{Map, Value};

use super::label::InterventionLabel;
use super::stats;
use crate::constants::INTERVENTION_COLUMN;
use crate::errors::{EstimationError, EstimationResult, ScmError, ScmResult};

/// A table of draws: one `f64` column per variable, in insertion order,
/// plus an optional `Intervention` label per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    n_rows: usize,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<InterventionLabel>>,
}

impl Sample {
    /// Empty table that will hold `n_rows` rows per column.
    pub fn with_rows(n_rows: usize) -> Self {
        Self {
            n_rows,
            names: Vec::new(),
            columns: Vec::new(),
            labels: None,
        }
    }

    /// Build a table from `(name, column)` pairs.
    pub fn from_columns<I, S>(columns: I) -> ScmResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut iter = columns.into_iter().peekable();
        let n_rows = iter.peek().map(|(_, c)| c.len()).unwrap_or(0);
        let mut sample = Self::with_rows(n_rows);
        for (name, values) in iter {
            sample.push_column(name, values)?;
        }
        Ok(sample)
    }

    /// Append a column. Its length must match the table's row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> ScmResult<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ScmError::DuplicateVariable { name });
        }
        if values.len() != self.n_rows {
            return Err(ScmError::ShapeMismatch {
                variable: name,
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.columns[i].as_slice())
    }

    /// Like [`Sample::column`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> EstimationResult<&[f64]> {
        self.column(name).ok_or_else(|| EstimationError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Iterate `(name, column)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    pub fn labels(&self) -> Option<&[InterventionLabel]> {
        self.labels.as_deref()
    }

    /// Tag every row with `label`, replacing any existing labels.
    pub fn with_label(mut self, label: InterventionLabel) -> Self {
        self.labels = Some(vec![label; self.n_rows]);
        self
    }

    /// Mean of a column, or `None` when the column is absent.
    /// An empty table yields `Some(NaN)`.
    pub fn mean(&self, name: &str) -> Option<f64> {
        self.column(name).map(stats::mean)
    }

    /// Keep the rows whose entry in `keep` is `true`.
    pub fn filter_rows(&self, keep: &[bool]) -> Self {
        debug_assert_eq!(keep.len(), self.n_rows);
        let pick = |col: &Vec<f64>| -> Vec<f64> {
            col.iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(&v, _)| v)
                .collect()
        };
        let labels = self.labels.as_ref().map(|labels| {
            labels
                .iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(l, _)| l.clone())
                .collect()
        });
        Self {
            n_rows: keep.iter().filter(|&&k| k).count(),
            names: self.names.clone(),
            columns: self.columns.iter().map(pick).collect(),
            labels,
        }
    }

    /// Project onto `names`, in that order. Labels are kept.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> EstimationResult<Self> {
        let mut out = Self::with_rows(self.n_rows);
        for name in names {
            let name = name.as_ref();
            let column = self.require_column(name)?;
            out.push_column(name, column.to_vec())?;
        }
        out.labels = self.labels.clone();
        Ok(out)
    }

    /// Return a copy with every column passed through `f(name, column)`.
    pub fn map_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &[f64]) -> Vec<f64>,
    {
        let columns = self
            .iter_columns()
            .map(|(name, col)| f(name, col))
            .collect();
        Self {
            n_rows: self.n_rows,
            names: self.names.clone(),
            columns,
            labels: self.labels.clone(),
        }
    }

    /// Stack tables vertically. Every part must share the same column names
    /// in the same order. If any part is labelled, unlabelled parts are
    /// labelled `Observational`.
    pub fn concat(parts: &[&Sample]) -> ScmResult<Self> {
        let Some(first) = parts.first() else {
            return Ok(Self::with_rows(0));
        };
        for part in &parts[1..] {
            if part.names != first.names {
                let variable = part
                    .names
                    .iter()
                    .zip(&first.names)
                    .find(|(a, b)| a != b)
                    .map(|(a, _)| a.clone())
                    .unwrap_or_else(|| INTERVENTION_COLUMN.to_string());
                return Err(ScmError::ShapeMismatch {
                    variable,
                    expected: first.n_columns(),
                    actual: part.n_columns(),
                });
            }
        }

        let n_rows = parts.iter().map(|p| p.n_rows).sum();
        let columns = (0..first.n_columns())
            .map(|i| {
                let mut col = Vec::with_capacity(n_rows);
                for part in parts {
                    col.extend_from_slice(&part.columns[i]);
                }
                col
            })
            .collect();

        let labels = if parts.iter().any(|p| p.labels.is_some()) {
            let mut all = Vec::with_capacity(n_rows);
            for part in parts {
                match &part.labels {
                    Some(labels) => all.extend(labels.iter().cloned()),
                    None => all.extend(
                        std::iter::repeat(InterventionLabel::Observational).take(part.n_rows),
                    ),
                }
            }
            Some(all)
        } else {
            None
        };

        Ok(Self {
            n_rows,
            names: first.names.clone(),
            columns,
            labels,
        })
    }

    /// Values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.n_rows).then(|| self.columns.iter().map(|c| c[index]).collect())
    }

    /// One JSON object per row, for plotting collaborators. The label column
    /// is rendered with `observational` standing in for baseline rows.
    pub fn to_records(&self, observational: &str) -> Vec<Value> {
        (0..self.n_rows)
            .map(|i| {
                let mut record = Map::new();
                for (name, col) in self.iter_columns() {
                    record.insert(name.to_string(), Value::from(col[i]));
                }
                if let Some(labels) = &self.labels {
                    record.insert(
                        INTERVENTION_COLUMN.to_string(),
                        Value::from(labels[i].render(observational)),
                    );
                }
                Value::Object(record)
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
