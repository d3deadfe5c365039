//! Tab-separated output, one row per document

use crate::features::FeatureVector;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("TSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row for {doc} has {found} feature columns, header has {expected}")]
    Width {
        doc: String,
        expected: usize,
        found: usize,
    },
}

/// Writes the header on creation, then one row per [`FeatureVector`]
pub struct TsvWriter<W: Write> {
    inner: csv::Writer<W>,
    levels: Vec<String>,
    features: usize,
    rows: usize,
}

impl<W: Write> TsvWriter<W> {
    pub fn new<'a>(
        writer: W,
        levels: &[String],
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ExportError> {
        let mut inner = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        let keys: Vec<&str> = keys.into_iter().collect();
        let header = levels.iter().map(String::as_str).chain(keys.iter().copied());
        inner.write_record(header)?;
        Ok(Self {
            inner,
            levels: levels.to_vec(),
            features: keys.len(),
            rows: 0,
        })
    }

    pub fn write(&mut self, vector: &FeatureVector) -> Result<(), ExportError> {
        if vector.len() != self.features {
            return Err(ExportError::Width {
                doc: vector.doc.clone(),
                expected: self.features,
                found: vector.len(),
            });
        }
        let mut record: Vec<String> = Vec::with_capacity(self.levels.len() + self.features);
        for level in &self.levels {
            let value = vector
                .meta
                .iter()
                .find(|(name, _)| name == level)
                .map(|(_, value)| value.clone())
                .unwrap_or_default();
            record.push(value);
        }
        record.extend(vector.values().map(ToString::to_string));
        self.inner.write_record(&record)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, ExportError> {
        self.inner
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}
