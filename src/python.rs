//! Python bindings for translationese
//!
//! This module provides PyO3-based Python bindings for the Rust core.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigError, ExtractConfig};
use crate::conllu::ParseError;
use crate::features::FeatureVector;
use crate::iterators::{Corpus, CorpusError};
use crate::lang::Lang;
use crate::lists::{ListError, SupportLists};
use crate::pipeline::{Document, Extractor as RustExtractor};

/// Convert CorpusError to Python exception
impl From<CorpusError> for PyErr {
    fn from(err: CorpusError) -> PyErr {
        match err {
            CorpusError::Pattern(e) => PyValueError::new_err(format!("Glob pattern error: {}", e)),
            CorpusError::Read { path, source } => PyIOError::new_err(format!(
                "Failed to open file {}: {}",
                path.display(),
                source
            )),
            CorpusError::Parse { path, source } => {
                PyValueError::new_err(format!("Parse error in {}: {}", path.display(), source))
            }
        }
    }
}

impl From<ListError> for PyErr {
    fn from(err: ListError) -> PyErr {
        PyIOError::new_err(err.to_string())
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_error(err: ParseError) -> PyErr {
    PyValueError::new_err(format!("Parse error: {}", err))
}

/// Metadata then features, in column order
fn vector_to_dict<'py>(py: Python<'py>, vector: &FeatureVector) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (level, value) in &vector.meta {
        dict.set_item(level, value)?;
    }
    for (key, value) in vector.iter() {
        dict.set_item(key, value.as_f64())?;
    }
    Ok(dict)
}

/// Feature extractor with loaded support lists.
///
/// Args:
///     support_dir: Directory with `<lang>_<category>.lst` files (optional)
///     config: Path to a TOML configuration file (optional)
///     min_len: Minimum sentence length in tokens
///     strict_punct_num: Also drop sentences of only PUNCT and NUM tokens
///
/// Example:
///     >>> ex = Extractor(support_dir="searchlists")
///     >>> ex.extract_text(open("doc.conllu").read(), lang="en")["nn"]
#[pyclass(name = "Extractor")]
pub struct PyExtractor {
    config: ExtractConfig,
    inner: Arc<RustExtractor>,
}

#[pymethods]
impl PyExtractor {
    #[new]
    #[pyo3(signature = (support_dir=None, config=None, min_len=None, strict_punct_num=None))]
    fn new(
        support_dir: Option<PathBuf>,
        config: Option<PathBuf>,
        min_len: Option<usize>,
        strict_punct_num: Option<bool>,
    ) -> PyResult<Self> {
        let mut config = match config {
            Some(path) => ExtractConfig::from_file(&path)?,
            None => ExtractConfig::default(),
        };
        if let Some(min_len) = min_len {
            config.min_len = min_len;
        }
        if let Some(strict) = strict_punct_num {
            config.strict_punct_num = strict;
        }
        if support_dir.is_some() {
            config.support_dir = support_dir;
        }
        let lists = match &config.support_dir {
            Some(dir) => {
                let langs: Vec<Lang> = config.langs.iter().map(|c| Lang::from_code(c)).collect();
                SupportLists::load_dir(dir, &langs)?
            }
            None => SupportLists::new(),
        };
        let inner = Arc::new(RustExtractor::new(&config, Arc::new(lists)));
        Ok(PyExtractor { config, inner })
    }

    /// Feature column names, in output order.
    fn feature_keys(&self) -> Vec<String> {
        self.inner.feature_keys().map(str::to_string).collect()
    }

    /// Extract features from one CoNLL-U document given as a string.
    ///
    /// Args:
    ///     text: CoNLL-U formatted text
    ///     lang: Language code (en, de, ru, es; anything else gives zero counts)
    ///     name: Document name reported in the `doc` column
    ///
    /// Returns:
    ///     dict mapping column names to values (None where undefined)
    #[pyo3(signature = (text, lang, name="doc"))]
    fn extract_text<'py>(
        &self,
        py: Python<'py>,
        text: &str,
        lang: &str,
        name: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        let document =
            Document::from_conllu(name, Lang::from_code(lang), text, self.config.segment_policy())
                .map_err(parse_error)?;
        let vector = py.detach(|| self.inner.extract(&document));
        vector_to_dict(py, &vector)
    }

    /// Extract features from a CoNLL-U file (`.conllu` or `.conllu.gz`).
    ///
    /// Metadata levels are read off the file path.
    #[pyo3(signature = (path, lang=None))]
    fn extract_file<'py>(
        &self,
        py: Python<'py>,
        path: PathBuf,
        lang: Option<&str>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let corpus = self.corpus(vec![path.clone()], lang);
        let vector = py.detach(|| {
            corpus
                .read(&path)
                .map(|document| self.inner.extract(&document))
        })?;
        vector_to_dict(py, &vector)
    }

    /// Extract features from every document matching a glob pattern.
    ///
    /// Files are processed in sorted order for deterministic results.
    ///
    /// Returns:
    ///     list of dicts, one per document
    ///
    /// Raises:
    ///     ValueError: If the glob pattern is invalid or a file fails to parse
    #[pyo3(signature = (pattern, lang=None))]
    fn extract_glob<'py>(
        &self,
        py: Python<'py>,
        pattern: &str,
        lang: Option<&str>,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let mut corpus = Corpus::from_glob(pattern, &self.config)?;
        if let Some(code) = lang {
            corpus = corpus.with_lang(Lang::from_code(code));
        }
        let vectors = py.detach(|| {
            corpus
                .into_iter()
                .map(|document| document.map(|d| self.inner.extract(&d)))
                .collect::<Result<Vec<_>, _>>()
        })?;
        vectors
            .iter()
            .map(|vector| vector_to_dict(py, vector))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("<Extractor min_len={}>", self.config.min_len)
    }
}

impl PyExtractor {
    fn corpus(&self, paths: Vec<PathBuf>, lang: Option<&str>) -> Corpus {
        let corpus = Corpus::from_paths(paths, &self.config);
        match lang {
            Some(code) => corpus.with_lang(Lang::from_code(code)),
            None => corpus,
        }
    }
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn translationese(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyExtractor>()?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;
    Ok(())
}
