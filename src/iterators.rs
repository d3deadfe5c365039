//! Corpus discovery and document reading
//!
//! A [`Corpus`] is an ordered list of CoNLL-U files, one document per file.
//! Metadata comes from the path: for the default levels
//! `doc register status lang`, a file at `root/<register>/<status>/<lang>/x.conllu`
//! is document `x`. The last level names the parent directory, the one before
//! it the grandparent, and so on; `doc` is always the file name less `.conllu` and `.gz`.

use crate::config::ExtractConfig;
use crate::conllu::{ParseError, SegmentPolicy, SentenceReader};
use crate::lang::Lang;
use crate::pipeline::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Extensions recognised when walking a directory
const PATTERNS: [&str; 2] = ["**/*.conllu", "**/*.conllu.gz"];

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// Documents on disk, in sorted path order
///
/// ```no_run
/// use translationese::config::ExtractConfig;
/// use translationese::iterators::Corpus;
///
/// let corpus = Corpus::from_glob("data/**/*.conllu", &ExtractConfig::default()).unwrap();
/// for document in corpus {
///     let document = document.unwrap();
///     println!("{} has {} sentences", document.name, document.trees.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    paths: Vec<PathBuf>,
    levels: Vec<String>,
    policy: SegmentPolicy,
    /// Language for every document, overriding the `lang` level
    lang: Option<Lang>,
}

impl Corpus {
    /// Create from explicit file paths, kept in the given order
    pub fn from_paths(paths: Vec<PathBuf>, config: &ExtractConfig) -> Self {
        Self {
            paths,
            levels: config.levels.clone(),
            policy: config.segment_policy(),
            lang: None,
        }
    }

    /// Create from a glob pattern
    ///
    /// Files are processed in sorted order for deterministic results.
    pub fn from_glob(pattern: &str, config: &ExtractConfig) -> Result<Self, CorpusError> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        paths.sort();
        Ok(Self::from_paths(paths, config))
    }

    /// Every `*.conllu` and `*.conllu.gz` file below `root`
    pub fn from_dir(root: &Path, config: &ExtractConfig) -> Result<Self, CorpusError> {
        let mut paths = Vec::new();
        for pattern in PATTERNS {
            let pattern = root.join(pattern);
            paths.extend(glob::glob(&pattern.to_string_lossy())?.filter_map(Result::ok));
        }
        paths.sort();
        debug!(root = %root.display(), files = paths.len(), "Discovered corpus");
        Ok(Self::from_paths(paths, config))
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read and segment one document
    pub fn read(&self, path: &Path) -> Result<Document, CorpusError> {
        let meta = metadata(path, &self.levels);
        let name = document_name(path);
        let lang = self.lang.unwrap_or_else(|| {
            meta.iter()
                .find(|(level, _)| level == "lang")
                .map_or(Lang::Unsupported, |(_, code)| Lang::from_code(code))
        });

        let mut reader = SentenceReader::from_file(path, self.policy).map_err(|source| {
            CorpusError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let trees = reader
            .by_ref()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CorpusError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let mut document = Document::new(name, lang, trees).with_meta(meta);
        document.stats = reader.stats();
        debug!(
            doc = %document.name,
            trees = document.trees.len(),
            bad = document.stats.bad,
            short = document.stats.short,
            "Read document"
        );
        Ok(document)
    }
}

impl IntoIterator for Corpus {
    type Item = Result<Document, CorpusError>;
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + Send>;

    fn into_iter(self) -> Self::IntoIter {
        let paths = self.paths.clone();
        Box::new(paths.into_iter().map(move |path| self.read(&path)))
    }
}

/// File name without `.gz` and `.conllu`
pub fn document_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.strip_suffix(".conllu").unwrap_or(name).to_string()
}

/// Level values read off `path`; missing directories give empty values
pub fn metadata(path: &Path, levels: &[String]) -> Vec<(String, String)> {
    let mut dirs = path
        .parent()
        .into_iter()
        .flat_map(Path::ancestors)
        .map(|dir| {
            dir.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let mut meta: Vec<(String, String)> = Vec::with_capacity(levels.len());
    for level in levels.iter().rev() {
        let value = if level == "doc" {
            document_name(path)
        } else {
            dirs.next().unwrap_or_default()
        };
        meta.push((level.clone(), value));
    }
    meta.reverse();
    meta
}
