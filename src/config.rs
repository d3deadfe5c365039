//! Extraction settings, read from TOML

use crate::conllu::SegmentPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

/// UD relations reported as per-sentence frequencies
///
/// Subtypes are not merged: `aux:pass` is counted on its own and `acl:relcl`
/// does not contribute to `acl`.
pub const DEFAULT_RELATIONS: [&str; 31] = [
    "acl",
    "advcl",
    "advmod",
    "amod",
    "appos",
    "aux:pass",
    "case",
    "cc",
    "ccomp",
    "clf",
    "compound",
    "dep",
    "discourse",
    "dislocated",
    "expl",
    "fixed",
    "flat",
    "goeswith",
    "iobj",
    "list",
    "mark",
    "nmod",
    "nsubj",
    "nummod",
    "obj",
    "obl",
    "orphan",
    "parataxis",
    "reparandum",
    "vocative",
    "xcomp",
];

/// Directory levels below the corpus root, outermost first, file name last
pub const DEFAULT_LEVELS: [&str; 4] = ["doc", "register", "status", "lang"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Sentences with fewer tokens are dropped
    pub min_len: usize,
    /// Also drop sentences made only of PUNCT and NUM tokens
    pub strict_punct_num: bool,
    pub relations: Vec<String>,
    /// Metadata levels read from document paths
    pub levels: Vec<String>,
    /// Directory holding `<lang>_<category>.lst` files
    pub support_dir: Option<PathBuf>,
    /// Languages whose support lists are loaded
    pub langs: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_len: 2,
            strict_punct_num: true,
            relations: DEFAULT_RELATIONS.iter().map(|r| r.to_string()).collect(),
            levels: DEFAULT_LEVELS.iter().map(|l| l.to_string()).collect(),
            support_dir: None,
            langs: ["en", "de", "ru", "es"].iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl ExtractConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn segment_policy(&self) -> SegmentPolicy {
        SegmentPolicy {
            min_len: self.min_len,
            strict_punct_num: self.strict_punct_num,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.min_len, 2);
        assert!(config.strict_punct_num);
        assert_eq!(config.relations.len(), 31);
        assert_eq!(config.relations[5], "aux:pass");
        assert_eq!(config.levels, vec!["doc", "register", "status", "lang"]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractConfig::from_toml_str(
            r#"
            min_len = 4
            relations = ["nsubj", "obj"]
            support_dir = "support"
            "#,
        )
        .unwrap();
        assert_eq!(config.min_len, 4);
        assert!(config.strict_punct_num);
        assert_eq!(config.relations, vec!["nsubj", "obj"]);
        assert_eq!(config.support_dir, Some(PathBuf::from("support")));
        assert_eq!(config.segment_policy().min_len, 4);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ExtractConfig::from_toml_str("min_len = \"two\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extract.toml");
        std::fs::write(&path, "strict_punct_num = false\nlevels = [\"doc\", \"lang\"]\n").unwrap();
        let config = ExtractConfig::from_file(&path).unwrap();
        assert!(!config.strict_punct_num);
        assert_eq!(config.levels, vec!["doc", "lang"]);

        let missing = ExtractConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
