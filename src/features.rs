//! Feature inventory and per-document feature vectors
//!
//! Every feature is normalised by exactly one denominator, given by
//! [`Feature::norm`]. The column order of a [`FeatureVector`] is fixed:
//! metadata, then [`Feature::ALL`], then the configured relations.

use std::fmt;

/// Internal denominators tallied by detectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Basis {
    /// Adjectives plus adverbs
    AdjAdv,
    /// Content-word tokens (ADJ, ADV, VERB, NOUN)
    ContentTokens,
    /// Tokens attached as nsubj, obj or iobj
    CoreArgs,
}

/// How a feature count becomes a reported value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    /// Reported as is
    Raw,
    /// Mean sentence length, computed by the pipeline
    Document,
    Sentences,
    /// Sentences whose dependency graph is connected
    ConnectedSentences,
    Words,
    Verbs,
    /// Sentence trees kept after segmentation
    Trees,
    Basis(Basis),
}

macro_rules! features {
    ($($variant:ident => $key:literal : $norm:expr),* $(,)?) => {
        /// Output features in column order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Feature {
            $($variant),*
        }

        impl Feature {
            pub const ALL: &'static [Feature] = &[$(Feature::$variant),*];

            /// Column name
            pub fn key(self) -> &'static str {
                match self {
                    $(Feature::$variant => $key),*
                }
            }

            pub fn norm(self) -> Norm {
                match self {
                    $(Feature::$variant => $norm),*
                }
            }
        }
    };
}

features! {
    Wc => "wc": Norm::Raw,
    Sents => "sents": Norm::Raw,
    Sentlength => "sentlength": Norm::Document,
    Wdlength => "wdlength": Norm::Sentences,
    Interrog => "interrog": Norm::Sentences,
    Mhd => "mhd": Norm::ConnectedSentences,
    Mdd => "mdd": Norm::ConnectedSentences,
    Attrib => "attrib": Norm::Sentences,
    Pasttense => "pasttense": Norm::Sentences,
    Addit => "addit": Norm::Sentences,
    Advers => "advers": Norm::Sentences,
    Caus => "caus": Norm::Sentences,
    Tempseq => "tempseq": Norm::Sentences,
    Epist => "epist": Norm::Sentences,
    Cconj => "cconj": Norm::Sentences,
    Sconj => "sconj": Norm::Sentences,
    Whconj => "whconj": Norm::Sentences,
    Relativ => "relativ": Norm::Sentences,
    Pied => "pied": Norm::Sentences,
    Correl => "correl": Norm::Sentences,
    Copula => "copula": Norm::Sentences,
    Neg => "neg": Norm::Sentences,
    Propn => "propn": Norm::Sentences,
    Mpred => "mpred": Norm::Sentences,
    Bypassives => "bypassives": Norm::Sentences,
    Agentless => "agentless": Norm::Sentences,
    But => "but": Norm::Sentences,
    Nn => "nn": Norm::Words,
    Lexdens => "lexdens": Norm::Words,
    Ppron => "ppron": Norm::Words,
    Possdet => "possdet": Norm::Words,
    Indef => "indef": Norm::Words,
    Determ => "determ": Norm::Words,
    Adp => "adp": Norm::Words,
    Mquantif => "mquantif": Norm::Words,
    LexTtr => "lexTTR": Norm::Basis(Basis::ContentTokens),
    Numcls => "numcls": Norm::Trees,
    Simple => "simple": Norm::Trees,
    Nnargs => "nnargs": Norm::Basis(Basis::CoreArgs),
    Finites => "finites": Norm::Verbs,
    Infs => "infs": Norm::Verbs,
    Pverbals => "pverbals": Norm::Verbs,
    Deverbals => "deverbals": Norm::Verbs,
    Converts => "converts": Norm::Verbs,
    Comp => "comp": Norm::Basis(Basis::AdjAdv),
    Sup => "sup": Norm::Basis(Basis::AdjAdv),
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A reported feature value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Count(u64),
    Ratio(f64),
    /// Zero denominator
    Undefined,
}

impl Value {
    /// `numerator / denominator`, undefined when the denominator is zero
    pub fn ratio(numerator: f64, denominator: u64) -> Self {
        if denominator == 0 {
            Value::Undefined
        } else {
            Value::Ratio(numerator / denominator as f64)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Count(n) => Some(n as f64),
            Value::Ratio(r) => Some(r),
            Value::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Count(n) => write!(f, "{n}"),
            Value::Ratio(r) => write!(f, "{r}"),
            Value::Undefined => f.write_str("NA"),
        }
    }
}

/// Feature values for one document, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub doc: String,
    /// Configured level name and value pairs
    pub meta: Vec<(String, String)>,
    values: Vec<(String, Value)>,
}

impl FeatureVector {
    pub fn new(doc: String, meta: Vec<(String, String)>) -> Self {
        Self {
            doc,
            meta,
            values: Vec::with_capacity(Feature::ALL.len() + 31),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.values.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| *value)
    }

    pub fn feature(&self, feature: Feature) -> Option<Value> {
        self.get(feature.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
