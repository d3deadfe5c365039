//! Per-document feature extraction
//!
//! Every detector and graph metric runs on every sentence of a [`Document`].
//! Each sentence yields an immutable [`SentenceResult`]; the results are
//! folded into a document tally, and the tally is normalised into a
//! [`FeatureVector`] following [`Feature::norm`].

use crate::config::ExtractConfig;
use crate::conllu::{ParseError, SegmentPolicy, SegmentStats, SentenceReader, segment};
use crate::detect::{Family, Outcome, Registry};
use crate::features::{Basis, Feature, FeatureVector, Norm, Value};
use crate::graph::SentenceMetrics;
use crate::lang::Lang;
use crate::lists::{LangLists, SupportLists};
use crate::tree::SentenceTree;
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, warn};

/// Forms left out of the word-length average
const PUNCTUATION: &[&str] = &[".", ",", "!", "?", ":", ";", "\"", "-", "—", "(", ")"];

/// A parsed document with its metadata
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub lang: Lang,
    /// Level name and value pairs, in output column order
    pub meta: Vec<(String, String)>,
    pub trees: Vec<SentenceTree>,
    pub stats: SegmentStats,
}

impl Document {
    pub fn new(name: impl Into<String>, lang: Lang, trees: Vec<SentenceTree>) -> Self {
        let name = name.into();
        let meta = vec![
            ("doc".to_string(), name.clone()),
            ("lang".to_string(), lang.code().to_string()),
        ];
        Self {
            name,
            lang,
            meta,
            trees,
            stats: SegmentStats::default(),
        }
    }

    /// Segment CoNLL-U text into a document
    pub fn from_conllu(
        name: impl Into<String>,
        lang: Lang,
        text: &str,
        policy: SegmentPolicy,
    ) -> Result<Self, ParseError> {
        let (trees, stats) = segment(text, policy)?;
        Ok(Self {
            stats,
            ..Self::new(name, lang, trees)
        })
    }

    /// Segment a CoNLL-U stream into a document
    pub fn from_reader<R: BufRead>(
        name: impl Into<String>,
        lang: Lang,
        reader: R,
        policy: SegmentPolicy,
    ) -> Result<Self, ParseError> {
        let mut sentences = SentenceReader::new(reader, policy);
        let trees = sentences.by_ref().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            stats: sentences.stats(),
            ..Self::new(name, lang, trees)
        })
    }

    pub fn with_meta(mut self, meta: Vec<(String, String)>) -> Self {
        self.meta = meta;
        self
    }
}

/// Everything measured on one sentence
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceResult {
    pub tokens: usize,
    pub verbs: u64,
    /// Ends in a non-terminal such as `Mr.` or `:`
    pub open: bool,
    /// Mean characters per non-punctuation word
    pub word_length: Option<f64>,
    pub metrics: SentenceMetrics,
    pub counts: FxHashMap<Feature, u64>,
    pub basis: FxHashMap<Basis, u64>,
    /// Exact-label counts, aligned with the configured relations
    pub relations: Vec<u64>,
    /// Detector name and reason for each malformed evaluation
    pub malformed: Vec<(String, String)>,
}

fn word_length(tree: &SentenceTree) -> Option<f64> {
    let (words, letters) = tree
        .iter()
        .filter(|t| !t.form_in(PUNCTUATION))
        .fold((0usize, 0usize), |(words, letters), t| {
            (words + 1, letters + t.form.chars().count())
        });
    (words > 0).then(|| letters as f64 / words as f64)
}

fn ends_open(tree: &SentenceTree, lang: Lang) -> bool {
    let terminals = lang.non_terminals();
    tree.last()
        .is_some_and(|last| last.form_in(terminals) || last.lemma_in(terminals))
}

/// Document-level accumulator
#[derive(Debug, Default)]
struct Tally {
    trees: u64,
    words: u64,
    sents: u64,
    verbs: u64,
    /// Token count and open flag per tree, in document order
    lengths: Vec<(usize, bool)>,
    word_length: f64,
    mhd: f64,
    connected: u64,
    mdd: f64,
    mdd_sentences: u64,
    counts: FxHashMap<Feature, u64>,
    basis: FxHashMap<Basis, u64>,
    relations: Vec<u64>,
    malformed: Vec<(String, String)>,
}

impl Tally {
    fn new(relations: usize) -> Self {
        Self {
            relations: vec![0; relations],
            ..Self::default()
        }
    }

    fn absorb(mut self, sentence: SentenceResult) -> Self {
        self.trees += 1;
        self.words += sentence.tokens as u64;
        self.verbs += sentence.verbs;
        if !sentence.open {
            self.sents += 1;
        }
        self.lengths.push((sentence.tokens, sentence.open));
        self.word_length += sentence.word_length.unwrap_or(0.0);
        if let Some(mhd) = sentence.metrics.mhd {
            self.mhd += mhd;
            self.connected += 1;
            if let Some(mdd) = sentence.metrics.mdd {
                self.mdd += mdd;
                self.mdd_sentences += 1;
            }
        }
        for (feature, n) in sentence.counts {
            *self.counts.entry(feature).or_insert(0) += n;
        }
        for (basis, n) in sentence.basis {
            *self.basis.entry(basis).or_insert(0) += n;
        }
        for (total, n) in self.relations.iter_mut().zip(sentence.relations) {
            *total += n;
        }
        self.malformed.extend(sentence.malformed);
        self
    }

    fn count(&self, feature: Feature) -> u64 {
        self.counts.get(&feature).copied().unwrap_or(0)
    }

    fn basis(&self, basis: Basis) -> u64 {
        self.basis.get(&basis).copied().unwrap_or(0)
    }

    /// Mean tree length, a tree ending open absorbing the one after it
    fn sentence_length(&self) -> Value {
        let mut merged = Vec::with_capacity(self.lengths.len());
        let mut i = 0;
        while i < self.lengths.len() {
            let (len, open) = self.lengths[i];
            match self.lengths.get(i + 1) {
                Some((next, _)) if open => {
                    merged.push(len + next);
                    i += 2;
                }
                _ => {
                    merged.push(len);
                    i += 1;
                }
            }
        }
        Value::ratio(merged.iter().sum::<usize>() as f64, merged.len() as u64)
    }

    fn value(&self, feature: Feature) -> Value {
        let count = self.count(feature) as f64;
        match (feature, feature.norm()) {
            (Feature::Wc, _) => Value::Count(self.words),
            (Feature::Sents, _) => Value::Count(self.sents),
            (_, Norm::Raw) => Value::Count(self.count(feature)),
            (_, Norm::Document) => self.sentence_length(),
            (Feature::Wdlength, _) => Value::ratio(self.word_length, self.sents),
            (Feature::Mhd, _) => Value::ratio(self.mhd, self.connected),
            (Feature::Mdd, _) => Value::ratio(self.mdd, self.mdd_sentences),
            (_, Norm::Sentences) => Value::ratio(count, self.sents),
            (_, Norm::ConnectedSentences) => Value::ratio(count, self.connected),
            (_, Norm::Words) => Value::ratio(count, self.words),
            (_, Norm::Verbs) => Value::ratio(count, self.verbs),
            (_, Norm::Trees) => Value::ratio(count, self.trees),
            (_, Norm::Basis(basis)) => Value::ratio(count, self.basis(basis)),
        }
    }
}

/// Document to feature vector
///
/// Holds no per-document state, so one extractor serves every thread.
pub struct Extractor {
    registry: Registry,
    lists: Arc<SupportLists>,
    relations: Vec<String>,
}

impl Extractor {
    pub fn new(config: &ExtractConfig, lists: Arc<SupportLists>) -> Self {
        Self {
            registry: Registry::standard(),
            lists,
            relations: config.relations.clone(),
        }
    }

    /// Replace the built-in detectors
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// Feature column names, in output order
    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        Feature::ALL
            .iter()
            .map(|f| f.key())
            .chain(self.relations.iter().map(String::as_str))
    }

    /// Run every detector and metric on one sentence
    pub fn sentence(&self, tree: &SentenceTree, lang: Lang, lists: &LangLists) -> SentenceResult {
        let mut counts = FxHashMap::default();
        let mut basis = FxHashMap::default();
        let mut malformed = Vec::new();
        for family in Family::ALL {
            let Some(detector) = self.registry.get(lang, family) else {
                continue;
            };
            match detector.detect(tree, lists) {
                Outcome::Match(detection) => {
                    for (feature, n) in detection.counts {
                        *counts.entry(feature).or_insert(0) += n;
                    }
                    for (b, n) in detection.basis {
                        *basis.entry(b).or_insert(0) += n;
                    }
                }
                Outcome::NoMatch => {}
                Outcome::Malformed(reason) => malformed.push((detector.name().to_string(), reason)),
            }
        }
        let relations = self
            .relations
            .iter()
            .map(|rel| tree.iter().filter(|t| t.rel == *rel).count() as u64)
            .collect();
        SentenceResult {
            tokens: tree.len(),
            verbs: tree.iter().filter(|t| t.is_upos("VERB")).count() as u64,
            open: ends_open(tree, lang),
            word_length: word_length(tree),
            metrics: SentenceMetrics::compute(tree),
            counts,
            basis,
            relations,
            malformed,
        }
    }

    pub fn extract(&self, document: &Document) -> FeatureVector {
        let lists = self.lists.for_lang(document.lang);
        let tally = document
            .trees
            .iter()
            .map(|tree| self.sentence(tree, document.lang, lists))
            .fold(Tally::new(self.relations.len()), Tally::absorb);

        for (detector, reason) in &tally.malformed {
            warn!(doc = %document.name, detector = %detector, "Malformed sentence: {}", reason);
        }
        debug!(
            doc = %document.name,
            lang = %document.lang,
            trees = tally.trees,
            connected = tally.connected,
            bad = document.stats.bad,
            short = document.stats.short,
            "Extracted features"
        );

        let mut vector = FeatureVector::new(document.name.clone(), document.meta.clone());
        for &feature in Feature::ALL {
            vector.push(feature.key(), tally.value(feature));
        }
        for (rel, &n) in self.relations.iter().zip(&tally.relations) {
            vector.push(rel.as_str(), Value::ratio(n as f64, tally.sents));
        }
        vector
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("registry", &self.registry)
            .field("relations", &self.relations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_SAT: &str = "1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\tNumber=Sing\t3\tnsubj\t_\t_
3\tsat\tsit\tVERB\tVBD\tTense=Past|VerbForm=Fin\t0\troot\t_\t_
4\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_

";

    const MR_SMITH: &str = "1\tI\tI\tPRON\tPRP\t_\t2\tnsubj\t_\t_
2\tmet\tmeet\tVERB\tVBD\tTense=Past|VerbForm=Fin\t0\troot\t_\t_
3\tMr.\tMr.\tPROPN\tNNP\t_\t2\tobj\t_\t_

1\tSmith\tSmith\tPROPN\tNNP\t_\t2\tnsubj\t_\t_
2\tleft\tleave\tVERB\tVBD\tTense=Past|VerbForm=Fin\t0\troot\t_\t_
3\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_

";

    fn extractor() -> Extractor {
        Extractor::new(&ExtractConfig::default(), Arc::new(SupportLists::new()))
    }

    fn document(text: &str, lang: Lang) -> Document {
        Document::from_conllu("doc1", lang, text, SegmentPolicy::default()).unwrap()
    }

    #[test]
    fn test_cat_sat() {
        let vector = extractor().extract(&document(CAT_SAT, Lang::En));
        assert_eq!(vector.feature(Feature::Wc), Some(Value::Count(4)));
        assert_eq!(vector.feature(Feature::Sents), Some(Value::Count(1)));
        assert_eq!(vector.feature(Feature::Pasttense), Some(Value::Ratio(1.0)));
        assert_eq!(vector.feature(Feature::Mdd), Some(Value::Ratio(0.0)));
        assert_eq!(vector.feature(Feature::Nn), Some(Value::Ratio(0.25)));
        assert_eq!(vector.feature(Feature::Finites), Some(Value::Ratio(1.0)));
        assert_eq!(vector.get("nsubj"), Some(Value::Ratio(1.0)));
    }

    #[test]
    fn test_open_sentence_merged_for_length() {
        let vector = extractor().extract(&document(MR_SMITH, Lang::En));
        assert_eq!(vector.feature(Feature::Wc), Some(Value::Count(6)));
        assert_eq!(vector.feature(Feature::Sents), Some(Value::Count(1)));
        assert_eq!(vector.feature(Feature::Sentlength), Some(Value::Ratio(6.0)));
        // both trees still count past verbs, over the one sentence
        assert_eq!(vector.feature(Feature::Pasttense), Some(Value::Ratio(2.0)));
    }

    #[test]
    fn test_key_order_is_fixed() {
        let extractor = extractor();
        let vector = extractor.extract(&document(CAT_SAT, Lang::En));
        let keys: Vec<_> = vector.keys().collect();
        let expected: Vec<_> = extractor.feature_keys().collect();
        assert_eq!(keys, expected);
        assert_eq!(keys.len(), Feature::ALL.len() + 31);
        assert_eq!(vector.meta[0], ("doc".to_string(), "doc1".to_string()));
    }

    #[test]
    fn test_empty_document_is_undefined() {
        let vector = extractor().extract(&Document::new("empty", Lang::En, vec![]));
        assert_eq!(vector.feature(Feature::Wc), Some(Value::Count(0)));
        assert_eq!(vector.feature(Feature::Sentlength), Some(Value::Undefined));
        assert_eq!(vector.feature(Feature::Ppron), Some(Value::Undefined));
        assert_eq!(vector.feature(Feature::Comp), Some(Value::Undefined));
    }

    #[test]
    fn test_unsupported_language_yields_zero_counts() {
        let vector = extractor().extract(&document(CAT_SAT, Lang::Unsupported));
        assert_eq!(vector.feature(Feature::Ppron), Some(Value::Ratio(0.0)));
        assert_eq!(vector.feature(Feature::Nn), Some(Value::Ratio(0.25)));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = extractor();
        let document = document(MR_SMITH, Lang::En);
        assert_eq!(extractor.extract(&document), extractor.extract(&document));
    }

    #[test]
    fn test_word_length_skips_punctuation() {
        let document = document(CAT_SAT, Lang::En);
        assert_eq!(word_length(&document.trees[0]), Some(3.0));
    }

    #[test]
    fn test_from_reader_keeps_stats() {
        let quotes = "1\t\"\t\"\tPUNCT\t_\t_\t0\troot\t_\t_
2\t...\t...\tPUNCT\t_\t_\t1\tpunct\t_\t_
3\t\"\t\"\tPUNCT\t_\t_\t1\tpunct\t_\t_

";
        let text = format!("{quotes}{CAT_SAT}");
        let document =
            Document::from_reader("doc1", Lang::En, text.as_bytes(), SegmentPolicy::default())
                .unwrap();
        assert_eq!(document.trees.len(), 1);
        assert_eq!(document.stats.bad, 1);
        assert_eq!(document.stats.kept, 1);
    }
}
