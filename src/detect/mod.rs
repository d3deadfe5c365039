//! Rule-based pattern detectors
//!
//! A [`Detector`] inspects one sentence and reports per-feature counts. The
//! [`Registry`] maps a language and a detector [`Family`] to the detector that
//! implements it. Languages without an entry for a family fall back to the
//! language-neutral detector for that family, if there is one, and otherwise
//! contribute nothing.

use crate::features::{Basis, Feature};
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::tree::SentenceTree;
use rustc_hash::FxHashMap;

/// Declare a unit-struct detector backed by a plain function
macro_rules! detector {
    ($name:ident, $label:literal, $func:path) => {
        pub struct $name;

        impl $crate::detect::Detector for $name {
            fn name(&self) -> &str {
                $label
            }

            fn detect(
                &self,
                tree: &$crate::tree::SentenceTree,
                lists: &$crate::lists::LangLists,
            ) -> $crate::detect::Outcome {
                $func(tree, lists)
            }
        }
    };
}
pub(crate) use detector;

pub mod connectives;
pub mod degree;
pub mod discourse;
pub mod general;
pub mod lexical;
pub mod modality;
pub mod nominal;
pub mod reference;
pub mod relative;
pub mod verbal;
pub mod voice;

/// Counts produced by one detector on one sentence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub counts: Vec<(Feature, u64)>,
    /// Contributions to internal denominators
    pub basis: Vec<(Basis, u64)>,
    /// Lemmas that triggered a count, in sentence order
    pub matches: Vec<String>,
}

impl Detection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, feature: Feature, n: u64) {
        match self.counts.iter_mut().find(|(f, _)| *f == feature) {
            Some((_, count)) => *count += n,
            None => self.counts.push((feature, n)),
        }
    }

    pub fn bump(&mut self, feature: Feature) {
        self.add(feature, 1);
    }

    pub fn add_basis(&mut self, basis: Basis, n: u64) {
        match self.basis.iter_mut().find(|(b, _)| *b == basis) {
            Some((_, count)) => *count += n,
            None => self.basis.push((basis, n)),
        }
    }

    /// Count one hit for `feature` and record the lemma
    pub fn hit(&mut self, feature: Feature, lemma: &str) {
        self.bump(feature);
        self.matches.push(lemma.to_lowercase());
    }

    pub fn count(&self, feature: Feature) -> u64 {
        self.counts
            .iter()
            .filter(|(f, _)| *f == feature)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn basis_count(&self, basis: Basis) -> u64 {
        self.basis
            .iter()
            .filter(|(b, _)| *b == basis)
            .map(|(_, n)| n)
            .sum()
    }

    /// `NoMatch` when nothing was counted or recorded
    pub fn into_outcome(mut self) -> Outcome {
        self.counts.retain(|(_, n)| *n > 0);
        self.basis.retain(|(_, n)| *n > 0);
        if self.counts.is_empty() && self.basis.is_empty() && self.matches.is_empty() {
            Outcome::NoMatch
        } else {
            Outcome::Match(self)
        }
    }
}

/// Result of running a detector on a sentence
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Match(Detection),
    NoMatch,
    /// The sentence lacks the structure the detector needs
    Malformed(String),
}

impl Outcome {
    pub fn count(&self, feature: Feature) -> u64 {
        match self {
            Outcome::Match(detection) => detection.count(feature),
            _ => 0,
        }
    }

    pub fn matches(&self) -> &[String] {
        match self {
            Outcome::Match(detection) => &detection.matches,
            _ => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }
}

pub trait Detector: Send + Sync {
    /// Stable identifier used in logs
    fn name(&self) -> &str;

    fn detect(&self, tree: &SentenceTree, lists: &LangLists) -> Outcome;
}

/// Detector families, one registry slot per language each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Nouns,
    ProperNouns,
    Interrogatives,
    Attributives,
    PastTense,
    Clauses,
    NounArgs,
    Content,
    Copulas,
    PersonalPronouns,
    Possessives,
    Indefinites,
    Coordinators,
    Subordinators,
    WhConjunctions,
    Contrastive,
    Relatives,
    Negation,
    Determiners,
    Adpositions,
    Modality,
    AdvQuantifiers,
    Passives,
    Nominals,
    Finites,
    Infinitives,
    Participles,
    Comparison,
    DiscourseMarkers,
    Stance,
}

impl Family {
    pub const ALL: [Family; 30] = [
        Family::Nouns,
        Family::ProperNouns,
        Family::Interrogatives,
        Family::Attributives,
        Family::PastTense,
        Family::Clauses,
        Family::NounArgs,
        Family::Content,
        Family::Copulas,
        Family::PersonalPronouns,
        Family::Possessives,
        Family::Indefinites,
        Family::Coordinators,
        Family::Subordinators,
        Family::WhConjunctions,
        Family::Contrastive,
        Family::Relatives,
        Family::Negation,
        Family::Determiners,
        Family::Adpositions,
        Family::Modality,
        Family::AdvQuantifiers,
        Family::Passives,
        Family::Nominals,
        Family::Finites,
        Family::Infinitives,
        Family::Participles,
        Family::Comparison,
        Family::DiscourseMarkers,
        Family::Stance,
    ];
}

/// Language and family to detector lookup
#[derive(Default)]
pub struct Registry {
    entries: FxHashMap<(Lang, Family), Box<dyn Detector>>,
    neutral: FxHashMap<Family, Box<dyn Detector>>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in detector
    pub fn standard() -> Self {
        let mut registry = Self::new();
        general::register(&mut registry);
        reference::register(&mut registry);
        connectives::register(&mut registry);
        relative::register(&mut registry);
        lexical::register(&mut registry);
        modality::register(&mut registry);
        voice::register(&mut registry);
        nominal::register(&mut registry);
        verbal::register(&mut registry);
        degree::register(&mut registry);
        discourse::register(&mut registry);
        registry
    }

    pub fn register(&mut self, lang: Lang, family: Family, detector: Box<dyn Detector>) {
        self.entries.insert((lang, family), detector);
    }

    /// Register a detector used for every language without its own entry
    pub fn register_neutral(&mut self, family: Family, detector: Box<dyn Detector>) {
        self.neutral.insert(family, detector);
    }

    pub fn get(&self, lang: Lang, family: Family) -> Option<&dyn Detector> {
        self.entries
            .get(&(lang, family))
            .or_else(|| self.neutral.get(&family))
            .map(|detector| detector.as_ref())
    }

    pub fn detect(
        &self,
        lang: Lang,
        family: Family,
        tree: &SentenceTree,
        lists: &LangLists,
    ) -> Outcome {
        match self.get(lang, family) {
            Some(detector) => detector.detect(tree, lists),
            None => Outcome::NoMatch,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        let mut neutral: Vec<_> = self.neutral.keys().collect();
        neutral.sort();
        f.debug_struct("Registry")
            .field("entries", &keys)
            .field("neutral", &neutral)
            .finish()
    }
}
