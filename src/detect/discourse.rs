//! Discourse markers and epistemic stance
//!
//! Markers are multi-word strings matched against the space-joined forms of a
//! sentence. Each list item counts at most once per sentence.

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::{LangLists, ListCategory};
use crate::navigation::{children_of, has_aux_child_form, has_child_lemma_in};
use crate::tree::SentenceTree;

const MARKERS: [(ListCategory, Feature); 5] = [
    (ListCategory::Additive, Feature::Addit),
    (ListCategory::Adversative, Feature::Advers),
    (ListCategory::Causal, Feature::Caus),
    (ListCategory::TempSequen, Feature::Tempseq),
    (ListCategory::Epistemic, Feature::Epist),
];

const STANCE_VERBS_EN: &[&str] = &["argue", "doubt", "assume", "believe", "find"];
const FIRST_PERSON_EN: &[&str] = &["I", "we"];
const FIRST_PERSON_RU: &[&str] = &["я", "мы"];

/// Uppercase first letter, rest lowercased
fn capitalize(item: &str) -> String {
    let mut chars = item.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Whether `item` occurs in `sentence` on word boundaries
///
/// Capitalised items only need a trailing space. Lowercase items also match
/// capitalised at the start of a clause.
fn occurs(sentence: &str, item: &str) -> bool {
    let Some(first) = item.chars().next() else {
        return false;
    };
    if first.is_uppercase() {
        return sentence.contains(&format!("{item} "));
    }
    sentence.contains(&format!(" {item} ")) || sentence.contains(&format!("{} ", capitalize(item)))
}

fn discourse_markers(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let sentence = tree.text();
    let mut detection = Detection::new();
    for (category, feature) in MARKERS {
        for item in lists.get(category).iter().map(str::trim) {
            if occurs(&sentence, item) {
                detection.hit(feature, item);
            }
        }
    }
    detection.into_outcome()
}

/// First-person stance predicates: `I believe`, `we would say`, `I am convinced`
fn stance_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let sentence = tree.text();
    let mut detection = Detection::new();
    for token in tree {
        if !has_child_lemma_in(token, tree, FIRST_PERSON_EN) {
            continue;
        }
        let stance = match token.form.as_str() {
            form if STANCE_VERBS_EN.contains(&form) => !has_aux_child_form(token, tree, "did"),
            "say" => has_aux_child_form(token, tree, "would"),
            "convinced" | "persuaded" => children_of(token, tree).any(|c| c.lemma == "be"),
            "feel" => sentence.contains("feel like") || sentence.contains("feel that"),
            _ => false,
        };
        if stance {
            detection.hit(Feature::Epist, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn stance_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.lemma_in(&["убежденный", "уверенный"])) {
        if has_child_lemma_in(token, tree, FIRST_PERSON_RU)
            && !has_child_lemma_in(token, tree, &["быть"])
        {
            detection.hit(Feature::Epist, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(DiscourseMarkers, "discourse-markers", discourse_markers);
detector!(StanceEn, "stance-en", stance_en);
detector!(StanceRu, "stance-ru", stance_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register_neutral(Family::DiscourseMarkers, Box::new(DiscourseMarkers));
    registry.register(Lang::En, Family::Stance, Box::new(StanceEn));
    registry.register(Lang::Ru, Family::Stance, Box::new(StanceRu));
}
