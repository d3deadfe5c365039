//! Degrees of comparison over adjectives and adverbs
//!
//! Every ADJ/ADV token adds to the [`Basis::AdjAdv`] denominator. Synthetic
//! forms are read off `Degree=Cmp`/`Degree=Sup`; analytic ones (`more`,
//! `наиболее`, `самый`) are language rules layered on top.

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::{Basis, Feature};
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::navigation::{ChildQuery, head_of, select_child};
use crate::tree::{SentenceTree, Token};

fn is_adjectival(token: &Token) -> bool {
    token.is_upos("ADJ") || token.is_upos("ADV")
}

fn has_modifier(token: &Token, tree: &SentenceTree, lemma: &str, upos: &str) -> bool {
    select_child(token, tree, ChildQuery::LemmaPos { lemma, upos }).is_some()
}

/// Basis and morphological degree, shared by every language
fn synthetic(tree: &SentenceTree) -> Detection {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_adjectival(t)) {
        detection.add_basis(Basis::AdjAdv, 1);
        if token.feats.is("Degree", "Cmp") {
            detection.hit(Feature::Comp, &token.lemma);
        }
        if token.feats.is("Degree", "Sup") {
            detection.hit(Feature::Sup, &token.lemma);
        }
    }
    detection
}

fn degrees(tree: &SentenceTree, _: &LangLists) -> Outcome {
    synthetic(tree).into_outcome()
}

fn degrees_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = synthetic(tree);
    for token in tree.iter().filter(|t| is_adjectival(t)) {
        if has_modifier(token, tree, "more", "ADV") {
            detection.hit(Feature::Comp, &token.lemma);
        }
        if has_modifier(token, tree, "most", "ADV") {
            detection.hit(Feature::Sup, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// `mehr` on a verb without comparative morphology: `er arbeitet mehr`
fn degrees_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = synthetic(tree);
    for token in tree {
        if token.lemma == "mehr"
            && !token.feats.is("Degree", "Cmp")
            && head_of(token, tree).is_some_and(|head| head.is_upos("VERB"))
        {
            detection.hit(Feature::Comp, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn degrees_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = synthetic(tree);
    for token in tree.iter().filter(|t| is_adjectival(t)) {
        let positive = token.feats.is("Degree", "Pos");
        if token.lemma == "больший" && positive {
            detection.hit(Feature::Comp, &token.lemma);
        }
        // наилучший tagged positive
        if token.lemma.starts_with("наи")
            && positive
            && !token.lemma_in(&["наивный", "наискосок"])
        {
            detection.hit(Feature::Sup, &token.lemma);
        }
        if has_modifier(token, tree, "наиболее", "ADV") {
            detection.hit(Feature::Sup, &token.lemma);
        }
        if has_modifier(token, tree, "самый", "ADJ") {
            detection.hit(Feature::Sup, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(Degrees, "degrees", degrees);
detector!(DegreesEn, "degrees-en", degrees_en);
detector!(DegreesDe, "degrees-de", degrees_de);
detector!(DegreesRu, "degrees-ru", degrees_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register_neutral(Family::Comparison, Box::new(Degrees));
    registry.register(Lang::En, Family::Comparison, Box::new(DegreesEn));
    registry.register(Lang::De, Family::Comparison, Box::new(DegreesDe));
    registry.register(Lang::Ru, Family::Comparison, Box::new(DegreesRu));
}
