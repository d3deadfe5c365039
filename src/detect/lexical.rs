//! Closed-class lexical counts: negation, determiners, adpositions

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::tree::SentenceTree;

const NEG_EN: &[&str] = &["no", "not", "neither"];
const NEG_DE: &[&str] = &["kein", "nicht"];
const NEG_RU: &[&str] = &["нет", "не"];
const NEG_ES: &[&str] = &["no", "ni"];

// frequency-ranked
const DET_EN: &[&str] = &[
    "the", "a", "this", "some", "these", "that", "any", "all", "every", "another", "each", "those",
    "either", "such",
];

const DET_DE: &[&str] = &[
    "dies", "alle", "jed", "einige", "solch", "viel", "ander", "jen", "all", "irgendwelch",
    "dieselbe", "jeglich", "daßelbe", "irgendein", "diejenigen",
];

const DET_RU: &[&str] = &[
    "этот", "весь", "тот", "такой", "какой", "каждый", "любой", "некоторый", "какой-то", "один",
    "сей", "это", "всякий", "некий", "какой-либо", "какой-нибудь", "кое-какой",
];

const DET_ES: &[&str] = &[
    "el", "la", "los", "las", "lo", "al", "del", "un", "una", "unos", "unas", "este", "esta", "esto",
    "estos", "estas", "ese", "esa", "eso", "esos", "esas", "aquel", "aquella", "aquello",
    "aquellos", "aquellas", "tanto", "tanta", "tantos", "tantas", "tal", "tales", "tan",
];

const ADP_EN: &[&str] = &[
    "of", "in", "unlike", "for", "at", "as", "to", "along", "with", "after", "on", "towards",
    "amongst", "within", "over", "during", "by", "against", "about", "out", "from", "without",
    "into", "like", "up", "between", "before", "down", "across", "per", "off", "around", "since",
    "onto", "through", "beyond", "under", "despite", "than", "until", "because", "upon", "among",
    "back", "behind", "past", "outside", "throughout", "inside", "via", "above", "alongside",
    "versus", "below", "round",
];

const ADP_ES: &[&str] = &[
    "a", "ante", "bajo", "con", "contra", "de", "desde", "durante", "en", "entre", "hacia", "hasta",
    "mediante", "para", "por", "según", "sin", "sobre", "tras", "excepto", "salvo", "incluso",
];

fn negation(tree: &SentenceTree, lemmas: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.lemma_in(lemmas)) {
        detection.hit(Feature::Neg, &token.lemma);
    }
    detection.into_outcome()
}

fn determiners(tree: &SentenceTree, lemmas: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.rel == "det" && t.lemma_in(lemmas)) {
        detection.hit(Feature::Determ, &token.lemma);
    }
    detection.into_outcome()
}

fn adpositions(tree: &SentenceTree, lemmas: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("ADP") && t.lemma_in(lemmas)) {
        detection.hit(Feature::Adp, &token.lemma);
    }
    detection.into_outcome()
}

fn neg_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    negation(tree, NEG_EN)
}

fn neg_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    negation(tree, NEG_DE)
}

fn neg_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    negation(tree, NEG_RU)
}

fn neg_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    negation(tree, NEG_ES)
}

fn determ_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    determiners(tree, DET_EN)
}

fn determ_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    determiners(tree, DET_DE)
}

fn determ_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    determiners(tree, DET_RU)
}

fn determ_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    determiners(tree, DET_ES)
}

fn adp_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    adpositions(tree, ADP_EN)
}

fn adp_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    adpositions(tree, ADP_ES)
}

detector!(NegationEn, "neg-en", neg_en);
detector!(NegationDe, "neg-de", neg_de);
detector!(NegationRu, "neg-ru", neg_ru);
detector!(NegationEs, "neg-es", neg_es);
detector!(DeterminersEn, "determ-en", determ_en);
detector!(DeterminersDe, "determ-de", determ_de);
detector!(DeterminersRu, "determ-ru", determ_ru);
detector!(DeterminersEs, "determ-es", determ_es);
detector!(AdpositionsEn, "adp-en", adp_en);
detector!(AdpositionsEs, "adp-es", adp_es);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Negation, Box::new(NegationEn));
    registry.register(Lang::De, Family::Negation, Box::new(NegationDe));
    registry.register(Lang::Ru, Family::Negation, Box::new(NegationRu));
    registry.register(Lang::Es, Family::Negation, Box::new(NegationEs));
    registry.register(Lang::En, Family::Determiners, Box::new(DeterminersEn));
    registry.register(Lang::De, Family::Determiners, Box::new(DeterminersDe));
    registry.register(Lang::Ru, Family::Determiners, Box::new(DeterminersRu));
    registry.register(Lang::Es, Family::Determiners, Box::new(DeterminersEs));
    registry.register(Lang::En, Family::Adpositions, Box::new(AdpositionsEn));
    registry.register(Lang::Es, Family::Adpositions, Box::new(AdpositionsEs));
}
