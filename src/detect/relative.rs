//! Relative clauses, correlative constructions and pied-piping
//!
//! Positions below are token ids. A window of `n` means the trigger sits at
//! most `n` ids to the left of the token it attaches to. Questions are
//! skipped entirely: their wh-words are interrogative, not relative.

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::navigation::{child_upos, previous_token};
use crate::tree::{SentenceTree, Token};

const REL_EN: &[&str] = &["which", "that", "whose", "whom", "what", "who"];
const DEM_EN: &[&str] = &["those", "such"];

const REL_DE: &[&str] = &["der", "welch", "was", "wer"];
const DEM_DE: &[&str] = &[
    "darüber", "der", "das", "dasselbe", "jen", "solch", "diejenigen", "jener",
];

const REL_RU: &[&str] = &["который", "что", "кто"];
const DEM_RU: &[&str] = &["тот", "такой", "то"];

/// `trigger` lies within `window` ids before `anchor`
fn within(trigger: usize, anchor: usize, window: usize) -> bool {
    anchor > trigger && anchor - trigger <= window
}

fn is_det_or_pron(token: &Token) -> bool {
    token.is_upos("DET") || token.is_upos("PRON")
}

fn is_comma(token: &Token) -> bool {
    token.form == ","
}

fn follows_adposition(token: &Token, tree: &SentenceTree) -> bool {
    previous_token(token, tree).is_some_and(|prev| prev.is_upos("ADP"))
}

/// Run `body` unless the sentence is a question
fn statements_only(tree: &SentenceTree, body: impl FnOnce(&mut Detection)) -> Outcome {
    match tree.is_interrogative() {
        None => Outcome::Malformed("relative clause check needs two tokens".into()),
        Some(true) => Outcome::NoMatch,
        Some(false) => {
            let mut detection = Detection::new();
            body(&mut detection);
            detection.into_outcome()
        }
    }
}

fn relatives_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    statements_only(tree, |detection| {
        // the rightmost demonstrative anywhere in the sentence
        let demonstrative = tree
            .iter()
            .filter(|t| is_det_or_pron(t) && t.lemma_in(DEM_EN))
            .last()
            .map(|t| t.id);

        let mut total: u64 = 0;
        for token in tree.iter().filter(|t| t.is_upos("PRON") && t.lemma_in(REL_EN)) {
            total += 1;
            detection.matches.push(token.lemma.to_lowercase());
            if demonstrative.is_some_and(|dem| within(dem, token.id, 3)) {
                detection.bump(Feature::Correl);
            }
            if child_upos(token, tree).contains(&"ADP") {
                // a pronoun with its own preposition after its head is phrasal `that`
                if token.head < token.id {
                    total = total.saturating_sub(1);
                } else {
                    detection.bump(Feature::Pied);
                }
            }
        }
        detection.add(Feature::Relativ, total);
    })
}

/// Relative pronoun after a comma, optionally announced by a demonstrative
///
/// Each comma within three ids of the pronoun counts one relative clause. The
/// demonstrative is searched within three ids before each such comma.
fn comma_relatives(
    token: &Token,
    tree: &SentenceTree,
    detection: &mut Detection,
    is_demonstrative: impl Fn(&Token) -> bool,
    pied_piped: bool,
) {
    let mut comma = None;
    let mut demonstrative = None;
    for candidate in tree.iter().filter(|t| is_comma(t) && within(t.id, token.id, 3)) {
        comma = Some(candidate.id);
        detection.hit(Feature::Relativ, &token.lemma);
        if let Some(dem) = tree
            .iter()
            .filter(|t| is_det_or_pron(t) && is_demonstrative(t) && within(t.id, candidate.id, 3))
            .last()
        {
            demonstrative = Some(dem.id);
        }
    }

    let Some(comma) = comma else {
        return;
    };
    match demonstrative {
        None => {
            if pied_piped {
                detection.bump(Feature::Pied);
            }
        }
        Some(dem) => {
            if dem < comma && comma < token.id {
                detection.bump(Feature::Correl);
            }
            if pied_piped {
                detection.bump(Feature::Pied);
            }
        }
    }
}

/// Complementizer after an immediately preceding comma with a demonstrative
/// correlate before it: `darauf , dass` or `о том , что`
fn complement_correlative(
    token: &Token,
    tree: &SentenceTree,
    detection: &mut Detection,
    is_demonstrative: impl Fn(&Token) -> bool,
    window: usize,
) {
    let Some(comma) = tree
        .iter()
        .filter(|t| is_comma(t) && within(t.id, token.id, 1))
        .last()
        .map(|t| t.id)
    else {
        return;
    };
    let demonstrative = tree
        .iter()
        .filter(|t| is_det_or_pron(t) && is_demonstrative(t) && within(t.id, comma, window))
        .last()
        .map(|t| t.id);
    if let Some(dem) = demonstrative {
        if dem < comma && comma < token.id {
            detection.hit(Feature::Correl, &token.lemma);
            if follows_adposition(token, tree) {
                detection.bump(Feature::Pied);
            }
        }
    }
}

fn is_wo_compound(token: &Token) -> bool {
    token.lemma.contains("wo") && token.feats.is("PronType", "Int,Rel")
}

fn relatives_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    statements_only(tree, |detection| {
        for token in tree {
            if (token.is_upos("PRON") && token.lemma_in(REL_DE)) || is_wo_compound(token) {
                let pied_piped = follows_adposition(token, tree) || is_wo_compound(token);
                comma_relatives(
                    token,
                    tree,
                    detection,
                    |t| t.feats.has_value("PronType", "Dem") && t.lemma_in(DEM_DE),
                    pied_piped,
                );
            } else if (token.is_upos("SCONJ") && token.lemma_in(&["dass", "daß"])) || token.lemma == "was" {
                complement_correlative(
                    token,
                    tree,
                    detection,
                    |t| t.feats.contains("PronType=Dem,Rel"),
                    3,
                );
            }
        }
    })
}

fn relatives_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    statements_only(tree, |detection| {
        for token in tree {
            if (token.is_upos("PRON") && token.lemma_in(REL_RU)) || token.lemma == "какой" {
                let pied_piped = follows_adposition(token, tree);
                comma_relatives(token, tree, detection, |t| t.lemma_in(DEM_RU), pied_piped);
            } else if token.is_upos("SCONJ") && token.lemma == "что" {
                complement_correlative(token, tree, detection, |t| t.lemma_in(DEM_RU), 4);
            }
        }
    })
}

detector!(RelativesEn, "relativ-en", relatives_en);
detector!(RelativesDe, "relativ-de", relatives_de);
detector!(RelativesRu, "relativ-ru", relatives_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Relatives, Box::new(RelativesEn));
    registry.register(Lang::De, Family::Relatives, Box::new(RelativesDe));
    registry.register(Lang::Ru, Family::Relatives, Box::new(RelativesRu));
}
