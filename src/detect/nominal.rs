//! Deverbal nouns: derivational suffixes and verb-to-noun conversion

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::{LangLists, ListCategory};
use crate::navigation::child_upos;
use crate::tree::{SentenceTree, Token};

const SUFFIXES_EN: &[&str] = &["ment", "tion"];
const SUFFIXES_DE: &[&str] = &["ung", "tion"];
const SUFFIXES_RU: &[&str] = &["тие", "ение", "ание", "ство", "ция", "ота"];

/// A noun whose lowercased form carries one of `suffixes` and whose lemma is
/// not stoplisted
fn is_suffixed(token: &Token, suffixes: &[&str], lists: &LangLists) -> bool {
    let stoplist = lists.get(ListCategory::DeverbalsStop);
    if !token.upos.contains("NOUN") || stoplist.contains(&token.lemma) {
        return false;
    }
    let form = token.form.to_lowercase();
    suffixes.iter().any(|suffix| form.ends_with(suffix))
}

fn is_convert(token: &Token, lists: &LangLists) -> bool {
    token.upos.contains("NOUN") && lists.get(ListCategory::Converts).contains(&token.lemma)
}

fn nominals_en(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if is_suffixed(token, SUFFIXES_EN, lists) {
            detection.hit(Feature::Deverbals, &token.lemma);
        }
        if is_convert(token, lists) && !token.form.ends_with("ing") {
            // a bare singular is too often the verb mistagged
            let kids = child_upos(token, tree);
            let modified = kids.contains(&"DET") || kids.contains(&"ADJ");
            if modified || !token.feats.is("Number", "Sing") {
                detection.hit(Feature::Converts, &token.lemma);
            }
        }
    }
    detection.into_outcome()
}

fn nominals_de(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if is_suffixed(token, SUFFIXES_DE, lists) {
            detection.hit(Feature::Deverbals, &token.lemma);
        }
        if is_convert(token, lists) {
            detection.hit(Feature::Converts, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn nominals_ru(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if is_suffixed(token, SUFFIXES_RU, lists) && !token.feats.is("Number", "Plur") {
            detection.hit(Feature::Deverbals, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(NominalsEn, "nominals-en", nominals_en);
detector!(NominalsDe, "nominals-de", nominals_de);
detector!(NominalsRu, "nominals-ru", nominals_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Nominals, Box::new(NominalsEn));
    registry.register(Lang::De, Family::Nominals, Box::new(NominalsDe));
    registry.register(Lang::Ru, Family::Nominals, Box::new(NominalsRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::rows;

    #[test]
    fn test_suffixes_and_stoplist() {
        let tree = rows(&[
            "1 The the DET DT _ 2 det",
            "2 Government government NOUN NN Number=Sing 4 nsubj",
            "3 nation nation NOUN NN Number=Sing 2 nmod",
            "4 approved approve VERB VBD _ 0 root",
            "5 the the DET DT _ 6 det",
            "6 settlement settlement NOUN NN Number=Sing 4 obj",
        ]);
        let lists = LangLists::default()
            .with(ListCategory::DeverbalsStop, ["nation"].into_iter().collect());
        let outcome = nominals_en(&tree, &lists);
        assert_eq!(outcome.matches(), ["government", "settlement"]);
    }

    #[test]
    fn test_en_converts_need_modifier_or_plural() {
        let tree = rows(&[
            "1 a a DET DT _ 2 det",
            "2 walk walk NOUN NN Number=Sing 5 obl",
            "3 talks talk NOUN NNS Number=Plur 5 nsubj",
            "4 change change NOUN NN Number=Sing 5 obj",
            "5 building building NOUN NN Number=Sing 0 root",
        ]);
        let converts = ["walk", "talk", "change", "building"].into_iter().collect();
        let lists = LangLists::default().with(ListCategory::Converts, converts);
        let outcome = nominals_en(&tree, &lists);
        assert_eq!(outcome.count(Feature::Converts), 2);
        assert_eq!(outcome.matches(), ["walk", "talk"]);
    }

    #[test]
    fn test_de_nominals() {
        let tree = rows(&[
            "1 Die der DET ART _ 2 det",
            "2 Lösung Lösung NOUN NN _ 4 nsubj",
            "3 Lauf Lauf NOUN NN _ 2 nmod",
            "4 fehlt fehlen VERB VVFIN _ 0 root",
        ]);
        let lists =
            LangLists::default().with(ListCategory::Converts, ["Lauf"].into_iter().collect());
        let outcome = nominals_de(&tree, &lists);
        assert_eq!(outcome.count(Feature::Deverbals), 1);
        assert_eq!(outcome.count(Feature::Converts), 1);
    }

    #[test]
    fn test_ru_plurals_left_out() {
        let tree = rows(&[
            "1 Решение решение NOUN _ Number=Sing 0 root",
            "2 решения решение NOUN _ Number=Plur 1 nmod",
        ]);
        let outcome = nominals_ru(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Deverbals), 1);
    }
}
