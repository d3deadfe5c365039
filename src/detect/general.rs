//! Language-neutral sentence detectors
//!
//! Tag and relation counts that need no lexical knowledge, plus the copula
//! and content-word measures, whose small lemma sets cover every language.

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::{Basis, Feature};
use crate::lang::Lang;
use crate::lists::LangLists;
use super::modality::is_modal_predicate_ru;
use crate::navigation::previous_token;
use crate::tree::{SentenceTree, Token};
use rustc_hash::FxHashSet;

/// Relations that introduce a dependent clause
pub const CLAUSE_RELATIONS: [&str; 6] = ["csubj", "acl:relcl", "advcl", "acl", "xcomp", "parataxis"];

const COPULA_LEMMAS: [&str; 6] = ["be", "sein", "быть", "это", "ser", "estar"];

const CORE_ARGS: [&str; 3] = ["nsubj", "obj", "iobj"];

const CONTENT_UPOS: [&str; 4] = ["ADJ", "ADV", "VERB", "NOUN"];

fn nouns(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("NOUN")) {
        detection.hit(Feature::Nn, &token.lemma);
    }
    detection.into_outcome()
}

fn proper_nouns(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("PROPN")) {
        detection.hit(Feature::Propn, &token.lemma);
    }
    detection.into_outcome()
}

fn interrogatives(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let Some((before, last)) = tree.last_two() else {
        return Outcome::Malformed("interrogative check needs two tokens".into());
    };
    let mut detection = Detection::new();
    if before.lemma == "?" || last.lemma == "?" {
        detection.bump(Feature::Interrog);
        detection.matches.push(last.lemma.clone());
        detection.matches.push(before.lemma.clone());
    }
    detection.into_outcome()
}

fn attributives(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if (token.is_upos("ADJ") || token.feats.is("VerbForm", "Part")) && token.rel.contains("amod") {
            detection.hit(Feature::Attrib, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn past_tense(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.feats.is("Tense", "Past")) {
        detection.hit(Feature::Pasttense, &token.lemma);
    }
    detection.into_outcome()
}

fn clauses(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    let clauses = tree
        .iter()
        .filter(|t| CLAUSE_RELATIONS.contains(&t.rel.as_str()))
        .count() as u64;
    detection.add(Feature::Numcls, clauses);
    if clauses == 0 {
        detection.bump(Feature::Simple);
    }
    detection.into_outcome()
}

fn noun_args(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| CORE_ARGS.contains(&t.rel.as_str())) {
        detection.add_basis(Basis::CoreArgs, 1);
        if token.is_upos("NOUN") || token.is_upos("PROPN") {
            detection.hit(Feature::Nnargs, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn copulas(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if token.rel != "cop" || !token.lemma_in(&COPULA_LEMMAS) {
            continue;
        }
        let mut existential = false;
        let mut cursor = previous_token(token, tree);
        for _ in 0..3 {
            match cursor {
                Some(prev) => {
                    existential |= prev.lemma == "there";
                    cursor = previous_token(prev, tree);
                }
                None => break,
            }
        }
        if !existential {
            detection.hit(Feature::Copula, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// Content-word types and tokens, skipping tokens rejected by `exclude`
fn content_words(tree: &SentenceTree, exclude: impl Fn(&Token) -> bool) -> Outcome {
    let mut types = FxHashSet::default();
    let mut tokens = 0;
    for token in tree {
        if !CONTENT_UPOS.contains(&token.upos.as_str()) || exclude(token) {
            continue;
        }
        types.insert((token.lemma.as_str(), token.upos.as_str()));
        tokens += 1;
    }
    let mut detection = Detection::new();
    detection.add(Feature::Lexdens, types.len() as u64);
    detection.add(Feature::LexTtr, types.len() as u64);
    detection.add_basis(Basis::ContentTokens, tokens);
    detection.into_outcome()
}

fn content(tree: &SentenceTree, _: &LangLists) -> Outcome {
    content_words(tree, |_| false)
}

/// Russian modal predicates stand in for the English and German modal auxiliaries
fn content_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    content_words(tree, |token| is_modal_predicate_ru(token, tree))
}

detector!(Nouns, "nouns", nouns);
detector!(ProperNouns, "proper-nouns", proper_nouns);
detector!(Interrogatives, "interrogatives", interrogatives);
detector!(Attributives, "attributives", attributives);
detector!(PastTense, "past-tense", past_tense);
detector!(Clauses, "clauses", clauses);
detector!(NounArgs, "noun-args", noun_args);
detector!(Copulas, "copulas", copulas);
detector!(Content, "content", content);
detector!(ContentRu, "content-ru", content_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register_neutral(Family::Nouns, Box::new(Nouns));
    registry.register_neutral(Family::ProperNouns, Box::new(ProperNouns));
    registry.register_neutral(Family::Interrogatives, Box::new(Interrogatives));
    registry.register_neutral(Family::Attributives, Box::new(Attributives));
    registry.register_neutral(Family::PastTense, Box::new(PastTense));
    registry.register_neutral(Family::Clauses, Box::new(Clauses));
    registry.register_neutral(Family::NounArgs, Box::new(NounArgs));
    registry.register_neutral(Family::Copulas, Box::new(Copulas));
    registry.register_neutral(Family::Content, Box::new(Content));
    registry.register(Lang::Ru, Family::Content, Box::new(ContentRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::rows;

    fn lists() -> LangLists {
        LangLists::default()
    }

    #[test]
    fn test_past_tense_and_nouns() {
        let tree = rows(&[
            "1 The the DET DT Definite=Def|PronType=Art 2 det",
            "2 cat cat NOUN NN Number=Sing 3 nsubj",
            "3 sat sit VERB VBD Mood=Ind|Tense=Past|VerbForm=Fin 0 root",
            "4 . . PUNCT . _ 3 punct",
        ]);
        assert_eq!(past_tense(&tree, &lists()).count(Feature::Pasttense), 1);
        let outcome = nouns(&tree, &lists());
        assert_eq!(outcome.count(Feature::Nn), 1);
        assert_eq!(outcome.matches(), ["cat"]);
    }

    #[test]
    fn test_proper_nouns_count_propn() {
        let tree = rows(&[
            "1 Anna Anna PROPN _ _ 2 nsubj",
            "2 left leave VERB _ _ 0 root",
            "3 because because SCONJ _ _ 2 mark",
        ]);
        assert_eq!(proper_nouns(&tree, &lists()).count(Feature::Propn), 1);
    }

    #[test]
    fn test_interrogatives() {
        let question = rows(&[
            "1 Why why ADV _ _ 2 advmod",
            "2 now now ADV _ _ 0 root",
            "3 ? ? PUNCT _ _ 2 punct",
        ]);
        assert_eq!(interrogatives(&question, &lists()).count(Feature::Interrog), 1);

        // question mark followed by a closing quote still counts
        let quoted = rows(&[
            "1 Who who PRON _ _ 0 root",
            "2 ? ? PUNCT _ _ 1 punct",
            "3 \" \" PUNCT _ _ 1 punct",
        ]);
        assert_eq!(interrogatives(&quoted, &lists()).count(Feature::Interrog), 1);

        let single = rows(&["1 Yes yes INTJ _ _ 0 root"]);
        assert!(matches!(interrogatives(&single, &lists()), Outcome::Malformed(_)));
    }

    #[test]
    fn test_attributives() {
        let tree = rows(&[
            "1 a a DET _ _ 3 det",
            "2 broken break VERB _ Tense=Past|VerbForm=Part 3 amod",
            "3 old old ADJ _ _ 4 amod",
            "4 chair chair NOUN _ _ 0 root",
        ]);
        assert_eq!(attributives(&tree, &lists()).count(Feature::Attrib), 2);
    }

    #[test]
    fn test_clauses_and_simple() {
        let complex = rows(&[
            "1 I I PRON _ _ 2 nsubj",
            "2 left leave VERB _ _ 0 root",
            "3 when when ADV _ _ 4 advmod",
            "4 tired tired ADJ _ _ 2 advcl",
            "5 , , PUNCT _ _ 6 punct",
            "6 said say VERB _ _ 2 parataxis",
        ]);
        let outcome = clauses(&complex, &lists());
        assert_eq!(outcome.count(Feature::Numcls), 2);
        assert_eq!(outcome.count(Feature::Simple), 0);
        assert!(outcome.count(Feature::Numcls) <= complex.len() as u64);

        let simple = rows(&["1 Dogs dog NOUN _ _ 2 nsubj", "2 bark bark VERB _ _ 0 root"]);
        let outcome = clauses(&simple, &lists());
        assert_eq!(outcome.count(Feature::Simple), 1);
        assert_eq!(outcome.count(Feature::Numcls), 0);
    }

    #[test]
    fn test_noun_args() {
        let tree = rows(&[
            "1 She she PRON _ _ 2 nsubj",
            "2 gave give VERB _ _ 0 root",
            "3 Tom Tom PROPN _ _ 2 iobj",
            "4 books book NOUN _ _ 2 obj",
        ]);
        match noun_args(&tree, &lists()) {
            Outcome::Match(detection) => {
                assert_eq!(detection.count(Feature::Nnargs), 2);
                assert_eq!(detection.basis_count(Basis::CoreArgs), 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_copula_after_existential_there() {
        let plain = rows(&[
            "1 It it PRON _ _ 3 nsubj",
            "2 is be AUX _ _ 3 cop",
            "3 late late ADJ _ _ 0 root",
        ]);
        assert_eq!(copulas(&plain, &lists()).count(Feature::Copula), 1);

        let existential = rows(&[
            "1 there there PRON _ _ 4 expl",
            "2 really really ADV _ _ 4 advmod",
            "3 is be AUX _ _ 4 cop",
            "4 hope hope NOUN _ _ 0 root",
        ]);
        assert_eq!(copulas(&existential, &lists()).count(Feature::Copula), 0);

        // copula at sentence start looks back at nothing
        let initial = rows(&["1 Sein sein AUX _ _ 2 cop", "2 gut gut ADJ _ _ 0 root"]);
        assert_eq!(copulas(&initial, &lists()).count(Feature::Copula), 1);
    }

    #[test]
    fn test_content_types_and_tokens() {
        let tree = rows(&[
            "1 big big ADJ _ _ 2 amod",
            "2 dogs dog NOUN _ _ 3 nsubj",
            "3 chase chase VERB _ _ 0 root",
            "4 big big ADJ _ _ 5 amod",
            "5 dog dog NOUN _ _ 3 obj",
        ]);
        match content(&tree, &lists()) {
            Outcome::Match(detection) => {
                assert_eq!(detection.count(Feature::LexTtr), 3);
                assert_eq!(detection.basis_count(Basis::ContentTokens), 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_russian_content_skips_modal_predicates() {
        let tree = rows(&[
            "1 Можно можно ADV _ Degree=Pos 0 root",
            "2 идти идти VERB _ VerbForm=Inf 1 csubj",
            "3 домой домой ADV _ Degree=Pos 2 advmod",
        ]);
        match content_ru(&tree, &lists()) {
            Outcome::Match(detection) => {
                assert_eq!(detection.basis_count(Basis::ContentTokens), 2);
                assert_eq!(detection.count(Feature::Lexdens), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
