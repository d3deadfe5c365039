//! Conjunctions and connectives

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::navigation::next_token;
use crate::tree::SentenceTree;

const CCONJ_EN: &[&str] = &[
    "and", "but", "or", "both", "yet", "either", "&", "nor", "plus", "neither", "ether",
];

const CCONJ_DE: &[&str] = &[
    "und", "oder", "aber", "sondern", "sowie", "als", "wie", "doch", "sowohl", "denn", "desto",
    "noch", "weder", "entweder", "bzw", "beziehungsweise", "weshalb", "und/oder", "ob", "woher",
    "wenn", "jedoch", "wofür", "insbesondere", "obwohl", "um",
];

const CCONJ_RU: &[&str] = &[
    "и", "а", "но", "или", "ни", "да", "причем", "либо", "зато", "иначе", "только", "ан", "и/или",
    "иль",
];

const CCONJ_ES: &[&str] = &[
    "y", "e", "ni", "o", "u", "pero", "sino", "más", "tanto", "como", "cuanto", "así", "sea", "ya",
    "bien",
];

const SCONJ_EN: &[&str] = &[
    "that", "how", "if", "after", "before", "when", "as", "while", "because", "for", "whether",
    "although", "though", "since", "once", "so", "until", "despite", "unless", "whereas", "whilst",
];

const SCONJ_DE: &[&str] = &[
    "daß", "wenn", "dass", "weil", "da", "ob", "wie", "als", "indem", "während", "obwohl", "wobei",
    "damit", "bevor", "nachdem", "sodass", "denn", "falls", "bis", "sobald", "solange", "weshalb",
    "ditzen", "sofern", "warum", "obgleich", "zumal", "sodaß", "aber", "wenngleich", "wennen",
    "wodurch", "wohingegen", "ehe", "worauf", "seit", "inwiefern", "anstatt", "der", "vordem",
    "insofern", "nahezu", "wohl", "manchmal", "weilen", "weiterhin", "doch", "mit", "gleichfalls",
];

const SCONJ_RU: &[&str] = &[
    "что", "как", "если", "чтобы", "то", "когда", "чем", "хотя", "поскольку", "пока", "тем", "ведь",
    "нежели", "ибо", "пусть", "будто", "словно", "дабы", "раз", "насколько", "тот", "коли", "коль",
    "хоть", "разве", "сколь", "ежели", "покуда", "постольку",
];

const SCONJ_ES: &[&str] = &[
    "así", "aun", "aunque", "como", "conque", "cuando", "donde", "luego", "por", "porque", "pues",
    "que", "salvo", "si",
];

const WH_EN: &[&str] = &["when", "where", "why"];

const WH_DE: &[&str] = &["wann", "wo", "warum"];

const WH_RU: &[&str] = &["когда", "где", "куда", "откуда", "отчего", "почему", "зачем"];

/// Tokens with tag `upos` and a lemma from `lemmas`
fn tagged(tree: &SentenceTree, upos: &str, lemmas: &[&str], feature: Feature) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos(upos) && t.lemma_in(lemmas)) {
        detection.hit(feature, &token.lemma);
    }
    detection.into_outcome()
}

fn cconj_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "CCONJ", CCONJ_EN, Feature::Cconj)
}

fn cconj_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "CCONJ", CCONJ_DE, Feature::Cconj)
}

fn cconj_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "CCONJ", CCONJ_RU, Feature::Cconj)
}

fn cconj_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "CCONJ", CCONJ_ES, Feature::Cconj)
}

fn sconj_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "SCONJ", SCONJ_EN, Feature::Sconj)
}

fn sconj_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "SCONJ", SCONJ_DE, Feature::Sconj)
}

fn sconj_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "SCONJ", SCONJ_RU, Feature::Sconj)
}

fn sconj_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    tagged(tree, "SCONJ", SCONJ_ES, Feature::Sconj)
}

/// Wh-adverbs introducing adverbial clauses; questions are left out
fn wh_conjunctions(tree: &SentenceTree, lemmas: &[&str]) -> Outcome {
    match tree.is_interrogative() {
        None => Outcome::Malformed("wh-conjunction check needs two tokens".into()),
        Some(true) => Outcome::NoMatch,
        Some(false) => {
            let mut detection = Detection::new();
            for token in tree.iter().filter(|t| t.lemma_in(lemmas)) {
                detection.hit(Feature::Whconj, &token.lemma);
            }
            detection.into_outcome()
        }
    }
}

fn whconj_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    wh_conjunctions(tree, WH_EN)
}

fn whconj_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    wh_conjunctions(tree, WH_DE)
}

fn whconj_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    wh_conjunctions(tree, WH_RU)
}

/// Contrastive `but` unless the next token turns it additive (`but also`)
fn contrastive(tree: &SentenceTree, lemma: &str, additive: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.lemma == lemma) {
        if next_token(token, tree).is_some_and(|next| !next.lemma_in(additive)) {
            detection.hit(Feature::But, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn but_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    contrastive(tree, "but", &["also"])
}

fn but_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    contrastive(tree, "aber", &["auch"])
}

fn but_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    contrastive(tree, "но", &["и", "также"])
}

detector!(CoordinatorsEn, "cconj-en", cconj_en);
detector!(CoordinatorsDe, "cconj-de", cconj_de);
detector!(CoordinatorsRu, "cconj-ru", cconj_ru);
detector!(CoordinatorsEs, "cconj-es", cconj_es);
detector!(SubordinatorsEn, "sconj-en", sconj_en);
detector!(SubordinatorsDe, "sconj-de", sconj_de);
detector!(SubordinatorsRu, "sconj-ru", sconj_ru);
detector!(SubordinatorsEs, "sconj-es", sconj_es);
detector!(WhConjunctionsEn, "whconj-en", whconj_en);
detector!(WhConjunctionsDe, "whconj-de", whconj_de);
detector!(WhConjunctionsRu, "whconj-ru", whconj_ru);
detector!(ContrastiveEn, "but-en", but_en);
detector!(ContrastiveDe, "but-de", but_de);
detector!(ContrastiveRu, "but-ru", but_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Coordinators, Box::new(CoordinatorsEn));
    registry.register(Lang::De, Family::Coordinators, Box::new(CoordinatorsDe));
    registry.register(Lang::Ru, Family::Coordinators, Box::new(CoordinatorsRu));
    registry.register(Lang::Es, Family::Coordinators, Box::new(CoordinatorsEs));
    registry.register(Lang::En, Family::Subordinators, Box::new(SubordinatorsEn));
    registry.register(Lang::De, Family::Subordinators, Box::new(SubordinatorsDe));
    registry.register(Lang::Ru, Family::Subordinators, Box::new(SubordinatorsRu));
    registry.register(Lang::Es, Family::Subordinators, Box::new(SubordinatorsEs));
    registry.register(Lang::En, Family::WhConjunctions, Box::new(WhConjunctionsEn));
    registry.register(Lang::De, Family::WhConjunctions, Box::new(WhConjunctionsDe));
    registry.register(Lang::Ru, Family::WhConjunctions, Box::new(WhConjunctionsRu));
    registry.register(Lang::En, Family::Contrastive, Box::new(ContrastiveEn));
    registry.register(Lang::De, Family::Contrastive, Box::new(ContrastiveDe));
    registry.register(Lang::Ru, Family::Contrastive, Box::new(ContrastiveRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::rows;

    fn lists() -> LangLists {
        LangLists::default()
    }

    #[test]
    fn test_coordinators_need_tag() {
        let tree = rows(&[
            "1 Tea tea NOUN _ _ 0 root",
            "2 and and CCONJ _ _ 3 cc",
            "3 both both DET _ _ 1 conj",
            "4 biscuits biscuit NOUN _ _ 1 conj",
        ]);
        let outcome = cconj_en(&tree, &lists());
        assert_eq!(outcome.count(Feature::Cconj), 1);
        assert_eq!(outcome.matches(), ["and"]);
    }

    #[test]
    fn test_subordinators() {
        let tree = rows(&[
            "1 Ich ich PRON _ _ 2 nsubj",
            "2 weiß wissen VERB _ _ 0 root",
            "3 , , PUNCT _ _ 6 punct",
            "4 dass dass SCONJ _ _ 6 mark",
            "5 es es PRON _ _ 6 nsubj",
            "6 regnet regnen VERB _ _ 2 ccomp",
        ]);
        assert_eq!(sconj_de(&tree, &lists()).count(Feature::Sconj), 1);
        assert_eq!(sconj_en(&tree, &lists()).count(Feature::Sconj), 0);
    }

    #[test]
    fn test_wh_conjunctions_skip_questions() {
        let statement = rows(&[
            "1 I I PRON _ _ 2 nsubj",
            "2 know know VERB _ _ 0 root",
            "3 where where ADV _ _ 5 advmod",
            "4 it it PRON _ _ 5 nsubj",
            "5 is be VERB _ _ 2 ccomp",
            "6 . . PUNCT _ _ 2 punct",
        ]);
        assert_eq!(whconj_en(&statement, &lists()).count(Feature::Whconj), 1);

        let question = rows(&[
            "1 Where where ADV _ _ 0 root",
            "2 where where ADV _ _ 1 advmod",
            "3 ? ? PUNCT _ _ 1 punct",
        ]);
        assert_eq!(whconj_en(&question, &lists()), Outcome::NoMatch);

        let single = rows(&["1 wo wo ADV _ _ 0 root"]);
        assert!(matches!(whconj_de(&single, &lists()), Outcome::Malformed(_)));
    }

    #[test]
    fn test_contrastive_but() {
        let tree = rows(&[
            "1 not not PART _ _ 3 advmod",
            "2 only only ADV _ _ 3 advmod",
            "3 cheap cheap ADJ _ _ 0 root",
            "4 but but CCONJ _ _ 6 cc",
            "5 also also ADV _ _ 6 advmod",
            "6 good good ADJ _ _ 3 conj",
            "7 , , PUNCT _ _ 9 punct",
            "8 but but CCONJ _ _ 9 cc",
            "9 late late ADJ _ _ 3 conj",
        ]);
        assert_eq!(but_en(&tree, &lists()).count(Feature::But), 1);
    }

    #[test]
    fn test_contrastive_at_sentence_end_is_ignored() {
        let tree = rows(&[
            "1 Это это PRON _ _ 2 nsubj",
            "2 могло мочь VERB _ _ 0 root",
            "3 , , PUNCT _ _ 4 punct",
            "4 но но CCONJ _ _ 2 cc",
        ]);
        assert_eq!(but_ru(&tree, &lists()), Outcome::NoMatch);
    }
}
