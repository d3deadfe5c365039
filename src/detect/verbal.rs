//! Verb forms: finites, infinitives, participles and converbs

use super::modality::modal_predicates_ru;
use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::{LangLists, ListCategory};
use crate::navigation::{
    ChildQuery, child_lemmas, child_rels, child_upos, has_aux_child_lemma, head_of, select_child,
};
use crate::tree::{SentenceTree, Token};

const MODALS_DE: &[&str] = &[
    "können", "müssen", "sollen", "wollen", "mögen", "dürfen", "konnen", "mußen",
];

/// Verbs taking a bare infinitive complement in English
const BARE_INF_HEADS_EN: &[&str] = &[
    "help", "make", "bid", "let", "see", "hear", "watch", "dare", "feel", "have",
];

const BARE_INF_HEADS_DE: &[&str] = &[
    "hören", "sehen", "spüren", "lassen", "gehen", "bleiben", "helfen", "lehren",
];

fn is_finite(token: &Token) -> bool {
    token.feats.is("VerbForm", "Fin")
}

fn finites(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_finite(t)) {
        detection.hit(Feature::Finites, &token.lemma);
    }
    detection.into_outcome()
}

/// German finites, corrected for forms the tagger gets wrong
///
/// A finite verb governing `sein`, `werden` or a modal is really an infinitive
/// or participle. A participle with a subject and no auxiliary is a finite.
fn finites_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        let kids = child_lemmas(token, tree);
        if is_finite(token) {
            let analytic = kids.contains(&"sein") || kids.contains(&"werden");
            if !analytic && !kids.iter().any(|k| MODALS_DE.contains(k)) {
                detection.hit(Feature::Finites, &token.lemma);
            }
        }
        if token.feats.is("VerbForm", "Part")
            && !child_upos(token, tree).contains(&"AUX")
            && !kids.iter().any(|k| ["sein", "werden", "haben"].contains(k))
            && child_rels(token, tree).contains(&"nsubj")
        {
            detection.hit(Feature::Finites, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn is_infinitive(token: &Token) -> bool {
    token.feats.is("VerbForm", "Inf")
}

/// to-infinitives outside have-to, going-to and modal phrases, plus bare
/// infinitives after causative and perception verbs
fn infinitives_en(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let modal_adjectives = lists.get(ListCategory::ModalAdjPredicates);
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_infinitive(t)) {
        let head = head_of(token, tree);
        if select_child(token, tree, ChildQuery::LemmaPos { lemma: "to", upos: "PART" }).is_some() {
            let counted = match head {
                None => true,
                // a preceding object keeps causatives: to have the euro replace the dollar
                Some(head) if head.lemma == "have" => {
                    select_child(head, tree, ChildQuery::PosRel { upos: "NOUN", rel: "obj" })
                        .is_some_and(|obj| obj.id < token.id)
                }
                Some(head) => head.lemma != "go" && !modal_adjectives.contains(&head.lemma),
            };
            if counted {
                detection.hit(Feature::Infs, &token.lemma);
            }
        } else if !token.is_upos("AUX")
            && head.is_some_and(|head| head.lemma_in(BARE_INF_HEADS_EN))
        {
            detection.hit(Feature::Infs, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn infinitives_de(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let modal_adjectives = lists.get(ListCategory::ModalAdjPredicates);
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_infinitive(t)) {
        let head = head_of(token, tree);
        if select_child(token, tree, ChildQuery::LemmaPos { lemma: "zu", upos: "PART" }).is_some() {
            if !head.is_some_and(|head| modal_adjectives.contains(&head.lemma)) {
                detection.hit(Feature::Infs, &token.lemma);
            }
        } else if head.is_some_and(|head| head.lemma_in(BARE_INF_HEADS_DE)) {
            detection.hit(Feature::Infs, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// Russian infinitives outside the analytic future, less those governed by
/// modal predicates
fn infinitives_ru(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_infinitive(t)) {
        if !has_aux_child_lemma(token, tree, "быть") {
            detection.hit(Feature::Infs, &token.lemma);
        }
    }
    let modal = modal_predicates_ru(tree, lists).count(Feature::Mpred);
    let infs = detection.count(Feature::Infs);
    detection.counts.retain(|(feature, _)| *feature != Feature::Infs);
    detection.add(Feature::Infs, infs.saturating_sub(modal));
    detection.into_outcome()
}

/// Two or more auxiliaries on the head mark `been`/`being` as part of a
/// perfect or progressive passive
fn in_auxiliary_chain(token: &Token, tree: &SentenceTree, form: &str) -> bool {
    token.form == form
        && head_of(token, tree).is_some_and(|head| {
            child_upos(head, tree).iter().filter(|u| **u == "AUX").count() >= 2
        })
}

fn participles_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| !t.rel.contains("amod")) {
        if token.feats.is("VerbForm", "Part")
            && !in_auxiliary_chain(token, tree, "been")
            && !child_upos(token, tree).contains(&"AUX")
        {
            detection.hit(Feature::Pverbals, &token.lemma);
        }
        if token.feats.is("VerbForm", "Ger") && !in_auxiliary_chain(token, tree, "being") {
            detection.hit(Feature::Pverbals, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// German participles outside analytic forms, plus ADJD present participles
/// in `-d` modifying a verb
fn participles_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if token.feats.is("VerbForm", "Part") && !token.rel.contains("amod") {
            let kids = child_lemmas(token, tree);
            let rels = child_rels(token, tree);
            let analytic = child_upos(token, tree).contains(&"AUX") || kids.contains(&"sein");
            // a subject makes it a mistagged finite
            let finite = rels.contains(&"nsubj") || rels.contains(&"nsubj:pass");
            // perfect or passive whose auxiliary attached to the head
            let perfect = head_of(token, tree).is_some_and(|head| {
                let head_kids = child_lemmas(head, tree);
                head_kids.contains(&"haben") || head_kids.contains(&"werden")
            });
            if !analytic && !finite && !perfect {
                detection.hit(Feature::Pverbals, &token.lemma);
            }
        }
        if token.xpos == "ADJD"
            && token.form.ends_with('d')
            && (token.rel == "advmod" || token.rel == "acl")
            && head_of(token, tree).is_some_and(|head| head.is_upos("VERB"))
        {
            detection.hit(Feature::Pverbals, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// Full participles and converbs (deeprichastiya) without auxiliaries
fn participles_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        let participle = token.feats.is("VerbForm", "Part")
            && !token.feats.is("Variant", "Short")
            && !token.rel.contains("amod");
        let converb = token.feats.is("VerbForm", "Conv");
        if (participle || converb) && !child_upos(token, tree).contains(&"AUX") {
            detection.hit(Feature::Pverbals, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(Finites, "finites", finites);
detector!(FinitesDe, "finites-de", finites_de);
detector!(InfinitivesEn, "infs-en", infinitives_en);
detector!(InfinitivesDe, "infs-de", infinitives_de);
detector!(InfinitivesRu, "infs-ru", infinitives_ru);
detector!(ParticiplesEn, "pverbals-en", participles_en);
detector!(ParticiplesDe, "pverbals-de", participles_de);
detector!(ParticiplesRu, "pverbals-ru", participles_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register_neutral(Family::Finites, Box::new(Finites));
    registry.register(Lang::De, Family::Finites, Box::new(FinitesDe));
    registry.register(Lang::En, Family::Infinitives, Box::new(InfinitivesEn));
    registry.register(Lang::De, Family::Infinitives, Box::new(InfinitivesDe));
    registry.register(Lang::Ru, Family::Infinitives, Box::new(InfinitivesRu));
    registry.register(Lang::En, Family::Participles, Box::new(ParticiplesEn));
    registry.register(Lang::De, Family::Participles, Box::new(ParticiplesDe));
    registry.register(Lang::Ru, Family::Participles, Box::new(ParticiplesRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::rows;

    #[test]
    fn test_finites() {
        let tree = rows(&[
            "1 She she PRON PRP _ 2 nsubj",
            "2 said say VERB VBD VerbForm=Fin 0 root",
            "3 it it PRON PRP _ 4 nsubj",
            "4 rains rain VERB VBZ VerbForm=Fin 2 ccomp",
        ]);
        assert_eq!(finites(&tree, &LangLists::default()).count(Feature::Finites), 2);
    }

    #[test]
    fn test_de_finites_correction() {
        let tree = rows(&[
            "1 Er er PRON _ _ 3 nsubj",
            "2 muss müssen AUX _ VerbForm=Fin 3 aux",
            "3 gehen gehen VERB _ VerbForm=Fin 0 root",
            "4 , , PUNCT _ _ 7 punct",
            "5 wir wir PRON _ _ 7 nsubj",
            "6 das der PRON _ _ 7 obj",
            "7 verlassen verlassen VERB _ VerbForm=Part 3 conj",
        ]);
        let outcome = finites_de(&tree, &LangLists::default());
        // gehen governs a modal and is left out
        assert_eq!(outcome.count(Feature::Finites), 2);
        assert_eq!(outcome.matches(), ["müssen", "verlassen"]);
    }

    #[test]
    fn test_en_infinitives() {
        let tree = rows(&[
            "1 They they PRON PRP _ 2 nsubj",
            "2 want want VERB VBP VerbForm=Fin 0 root",
            "3 to to PART TO _ 4 mark",
            "4 win win VERB VB VerbForm=Inf 2 xcomp",
            "5 and and CCONJ CC _ 6 cc",
            "6 let let VERB VB VerbForm=Inf 2 conj",
            "7 us we PRON PRP _ 6 obj",
            "8 go go VERB VB VerbForm=Inf 6 xcomp",
        ]);
        let outcome = infinitives_en(&tree, &LangLists::default());
        // win (to-inf) and go (bare after let); let has no particle or licensing head
        assert_eq!(outcome.count(Feature::Infs), 2);
        assert_eq!(outcome.matches(), ["win", "go"]);
    }

    #[test]
    fn test_en_infinitives_skip_have_to_and_modal_adjectives() {
        let tree = rows(&[
            "1 We we PRON PRP _ 2 nsubj",
            "2 have have VERB VBP VerbForm=Fin 0 root",
            "3 to to PART TO _ 4 mark",
            "4 leave leave VERB VB VerbForm=Inf 2 xcomp",
            "5 likely likely ADJ JJ _ 2 parataxis",
            "6 to to PART TO _ 7 mark",
            "7 rain rain VERB VB VerbForm=Inf 5 xcomp",
        ]);
        let lists = LangLists::default()
            .with(ListCategory::ModalAdjPredicates, ["likely"].into_iter().collect());
        assert_eq!(infinitives_en(&tree, &lists), Outcome::NoMatch);
    }

    #[test]
    fn test_de_infinitives() {
        let tree = rows(&[
            "1 Es es PRON _ _ 2 nsubj",
            "2 bleibt bleiben VERB _ VerbForm=Fin 0 root",
            "3 zu zu PART _ _ 4 mark",
            "4 erforschen erforschen VERB _ VerbForm=Inf 2 xcomp",
            "5 und und CCONJ _ _ 7 cc",
            "6 wir wir PRON _ _ 7 nsubj",
            "7 gehen gehen VERB _ VerbForm=Fin 2 conj",
            "8 schwimmen schwimmen VERB _ VerbForm=Inf 7 xcomp",
        ]);
        assert_eq!(infinitives_de(&tree, &LangLists::default()).count(Feature::Infs), 2);
    }

    #[test]
    fn test_ru_infinitives_less_modal_predicates() {
        let tree = rows(&[
            "1 Можно можно ADV _ _ 0 root",
            "2 уйти уйти VERB _ VerbForm=Inf 1 csubj",
            "3 и и CCONJ _ _ 6 cc",
            "4 будем быть AUX _ _ 6 aux",
            "5 мы мы PRON _ _ 6 nsubj",
            "6 читать читать VERB _ VerbForm=Inf 2 conj",
            "7 и и CCONJ _ _ 8 cc",
            "8 петь петь VERB _ VerbForm=Inf 2 conj",
        ]);
        // уйти and петь, less one modal predicate
        assert_eq!(infinitives_ru(&tree, &LangLists::default()).count(Feature::Infs), 1);
    }

    #[test]
    fn test_en_participles() {
        let tree = rows(&[
            "1 Goods goods NOUN NNS _ 5 nsubj",
            "2 made make VERB VBN VerbForm=Part 1 acl",
            "3 here here ADV RB _ 2 advmod",
            "4 have have AUX VBP _ 5 aux",
            "5 been be AUX VBN VerbForm=Part 0 root",
            "6 sold sell VERB VBN VerbForm=Part 5 xcomp",
            "7 after after ADP IN _ 8 mark",
            "8 translating translate VERB VBG VerbForm=Ger 6 advcl",
        ]);
        let outcome = participles_en(&tree, &LangLists::default());
        // been has an AUX child
        assert_eq!(outcome.matches(), ["make", "sell", "translate"]);
    }

    #[test]
    fn test_de_participles() {
        let tree = rows(&[
            "1 Der der DET ART _ 2 det",
            "2 Hund Hund NOUN NN _ 3 nsubj",
            "3 stand stehen VERB VVFIN VerbForm=Fin 0 root",
            "4 bellend bellend ADJ ADJD _ 3 advmod",
            "5 , , PUNCT $, _ 8 punct",
            "6 sie sie PRON PPER _ 8 nsubj",
            "7 hat haben AUX VAFIN _ 8 aux",
            "8 gesehen sehen VERB VVPP VerbForm=Part 3 conj",
            "9 , , PUNCT $, _ 10 punct",
            "10 vergessen vergessen VERB VVPP VerbForm=Part 3 conj",
        ]);
        let outcome = participles_de(&tree, &LangLists::default());
        // gesehen is part of a perfect
        assert_eq!(outcome.matches(), ["bellend", "vergessen"]);
    }

    #[test]
    fn test_ru_participles_and_converbs() {
        let tree = rows(&[
            "1 Читая читать VERB _ VerbForm=Conv 4 advcl",
            "2 , , PUNCT _ _ 1 punct",
            "3 он он PRON _ _ 4 nsubj",
            "4 нашёл найти VERB _ VerbForm=Fin 0 root",
            "5 забытую забыть VERB _ VerbForm=Part 6 amod",
            "6 книгу книга NOUN _ _ 4 obj",
            "7 написанную написать VERB _ VerbForm=Part 6 acl",
            "8 закрыта закрыть VERB _ VerbForm=Part|Variant=Short 4 parataxis",
        ]);
        let outcome = participles_ru(&tree, &LangLists::default());
        assert_eq!(outcome.matches(), ["читать", "написать"]);
    }
}
