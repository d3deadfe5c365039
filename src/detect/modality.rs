//! Modal predicates and adverbial quantifiers

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::{LangLists, ListCategory};
use crate::navigation::{ChildQuery, child_feats, child_lemmas, child_upos, head_of, select_child};
use crate::tree::{SentenceTree, Token};

const MODALS_DE: &[&str] = &["dürfen", "können", "mögen", "müssen", "sollen", "wollen"];

/// Degree words counted by surface form, whatever their tag
const QUANTIF_FORMS_RU: &[&str] = &[
    "еле", "очень", "вшестеро", "невыразимо", "излишне", "еле-еле", "чуть-чуть", "едва-едва",
    "только", "капельку", "чуточку", "едва",
];

/// Semantic "have to": `have` with a nearby infinitive and no intervening object
fn is_have_to(token: &Token, tree: &SentenceTree) -> bool {
    if token.lemma != "have" || token.is_upos("AUX") {
        return false;
    }
    let Some(inf) = select_child(token, tree, ChildQuery::PosFeat { upos: "VERB", feat: "VerbForm=Inf" }) else {
        return false;
    };
    if token.id.abs_diff(inf.id) >= 4 {
        return false;
    }
    // have time to practise, have a colleague throw
    let object = select_child(token, tree, ChildQuery::PosRel { upos: "NOUN", rel: "obj" });
    !object.is_some_and(|obj| obj.id < inf.id)
}

fn modality_en(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let adjectives = lists.get(ListCategory::ModalAdjPredicates);
    let mut detection = Detection::new();
    for token in tree {
        if token.xpos == "MD" && token.lemma != "will" && token.lemma != "shall" {
            detection.hit(Feature::Mpred, &token.lemma);
        }
        if adjectives.contains(&token.lemma) && child_upos(token, tree).contains(&"AUX") {
            detection.hit(Feature::Mpred, &token.lemma);
        }
        if is_have_to(token, tree) {
            detection.hit(Feature::Mpred, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn modality_de(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let adjectives = lists.get(ListCategory::ModalAdjPredicates);
    let mut detection = Detection::new();
    for token in tree {
        // VM-tagged verbs count even when mislemmatised, modal lemmas even when mistagged
        if token.xpos.contains("VM") || token.lemma_in(MODALS_DE) {
            detection.hit(Feature::Mpred, &token.lemma);
        } else if adjectives.contains(&token.lemma) {
            let kids = child_lemmas(token, tree);
            if kids.contains(&"sein") || kids.contains(&"werden") {
                detection.hit(Feature::Mpred, &token.lemma);
            }
        }
    }
    detection.into_outcome()
}

/// Lexical Russian modals: `мочь`, `можно`, `нельзя`, `надо`, `следовать` + infinitive
pub(crate) fn is_modal_predicate_ru(token: &Token, tree: &SentenceTree) -> bool {
    match token.lemma.as_str() {
        "мочь" | "можно" | "нельзя" | "надо" => true,
        "следовать" => {
            child_upos(token, tree).contains(&"VERB")
                && child_feats(token, tree).contains(&"VerbForm=Inf")
        }
        _ => false,
    }
}

/// Russian modal predicates; also subtracted from the infinitive count
pub(crate) fn modal_predicates_ru(tree: &SentenceTree, lists: &LangLists) -> Detection {
    let adjectives = lists.get(ListCategory::ModalAdjPredicates);
    let mut detection = Detection::new();
    for token in tree {
        if is_modal_predicate_ru(token, tree) {
            detection.hit(Feature::Mpred, &token.lemma);
        }
        if adjectives.contains(&token.lemma) && token.feats.is("Variant", "Short") {
            detection.hit(Feature::Mpred, &token.lemma);
        }
    }
    detection
}

fn modality_ru(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    modal_predicates_ru(tree, lists).into_outcome()
}

fn quantifiers_en(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let quantifiers = lists.get(ListCategory::AdvQuantifiers);
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("ADV") && quantifiers.contains(&t.lemma)) {
        detection.hit(Feature::Mquantif, &token.lemma);
    }
    detection.into_outcome()
}

/// German degree adverbs modifying nouns are quantifying determiners
fn quantifiers_de(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let quantifiers = lists.get(ListCategory::AdvQuantifiers);
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("ADV") && quantifiers.contains(&t.lemma)) {
        match head_of(token, tree) {
            Some(head) if !head.is_upos("NOUN") => detection.hit(Feature::Mquantif, &token.lemma),
            _ => {}
        }
    }
    detection.into_outcome()
}

fn quantifiers_ru(tree: &SentenceTree, lists: &LangLists) -> Outcome {
    let quantifiers = lists.get(ListCategory::AdvQuantifiers);
    let mut detection = Detection::new();
    for token in tree {
        if token.is_upos("ADV") && quantifiers.contains(&token.lemma) {
            detection.hit(Feature::Mquantif, &token.lemma);
        }
        if token.form_in(QUANTIF_FORMS_RU) {
            detection.hit(Feature::Mquantif, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(ModalityEn, "mpred-en", modality_en);
detector!(ModalityDe, "mpred-de", modality_de);
detector!(ModalityRu, "mpred-ru", modality_ru);
detector!(QuantifiersEn, "mquantif-en", quantifiers_en);
detector!(QuantifiersDe, "mquantif-de", quantifiers_de);
detector!(QuantifiersRu, "mquantif-ru", quantifiers_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Modality, Box::new(ModalityEn));
    registry.register(Lang::De, Family::Modality, Box::new(ModalityDe));
    registry.register(Lang::Ru, Family::Modality, Box::new(ModalityRu));
    registry.register(Lang::En, Family::AdvQuantifiers, Box::new(QuantifiersEn));
    registry.register(Lang::De, Family::AdvQuantifiers, Box::new(QuantifiersDe));
    registry.register(Lang::Ru, Family::AdvQuantifiers, Box::new(QuantifiersRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::rows;

    fn lists(category: ListCategory, words: &[&str]) -> LangLists {
        LangLists::default().with(category, words.iter().copied().collect())
    }

    #[test]
    fn test_en_modal_auxiliaries() {
        let tree = rows(&[
            "1 You you PRON PRP _ 2 nsubj",
            "2 may may AUX MD VerbForm=Fin 4 aux",
            "3 soon soon ADV RB _ 4 advmod",
            "4 go go VERB VB VerbForm=Inf 0 root",
            "5 and and CCONJ CC _ 7 cc",
            "6 will will AUX MD VerbForm=Fin 7 aux",
            "7 stay stay VERB VB VerbForm=Inf 4 conj",
        ]);
        let outcome = modality_en(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Mpred), 1);
        assert_eq!(outcome.matches(), ["may"]);
    }

    #[test]
    fn test_en_modal_adjective_and_have_to() {
        let tree = rows(&[
            "1 It it PRON PRP _ 3 nsubj",
            "2 is be AUX VBZ _ 3 cop",
            "3 necessary necessary ADJ JJ _ 0 root",
            "4 we we PRON PRP _ 5 nsubj",
            "5 have have VERB VBP _ 3 ccomp",
            "6 to to PART TO _ 7 mark",
            "7 leave leave VERB VB VerbForm=Inf 5 xcomp",
        ]);
        let lists = lists(ListCategory::ModalAdjPredicates, &["necessary"]);
        assert_eq!(modality_en(&tree, &lists).count(Feature::Mpred), 2);
    }

    #[test]
    fn test_en_have_with_object_is_not_modal() {
        // you have time to practise
        let tree = rows(&[
            "1 you you PRON PRP _ 2 nsubj",
            "2 have have VERB VBP _ 0 root",
            "3 time time NOUN NN _ 2 obj",
            "4 to to PART TO _ 5 mark",
            "5 practise practise VERB VB VerbForm=Inf 2 advcl",
        ]);
        assert_eq!(modality_en(&tree, &LangLists::default()), Outcome::NoMatch);
    }

    #[test]
    fn test_de_modal_branches() {
        let tree = rows(&[
            "1 Wir wir PRON PPER _ 2 nsubj",
            "2 müssen müssen AUX VMFIN VerbForm=Fin 4 aux",
            "3 das der PRON PDS _ 4 obj",
            "4 können können VERB VVINF VerbForm=Inf 0 root",
            "5 möglich möglich ADJ ADJD _ 4 advmod",
            "6 sein sein AUX VAINF _ 5 cop",
        ]);
        let lists = lists(ListCategory::ModalAdjPredicates, &["möglich"]);
        // VM-tagged, mistagged modal lemma, modal adjective with sein
        assert_eq!(modality_de(&tree, &lists).count(Feature::Mpred), 3);
    }

    #[test]
    fn test_ru_modal_predicates() {
        let tree = rows(&[
            "1 Нам мы PRON _ _ 2 iobj",
            "2 следует следовать VERB _ VerbForm=Fin 0 root",
            "3 уйти уйти VERB _ VerbForm=Inf 2 xcomp",
            "4 , , PUNCT _ _ 6 punct",
            "5 он он PRON _ _ 6 nsubj",
            "6 должен должный ADJ _ Variant=Short 2 parataxis",
        ]);
        let lists = lists(ListCategory::ModalAdjPredicates, &["должный"]);
        assert_eq!(modality_ru(&tree, &lists).count(Feature::Mpred), 2);
    }

    #[test]
    fn test_sledovat_needs_infinitive() {
        let with_inf = rows(&[
            "1 Вам вы PRON _ Case=Dat 2 iobj",
            "2 следует следовать VERB _ VerbForm=Fin 0 root",
            "3 уйти уйти VERB _ VerbForm=Inf 2 xcomp",
        ]);
        assert!(is_modal_predicate_ru(with_inf.get(2).unwrap(), &with_inf));
        let detection = modal_predicates_ru(&with_inf, &LangLists::default());
        assert_eq!(detection.into_outcome().count(Feature::Mpred), 1);

        let bare = rows(&[
            "1 Вывод вывод NOUN _ Case=Nom 2 nsubj",
            "2 следует следовать VERB _ VerbForm=Fin 0 root",
            "3 отсюда отсюда ADV _ _ 2 advmod",
        ]);
        assert!(!is_modal_predicate_ru(bare.get(2).unwrap(), &bare));
        assert_eq!(modal_predicates_ru(&bare, &LangLists::default()).into_outcome(), Outcome::NoMatch);
    }

    #[test]
    fn test_quantifiers() {
        let quantifiers = lists(ListCategory::AdvQuantifiers, &["viel", "much"]);

        let en = rows(&["1 much much ADV RB _ 2 advmod", "2 better good ADJ JJR _ 0 root"]);
        assert_eq!(quantifiers_en(&en, &quantifiers).count(Feature::Mquantif), 1);

        // viel modifying a noun is left out
        let de = rows(&[
            "1 viel viel ADV _ _ 2 advmod",
            "2 Geld Geld NOUN _ _ 3 obj",
            "3 haben haben VERB _ _ 0 root",
            "4 viel viel ADV _ _ 3 advmod",
        ]);
        assert_eq!(quantifiers_de(&de, &quantifiers).count(Feature::Mquantif), 1);

        // a headless quantifier is not counted
        let headless = rows(&["1 viel viel ADV _ _ 0 root", "2 ! ! PUNCT _ _ 1 punct"]);
        assert_eq!(quantifiers_de(&headless, &quantifiers), Outcome::NoMatch);

        let ru = rows(&["1 очень очень ADV _ _ 2 advmod", "2 рад рад ADJ _ _ 0 root"]);
        assert_eq!(quantifiers_ru(&ru, &LangLists::default()).count(Feature::Mquantif), 1);
    }
}
