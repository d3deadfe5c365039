//! Pronominal reference: personal pronouns, possessives, indefinite pro-forms

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::tree::{SentenceTree, Token};
use regex::Regex;
use std::sync::LazyLock;

const PPRON_EN: &[&str] = &["i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them"];

const PPRON_DE: &[&str] = &[
    "ich", "ihr", "du", "er", "sie", "es", "wir", "mich", "mir", "dich", "dir", "ihm", "ihn", "uns",
    "ihnen",
];

const PPRON_RU: &[&str] = &[
    "я", "ты", "вы", "он", "она", "оно", "мы", "они", "меня", "тебя", "его", "её", "ее", "нас", "вас",
    "их", "неё", "нее", "него", "них", "мне", "тебе", "ей", "ему", "нам", "вам", "им", "ней", "нему",
    "ним", "мной", "мною", "тобой", "тобою", "вами", "ею", "нами", "ими", "нем", "нём", "нею", "ними",
];

const PPRON_ES: &[&str] = &[
    "yo", "tú", "vos", "usted", "él", "ella", "nosotros", "nosotras", "ustedes", "vosotros",
    "vosotras", "ellos", "ellas", "me", "te", "lo", "nos", "os", "los", "la", "las", "se", "le",
    "les", "mí", "ti", "sí", "conmigo", "contigo", "consigo",
];

const POSS_EN: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const POSS_DE: &[&str] = &["mein", "dein", "sein", "ihr", "ihr|ihr", "unser", "eurer"];

const POSS_RU: &[&str] = &["мой", "твой", "ваш", "его", "ее", "её", "наш", "их", "ихний", "свой"];

const POSS_ES: &[&str] = &[
    "mi", "mis", "tu", "tus", "su", "sus", "nuestro", "nuestros", "nuestra", "nuestras", "vuestro",
    "vuestros", "vuestra", "vuestras",
];

const INDEF_EN: &[&str] = &[
    "anybody", "anyone", "anything", "everybody", "everyone", "everything", "nobody", "none",
    "nothing", "somebody", "someone", "something", "elsewhere", "nowhere", "everywhere",
    "somewhere", "anywhere",
];

const INDEF_DE: &[&str] = &[
    "etwas", "irgendetwas", "irgendwelch", "irgendwas", "jedermann", "jedermanns", "jemand",
    "alles", "niemand", "nichts", "irgendwo", "manch",
];

const INDEF_RU_NEG: &[&str] = &["некто", "нечто", "нечего", "никто", "ничто", "нигде", "никуда", "ниоткуда"];

const INDEF_RU_REDUPLICATED: &[&str] = &[
    "кто-кто", "кого-кого", "кому-кому", "кем-кем", "ком-ком", "что-что", "чего-чего", "чему-чему",
    "чем-чем", "куда-куда", "где-где",
];

const INDEF_ES: &[&str] = &[
    "todo", "toda", "todos", "todas", "ambos", "ambas", "cada", "uno", "una", "alguno", "alguna",
    "algunos", "algunas", "algún", "ninguno", "ninguna", "ningunos", "ningunas", "ningún", "alguien",
    "algo", "nada", "nadie", "varios", "varias", "cualquiera", "cualesquiera", "cuánto", "cuánta",
    "cuántos", "cuántas", "tanto", "tanta", "tantos", "tantas", "tan", "mucho", "mucha", "muchos",
    "muchas", "muy", "poco", "poca", "pocos", "pocas", "bastante", "bastantes", "demasiado",
    "demasiada", "demasiados", "demasiadas", "más", "menos",
];

const INDEF_ES_TYPES: &[&str] = &["PronType=Ind", "PronType=Tot", "PronType=Int,Rel", "PronType=Neg"];

static RU_INDEF_INFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-то|-нибудь|-либо").expect("valid indefinite pattern"));

fn is_personal(token: &Token) -> bool {
    token.is_upos("PRON") && token.feats.has_key("Person") && !token.feats.is("Poss", "Yes")
}

fn personal_pronouns(tree: &SentenceTree, forms: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| is_personal(t)) {
        if forms.contains(&token.form.to_lowercase().as_str()) {
            detection.hit(Feature::Ppron, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn ppron_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    personal_pronouns(tree, PPRON_EN)
}

fn ppron_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    personal_pronouns(tree, PPRON_DE)
}

fn ppron_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    personal_pronouns(tree, PPRON_RU)
}

fn ppron_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    personal_pronouns(tree, PPRON_ES)
}

fn possessives(tree: &SentenceTree, lemmas: &[&str]) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if lemmas.contains(&token.lemma.to_lowercase().as_str())
            && (token.is_upos("DET") || token.is_upos("PRON"))
            && token.feats.is("Poss", "Yes")
        {
            detection.hit(Feature::Possdet, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn possdet_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    possessives(tree, POSS_EN)
}

fn possdet_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    possessives(tree, POSS_DE)
}

fn possdet_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    possessives(tree, POSS_ES)
}

/// Russian possessive determiners carry no reliable Poss feature
fn possdet_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.is_upos("DET")) {
        if POSS_RU.contains(&token.lemma.to_lowercase().as_str()) {
            detection.hit(Feature::Possdet, &token.lemma);
        }
    }
    detection.into_outcome()
}

fn indef_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree.iter().filter(|t| t.lemma_in(INDEF_EN)) {
        detection.hit(Feature::Indef, &token.lemma);
    }
    detection.into_outcome()
}

fn indef_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if token.lemma_in(INDEF_DE) && token.feats.has_value("PronType", "Ind") {
            detection.hit(Feature::Indef, &token.lemma);
        }
    }
    detection.into_outcome()
}

/// Each pattern counts on its own, so one lemma may score more than once
fn indef_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        let lemma = token.lemma.as_str();
        let compound_which = lemma.contains("какой");
        if token.is_upos("PRON") && token.lemma_in(INDEF_RU_NEG) {
            detection.hit(Feature::Indef, lemma);
        }
        if RU_INDEF_INFIX.is_match(lemma) && !compound_which {
            detection.hit(Feature::Indef, lemma);
        }
        if lemma.starts_with("кое") && !compound_which {
            detection.hit(Feature::Indef, lemma);
        }
        if token.lemma_in(INDEF_RU_REDUPLICATED) {
            detection.hit(Feature::Indef, lemma);
        }
    }
    detection.into_outcome()
}

fn indef_es(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut detection = Detection::new();
    for token in tree {
        if token.lemma_in(INDEF_ES) && INDEF_ES_TYPES.iter().any(|t| token.feats.contains(t)) {
            detection.hit(Feature::Indef, &token.lemma);
        }
    }
    detection.into_outcome()
}

detector!(PersonalPronounsEn, "ppron-en", ppron_en);
detector!(PersonalPronounsDe, "ppron-de", ppron_de);
detector!(PersonalPronounsRu, "ppron-ru", ppron_ru);
detector!(PersonalPronounsEs, "ppron-es", ppron_es);
detector!(PossessivesEn, "possdet-en", possdet_en);
detector!(PossessivesDe, "possdet-de", possdet_de);
detector!(PossessivesRu, "possdet-ru", possdet_ru);
detector!(PossessivesEs, "possdet-es", possdet_es);
detector!(IndefinitesEn, "indef-en", indef_en);
detector!(IndefinitesDe, "indef-de", indef_de);
detector!(IndefinitesRu, "indef-ru", indef_ru);
detector!(IndefinitesEs, "indef-es", indef_es);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::PersonalPronouns, Box::new(PersonalPronounsEn));
    registry.register(Lang::De, Family::PersonalPronouns, Box::new(PersonalPronounsDe));
    registry.register(Lang::Ru, Family::PersonalPronouns, Box::new(PersonalPronounsRu));
    registry.register(Lang::Es, Family::PersonalPronouns, Box::new(PersonalPronounsEs));
    registry.register(Lang::En, Family::Possessives, Box::new(PossessivesEn));
    registry.register(Lang::De, Family::Possessives, Box::new(PossessivesDe));
    registry.register(Lang::Ru, Family::Possessives, Box::new(PossessivesRu));
    registry.register(Lang::Es, Family::Possessives, Box::new(PossessivesEs));
    registry.register(Lang::En, Family::Indefinites, Box::new(IndefinitesEn));
    registry.register(Lang::De, Family::Indefinites, Box::new(IndefinitesDe));
    registry.register(Lang::Ru, Family::Indefinites, Box::new(IndefinitesRu));
    registry.register(Lang::Es, Family::Indefinites, Box::new(IndefinitesEs));
}
