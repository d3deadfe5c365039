//! Passive voice, split into agentive and agentless
//!
//! Every passive counts once. It is agentive when an oblique dependent carries
//! the agent marker (`by`, `von`, or for Russian an animate instrumental).
//! Agentless is what is left, plus constructions read as semantically passive:
//! German `lassen sich` with an infinitive, and Russian indefinite-personal
//! 3rd-plural predicates.

use super::{Detection, Family, Outcome, Registry, detector};
use crate::features::Feature;
use crate::lang::Lang;
use crate::lists::LangLists;
use crate::navigation::{ChildQuery, child_rels, child_upos, head_of, select_child};
use crate::tree::{SentenceTree, Token};

const OBLIQUE_UPOS: [&str; 3] = ["NOUN", "PRON", "PROPN"];

/// Instrumentals of manner and time, never agents
const NON_AGENT_INS_RU: &[&str] = &[
    "образ", "лето", "осень", "зима", "весна", "утро", "вечер", "ночь",
];

/// Collective subjects that take plural agreement
const COLLECTIVE_RU: &[&str] = &[
    "все", "большинство", "часть", "парочка", "ряд", "количество", "половина", "треть", "четверть",
    "группа",
];

const APPROXIMATORS_RU: &[&str] = &["около", "более", "примерно"];

/// Last oblique of each nominal tag, at most one per tag
fn obliques<'a>(token: &'a Token, tree: &'a SentenceTree) -> impl Iterator<Item = &'a Token> + 'a {
    OBLIQUE_UPOS
        .into_iter()
        .filter_map(move |upos| select_child(token, tree, ChildQuery::PosRel { upos, rel: "obl" }))
}

/// Obliques of `token` introduced by `adposition`
fn marked_agents(token: &Token, tree: &SentenceTree, adposition: &str) -> u64 {
    obliques(token, tree)
        .filter(|obl| {
            select_child(obl, tree, ChildQuery::LemmaPos { lemma: adposition, upos: "ADP" })
                .is_some()
        })
        .count() as u64
}

/// Fold the three tallies into the reported pair
fn tally(all: u64, agentive: u64, semantic: u64) -> Outcome {
    let mut detection = Detection::new();
    detection.add(Feature::Bypassives, agentive);
    detection.add(Feature::Agentless, all.saturating_sub(agentive) + semantic);
    detection.into_outcome()
}

/// Analytic passives: an `aux:pass` whose head passes `is_passive_head`
fn analytic(
    tree: &SentenceTree,
    is_passive_head: impl Fn(&Token) -> bool,
    adposition: &str,
) -> (u64, u64) {
    let mut all = 0;
    let mut agentive = 0;
    for token in tree.iter().filter(|t| t.rel == "aux:pass") {
        let Some(head) = head_of(token, tree) else {
            continue;
        };
        if is_passive_head(head) {
            all += 1;
            agentive += marked_agents(head, tree, adposition);
        }
    }
    (all, agentive)
}

fn passives_en(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let (all, agentive) = analytic(tree, |head| head.feats.is("Voice", "Pass"), "by");
    tally(all, agentive, 0)
}

fn passives_de(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let (all, agentive) = analytic(tree, |head| head.feats.is("VerbForm", "Part"), "von");
    let semantic = tree
        .iter()
        .filter(|t| t.lemma == "lassen" && t.is_upos("VERB"))
        .filter(|t| {
            let reflexive = ChildQuery::PosFeat { upos: "PRON", feat: "PronType=Prs|Reflex=Yes" };
            let infinitive = ChildQuery::PosFeat { upos: "VERB", feat: "VerbForm=Inf" };
            select_child(t, tree, reflexive).is_some() && select_child(t, tree, infinitive).is_some()
        })
        .count() as u64;
    tally(all, agentive, semantic)
}

/// Short passive participles and synthetic `-ся` passives
fn is_passive_ru(token: &Token) -> bool {
    let feats = &token.feats;
    feats.is("Voice", "Pass")
        && (feats.is("VerbForm", "Fin")
            || (feats.is("VerbForm", "Part") && feats.is("Variant", "Short")))
}

/// Animate instrumental oblique without a preposition
fn is_instrumental_agent(obl: &Token, tree: &SentenceTree) -> bool {
    if !obl.feats.is("Case", "Ins") || obl.lemma_in(NON_AGENT_INS_RU) {
        return false;
    }
    let kids = child_upos(obl, tree);
    !kids.is_empty() && !kids.contains(&"ADP") && obl.feats.is("Animacy", "Anim")
}

/// Subjectless or agreement-only 3rd-plural root: `говорят`, `его уволили`
fn is_indefinite_personal(token: &Token, tree: &SentenceTree) -> bool {
    if !token.upos.contains("VERB")
        || !token.feats.is("Number", "Plur")
        || !token.feats.is("Person", "3")
        || !token.rel.contains("root")
        || token.form_in(&["есть", "имеют"])
    {
        return false;
    }
    // около двадцати пришли
    let approximate = tree.iter().any(|t| t.form_in(APPROXIMATORS_RU))
        && tree.iter().any(|t| t.is_upos("NUM"));
    if approximate {
        return false;
    }
    let rels = child_rels(token, tree);
    match rels.iter().filter(|rel| **rel == "nsubj").count() {
        // a plural object is the subject the parser missed, unless the verb is middle
        0 => {
            let object = ChildQuery::RelFeat { rel: "obj", feat: "Number=Plur" };
            select_child(token, tree, object).is_none() || token.feats.is("Voice", "Mid")
        }
        1 => {
            let subject = ChildQuery::RelFeat { rel: "nsubj", feat: "Number=Sing" };
            select_child(token, tree, subject).is_some_and(|subject| {
                !subject.lemma_in(COLLECTIVE_RU)
                    && !child_rels(subject, tree).contains(&"conj")
                    && !child_upos(subject, tree).contains(&"NUM")
            })
        }
        _ => false,
    }
}

fn passives_ru(tree: &SentenceTree, _: &LangLists) -> Outcome {
    let mut all = 0;
    let mut agentive = 0;
    let mut semantic = 0;
    for token in tree {
        if is_passive_ru(token) {
            all += 1;
            agentive += obliques(token, tree)
                .filter(|obl| is_instrumental_agent(obl, tree))
                .count() as u64;
        }
        if is_indefinite_personal(token, tree) {
            semantic += 1;
        }
    }
    tally(all, agentive, semantic)
}

detector!(PassivesEn, "passives-en", passives_en);
detector!(PassivesDe, "passives-de", passives_de);
detector!(PassivesRu, "passives-ru", passives_ru);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Lang::En, Family::Passives, Box::new(PassivesEn));
    registry.register(Lang::De, Family::Passives, Box::new(PassivesDe));
    registry.register(Lang::Ru, Family::Passives, Box::new(PassivesRu));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::testing::{rows, tree};

    #[test]
    fn test_en_agentive_passive() {
        let tree = tree(
            "1\tHe\the\tPRON\tPRP\t_\t3\tnsubj:pass\t_\t_\n\
             2\twas\tbe\tAUX\tVBD\t_\t3\taux:pass\t_\t_\n\
             3\tseen\tsee\tVERB\tVBN\tTense=Past|VerbForm=Part|Voice=Pass\t0\troot\t_\t_\n\
             4\tby\tby\tADP\tIN\t_\t5\tcase\t_\t_\n\
             5\tthem\tthey\tPRON\tPRP\t_\t3\tobl\t_\t_\n\
             6\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_\n",
        );
        let outcome = passives_en(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Bypassives), 1);
        assert_eq!(outcome.count(Feature::Agentless), 0);
    }

    #[test]
    fn test_en_agentless_passive() {
        let tree = rows(&[
            "1 It it PRON PRP _ 3 nsubj:pass",
            "2 was be AUX VBD _ 3 aux:pass",
            "3 built build VERB VBN VerbForm=Part|Voice=Pass 0 root",
            "4 in in ADP IN _ 5 case",
            "5 Rome Rome PROPN NNP _ 3 obl",
        ]);
        let outcome = passives_en(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Bypassives), 0);
        assert_eq!(outcome.count(Feature::Agentless), 1);
    }

    #[test]
    fn test_de_passive_and_lassen_sich() {
        let tree = rows(&[
            "1 Das der PRON PDS _ 3 nsubj:pass",
            "2 wird werden AUX VAFIN _ 3 aux:pass",
            "3 gemacht machen VERB VVPP VerbForm=Part 0 root",
            "4 von von ADP APPR _ 5 case",
            "5 ihm er PRON PPER _ 3 obl",
            "6 und und CCONJ KON _ 8 cc",
            "7 sich er PRON PRF PronType=Prs|Reflex=Yes 8 obj",
            "8 lässt lassen VERB VVFIN VerbForm=Fin 3 conj",
            "9 lösen lösen VERB VVINF VerbForm=Inf 8 xcomp",
        ]);
        let outcome = passives_de(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Bypassives), 1);
        assert_eq!(outcome.count(Feature::Agentless), 1);
    }

    #[test]
    fn test_ru_instrumental_agent() {
        let tree = rows(&[
            "1 Дом дом NOUN _ Animacy=Inan|Case=Nom 2 nsubj:pass",
            "2 построен построить VERB _ Variant=Short|VerbForm=Part|Voice=Pass 0 root",
            "3 летом лето NOUN _ Animacy=Inan|Case=Ins 2 obl",
            "4 нашим наш DET _ _ 5 det",
            "5 братом брат NOUN _ Animacy=Anim|Case=Ins 2 obl",
        ]);
        let outcome = passives_ru(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Bypassives), 1);
        assert_eq!(outcome.count(Feature::Agentless), 0);
    }

    #[test]
    fn test_ru_seasonal_instrumental_is_not_agent() {
        // mis-tagged animate, yet a time expression
        let tree = rows(&[
            "1 Дом дом NOUN _ Animacy=Inan|Case=Nom 2 nsubj:pass",
            "2 построен построить VERB _ Variant=Short|VerbForm=Part|Voice=Pass 0 root",
            "3 прошлым прошлый ADJ _ Case=Ins 4 amod",
            "4 летом лето NOUN _ Animacy=Anim|Case=Ins 2 obl",
        ]);
        let outcome = passives_ru(&tree, &LangLists::default());
        assert_eq!(outcome.count(Feature::Bypassives), 0);
        assert_eq!(outcome.count(Feature::Agentless), 1);

        // the same shape with a real agent counts
        let agent = rows(&[
            "1 Дом дом NOUN _ Animacy=Inan|Case=Nom 2 nsubj:pass",
            "2 построен построить VERB _ Variant=Short|VerbForm=Part|Voice=Pass 0 root",
            "3 старшим старший ADJ _ Case=Ins 4 amod",
            "4 братом брат NOUN _ Animacy=Anim|Case=Ins 2 obl",
        ]);
        assert_eq!(passives_ru(&agent, &LangLists::default()).count(Feature::Bypassives), 1);
    }

    #[test]
    fn test_ru_indefinite_personal() {
        let subjectless = rows(&[
            "1 Его он PRON _ _ 2 obj",
            "2 уволили уволить VERB _ Number=Plur|Person=3 0 root",
        ]);
        let outcome = passives_ru(&subjectless, &LangLists::default());
        assert_eq!(outcome.count(Feature::Agentless), 1);

        let collective = rows(&[
            "1 Большинство большинство NOUN _ Number=Sing 2 nsubj",
            "2 ушли уйти VERB _ Number=Plur|Person=3 0 root",
        ]);
        assert_eq!(passives_ru(&collective, &LangLists::default()), Outcome::NoMatch);

        let existential = rows(&[
            "1 есть быть VERB _ Number=Plur|Person=3 0 root",
            "2 деньги деньги NOUN _ Case=Nom 1 obj",
        ]);
        assert_eq!(passives_ru(&existential, &LangLists::default()), Outcome::NoMatch);
    }
}
