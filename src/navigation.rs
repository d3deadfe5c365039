//! Tree navigation primitives
//!
//! Read-only lookups over a (token, tree) pair. Child lists come back in
//! surface order. [`select_child`] scans every child and keeps the last one
//! that matches, so with several candidates the rightmost child wins.

use crate::tree::{SentenceTree, Token};

/// Governing token, `None` for the root or a head id missing from the tree
pub fn head_of<'a>(token: &Token, tree: &'a SentenceTree) -> Option<&'a Token> {
    if token.is_root() || token.head == token.id {
        return None;
    }
    tree.get(token.head)
}

/// Dependents of `token` in surface order
pub fn children_of<'a>(
    token: &'a Token,
    tree: &'a SentenceTree,
) -> impl Iterator<Item = &'a Token> + 'a {
    let id = token.id;
    tree.iter().filter(move |t| t.head == id && t.id != id)
}

/// Token immediately before `token`, `None` at sentence start
pub fn previous_token<'a>(token: &Token, tree: &'a SentenceTree) -> Option<&'a Token> {
    let index = tree.index_of(token.id)?;
    index.checked_sub(1).map(|prev| &tree.tokens()[prev])
}

/// Token immediately after `token`, `None` at sentence end
pub fn next_token<'a>(token: &Token, tree: &'a SentenceTree) -> Option<&'a Token> {
    let index = tree.index_of(token.id)?;
    tree.tokens().get(index + 1)
}

/// Predicate shapes for [`select_child`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildQuery<'q> {
    /// Relation equal to `rel`, raw feats containing `feat`
    RelFeat { rel: &'q str, feat: &'q str },
    /// UPOS equal to `upos`, raw feats containing `feat`
    PosFeat { upos: &'q str, feat: &'q str },
    /// UPOS equal to `upos`, relation containing `rel`
    PosRel { upos: &'q str, rel: &'q str },
    /// Lemma and UPOS both equal
    LemmaPos { lemma: &'q str, upos: &'q str },
}

impl ChildQuery<'_> {
    pub fn matches(&self, token: &Token) -> bool {
        match *self {
            ChildQuery::RelFeat { rel, feat } => token.rel == rel && token.feats.contains(feat),
            ChildQuery::PosFeat { upos, feat } => token.upos == upos && token.feats.contains(feat),
            ChildQuery::PosRel { upos, rel } => token.upos == upos && token.rel.contains(rel),
            ChildQuery::LemmaPos { lemma, upos } => token.lemma == lemma && token.upos == upos,
        }
    }
}

/// Last child of `token` satisfying `query`
pub fn select_child<'a>(
    token: &'a Token,
    tree: &'a SentenceTree,
    query: ChildQuery<'_>,
) -> Option<&'a Token> {
    children_of(token, tree).filter(|child| query.matches(child)).last()
}

pub fn child_upos<'a>(token: &'a Token, tree: &'a SentenceTree) -> Vec<&'a str> {
    children_of(token, tree).map(|c| c.upos.as_str()).collect()
}

pub fn child_xpos<'a>(token: &'a Token, tree: &'a SentenceTree) -> Vec<&'a str> {
    children_of(token, tree).map(|c| c.xpos.as_str()).collect()
}

pub fn child_rels<'a>(token: &'a Token, tree: &'a SentenceTree) -> Vec<&'a str> {
    children_of(token, tree).map(|c| c.rel.as_str()).collect()
}

pub fn child_lemmas<'a>(token: &'a Token, tree: &'a SentenceTree) -> Vec<&'a str> {
    children_of(token, tree).map(|c| c.lemma.as_str()).collect()
}

/// `Key=Value` entries of all children, flattened
pub fn child_feats<'a>(token: &'a Token, tree: &'a SentenceTree) -> Vec<&'a str> {
    children_of(token, tree)
        .flat_map(|c| c.feats.entries())
        .collect()
}

pub fn has_child_upos(token: &Token, tree: &SentenceTree, upos: &str) -> bool {
    children_of(token, tree).any(|c| c.upos == upos)
}

pub fn has_child_rel(token: &Token, tree: &SentenceTree, rel: &str) -> bool {
    children_of(token, tree).any(|c| c.rel == rel)
}

pub fn has_child_lemma_in(token: &Token, tree: &SentenceTree, lemmas: &[&str]) -> bool {
    children_of(token, tree).any(|c| c.lemma_in(lemmas))
}

/// An AUX child with the given lemma
pub fn has_aux_child_lemma(token: &Token, tree: &SentenceTree, lemma: &str) -> bool {
    children_of(token, tree).any(|c| c.upos == "AUX" && c.lemma == lemma)
}

/// An AUX child with the given surface form
pub fn has_aux_child_form(token: &Token, tree: &SentenceTree, form: &str) -> bool {
    children_of(token, tree).any(|c| c.upos == "AUX" && c.form == form)
}
