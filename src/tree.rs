//! Sentence and token data structures
//!
//! A [`SentenceTree`] owns its tokens in surface order and translates
//! CoNLL-U ids to slice positions once, at construction time. Some corpora
//! number the first token 2 instead of 1; the translation base is taken from
//! the first token so positional lookups stay correct for those sentences.

/// Morphological features of a token
///
/// Keeps the raw `Key=Value|Key=Value` text for substring predicates and
/// exposes structured access to individual entries. Values may be
/// comma-joined (`PronType=Int,Rel`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    raw: String,
}

impl Features {
    /// Parse a FEATS field; `_` means no features
    pub fn parse(field: &str) -> Self {
        if field == "_" {
            Self::default()
        } else {
            Self {
                raw: field.to_string(),
            }
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Substring test over the raw feature string
    pub fn contains(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }

    /// Individual `Key=Value` entries in annotation order
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.raw.split('|').filter(|entry| !entry.is_empty())
    }

    /// Iterate (key, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries().filter_map(|entry| entry.split_once('='))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Exact match on the full value, so `is("PronType", "Int,Rel")`
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Membership in a comma-joined multi-value
    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.get(key)
            .is_some_and(|values| values.split(',').any(|v| v == value))
    }
}

/// A single token line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: usize,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    /// Empty when the XPOS field is `_`
    pub xpos: String,
    pub feats: Features,
    /// 0 marks the root
    pub head: usize,
    pub rel: String,
}

impl Token {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        form: &str,
        lemma: &str,
        upos: &str,
        xpos: &str,
        feats: &str,
        head: usize,
        rel: &str,
    ) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: if xpos == "_" {
                String::new()
            } else {
                xpos.to_string()
            },
            feats: Features::parse(feats),
            head,
            rel: rel.to_string(),
        }
    }

    #[inline]
    pub fn is_upos(&self, tag: &str) -> bool {
        self.upos == tag
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.head == 0
    }

    #[inline]
    pub fn is_punct(&self) -> bool {
        self.rel == "punct"
    }

    #[inline]
    pub fn lemma_in(&self, lemmas: &[&str]) -> bool {
        lemmas.contains(&self.lemma.as_str())
    }

    #[inline]
    pub fn form_in(&self, forms: &[&str]) -> bool {
        forms.contains(&self.form.as_str())
    }
}

/// A parsed sentence: tokens in surface order, immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceTree {
    tokens: Vec<Token>,
    base: usize,
}

impl SentenceTree {
    pub fn new(tokens: Vec<Token>) -> Self {
        let base = tokens.first().map_or(1, |t| t.id);
        Self { tokens, base }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Id of the first token: 1 normally, 2 for the shifted sentences
    pub fn base(&self) -> usize {
        self.base
    }

    /// Translate a token id to its position in [`tokens`](Self::tokens)
    ///
    /// The offset guess is verified against the stored id; sentences with
    /// gaps in their numbering fall back to a scan. Never returns the slot of
    /// a different token.
    pub fn index_of(&self, id: usize) -> Option<usize> {
        if let Some(offset) = id.checked_sub(self.base) {
            if self.tokens.get(offset).is_some_and(|t| t.id == id) {
                return Some(offset);
            }
        }
        self.tokens.iter().position(|t| t.id == id)
    }

    /// Look up a token by id
    pub fn get(&self, id: usize) -> Option<&Token> {
        self.index_of(id).map(|index| &self.tokens[index])
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// The last two tokens, `None` on one-token trees
    pub fn last_two(&self) -> Option<(&Token, &Token)> {
        match self.tokens.as_slice() {
            [.., before, last] => Some((before, last)),
            _ => None,
        }
    }

    /// Sentence ends in a question mark on either of its last two lemmas
    ///
    /// `None` when the tree is too short to tell.
    pub fn is_interrogative(&self) -> Option<bool> {
        self.last_two()
            .map(|(before, last)| before.lemma == "?" || last.lemma == "?")
    }

    /// Surface forms joined by single spaces
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&token.form);
        }
        text
    }

    pub fn root_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_root()).count()
    }

    /// Exactly one root and every head resolves inside the sentence
    pub fn is_well_formed(&self) -> bool {
        self.root_count() == 1
            && self
                .tokens
                .iter()
                .all(|t| t.is_root() || (t.head != t.id && self.get(t.head).is_some()))
    }
}

impl<'a> IntoIterator for &'a SentenceTree {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
