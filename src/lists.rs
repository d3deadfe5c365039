//! Support word lists
//!
//! Open-class lexical lists are read from `<lang>_<category>.lst` files, one
//! entry per line. They are loaded once and shared read-only by every
//! document.

use crate::lang::Lang;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ListError {
    #[error("support list directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("failed to read support list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Categories of support lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListCategory {
    Additive,
    Adversative,
    Causal,
    TempSequen,
    Epistemic,
    DeverbalsStop,
    AdvQuantifiers,
    ModalAdjPredicates,
    Converts,
}

impl ListCategory {
    pub const ALL: [ListCategory; 9] = [
        ListCategory::Additive,
        ListCategory::Adversative,
        ListCategory::Causal,
        ListCategory::TempSequen,
        ListCategory::Epistemic,
        ListCategory::DeverbalsStop,
        ListCategory::AdvQuantifiers,
        ListCategory::ModalAdjPredicates,
        ListCategory::Converts,
    ];

    /// Discourse-marker categories
    pub const DISCOURSE: [ListCategory; 5] = [
        ListCategory::Additive,
        ListCategory::Adversative,
        ListCategory::Causal,
        ListCategory::TempSequen,
        ListCategory::Epistemic,
    ];

    /// File name part after `<lang>_`
    pub fn stem(self) -> &'static str {
        match self {
            ListCategory::Additive => "additive",
            ListCategory::Adversative => "adversative",
            ListCategory::Causal => "causal",
            ListCategory::TempSequen => "temp_sequen",
            ListCategory::Epistemic => "epistemic",
            ListCategory::DeverbalsStop => "deverbals_stop",
            ListCategory::AdvQuantifiers => "adv_quantifiers",
            ListCategory::ModalAdjPredicates => "modal-adj_predicates",
            ListCategory::Converts => "converts",
        }
    }

    fn is_discourse(self) -> bool {
        Self::DISCOURSE.contains(&self)
    }
}

/// Ordered list of entries with a membership index
#[derive(Debug, Clone, Default)]
pub struct WordList {
    items: Vec<String>,
    index: FxHashSet<String>,
}

impl WordList {
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse a list file body: trimmed lines, blanks dropped
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<String>> for WordList {
    fn from(items: Vec<String>) -> Self {
        let index = items.iter().cloned().collect();
        Self { items, index }
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

/// All lists for one language; every category is present, possibly empty
#[derive(Debug, Clone)]
pub struct LangLists {
    lists: FxHashMap<ListCategory, WordList>,
}

impl Default for LangLists {
    fn default() -> Self {
        Self {
            lists: ListCategory::ALL
                .iter()
                .map(|&category| (category, WordList::default()))
                .collect(),
        }
    }
}

impl LangLists {
    pub fn get(&self, category: ListCategory) -> &WordList {
        // every category is inserted on construction
        &self.lists[&category]
    }

    pub fn set(&mut self, category: ListCategory, list: WordList) {
        self.lists.insert(category, list);
    }

    pub fn with(mut self, category: ListCategory, list: WordList) -> Self {
        self.set(category, list);
        self
    }
}

/// Lists for every loaded language
#[derive(Debug, Clone, Default)]
pub struct SupportLists {
    langs: FxHashMap<Lang, LangLists>,
    empty: LangLists,
}

impl SupportLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists for `lang`, all empty when nothing was loaded for it
    pub fn for_lang(&self, lang: Lang) -> &LangLists {
        self.langs.get(&lang).unwrap_or(&self.empty)
    }

    pub fn insert(&mut self, lang: Lang, lists: LangLists) {
        self.langs.insert(lang, lists);
    }

    /// Load `<dir>/<lang>_<stem>.lst` for each language
    ///
    /// Discourse lists may also live in a `dms/` subdirectory. A missing file
    /// yields an empty list and a warning; an unreadable one is an error.
    pub fn load_dir(dir: &Path, langs: &[Lang]) -> Result<Self, ListError> {
        if !dir.is_dir() {
            return Err(ListError::MissingDirectory(dir.to_path_buf()));
        }
        let mut support = Self::new();
        for &lang in langs {
            let mut lists = LangLists::default();
            for category in ListCategory::ALL {
                let file_name = format!("{}_{}.lst", lang.code(), category.stem());
                let mut candidates = vec![dir.join(&file_name)];
                if category.is_discourse() {
                    candidates.push(dir.join("dms").join(&file_name));
                }
                match candidates.into_iter().find(|path| path.is_file()) {
                    Some(path) => {
                        let text = fs::read_to_string(&path)
                            .map_err(|source| ListError::Read { path: path.clone(), source })?;
                        let list = WordList::parse(&text);
                        debug!(lang = %lang, list = category.stem(), entries = list.len(), "loaded support list");
                        lists.set(category, list);
                    }
                    None => {
                        warn!(lang = %lang, file = %file_name, "support list missing, using empty list");
                    }
                }
            }
            support.insert(lang, lists);
        }
        Ok(support)
    }
}
