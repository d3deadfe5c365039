//! Language codes and per-language sentence boundary data

use std::fmt;

/// Languages with dedicated detectors
///
/// Any other code maps to [`Lang::Unsupported`]: language-neutral measures
/// still run, language-specific detectors contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lang {
    En,
    De,
    Ru,
    Es,
    Unsupported,
}

impl Lang {
    pub const SUPPORTED: [Lang; 4] = [Lang::En, Lang::De, Lang::Ru, Lang::Es];

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            "de" | "ge" => Lang::De,
            "ru" => Lang::Ru,
            "es" => Lang::Es,
            _ => Lang::Unsupported,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
            Lang::Ru => "ru",
            Lang::Es => "es",
            Lang::Unsupported => "xx",
        }
    }

    /// Sentence-final tokens that do not actually end a sentence
    ///
    /// Matched against the form or the lemma of a tree's last token.
    pub fn non_terminals(self) -> &'static [&'static str] {
        match self {
            Lang::En => &[":", ";", "Mr.", "Dr."],
            Lang::De => &[":", ";", "z.B.", "Dr."],
            Lang::Ru => &[":", ";", "Дж."],
            Lang::Es => &[":", ";"],
            Lang::Unsupported => &[],
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("DE"), Lang::De);
        assert_eq!(Lang::from_code("ru"), Lang::Ru);
        assert_eq!(Lang::from_code("es"), Lang::Es);
        assert_eq!(Lang::from_code("fr"), Lang::Unsupported);
    }

    #[test]
    fn test_non_terminals() {
        assert!(Lang::En.non_terminals().contains(&"Mr."));
        assert!(Lang::De.non_terminals().contains(&"z.B."));
        assert!(Lang::Ru.non_terminals().contains(&"Дж."));
        assert!(Lang::Unsupported.non_terminals().is_empty());
    }
}
