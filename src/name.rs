use crate::entry::Entry;
use crate::error::SieveError;
use crate::traits::Matcher;

/// How names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    fn same(self, a: &str, b: &str) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a == b || a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Compare `keyword` with the entry's name without its extension.
/// Directories are compared by their full name.
pub fn match_by_name(entry: &Entry, keyword: &str, case: CaseSensitivity) -> bool {
    case.same(entry.stem(), keyword)
}

/// Compare `keyword` with the entry's full name, extension included.
pub fn match_by_name_with_extension(entry: &Entry, keyword: &str, case: CaseSensitivity) -> bool {
    case.same(&entry.name, keyword)
}

/// Reduce a user-supplied extension to `.word`: the first run of word
/// characters, prefixed with a dot. `"txt"`, `".txt"` and `"*.txt"` all give
/// `".txt"`. `None` if there are no word characters at all.
pub fn normalize_extension(extension: &str) -> Option<String> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let word: String = extension
        .chars()
        .skip_while(|c| !is_word(*c))
        .take_while(|c| is_word(*c))
        .collect();

    (!word.is_empty()).then(|| format!(".{word}"))
}

/// Case-insensitive comparison of the entry's extension with `extension`
/// after [`normalize_extension`].
pub fn match_by_extension(entry: &Entry, extension: &str) -> bool {
    match (normalize_extension(extension), entry.extension()) {
        (Some(wanted), Some(actual)) => wanted.to_lowercase() == actual.to_lowercase(),
        _ => false,
    }
}

/// Literal name comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCriterion {
    pub keyword: String,
    /// Compare against the full name rather than the name without extension.
    pub include_extension: bool,
    pub case: CaseSensitivity,
}

impl NameCriterion {
    /// A case-insensitive comparison against the name without extension.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            include_extension: false,
            case: CaseSensitivity::default(),
        }
    }

    pub fn with_extension(mut self, yes: bool) -> Self {
        self.include_extension = yes;
        self
    }

    pub fn case(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }
}

impl Matcher for NameCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(if self.include_extension {
            match_by_name_with_extension(entry, &self.keyword, self.case)
        } else {
            match_by_name(entry, &self.keyword, self.case)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCriterion {
    pub extension: String,
}

impl ExtensionCriterion {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Matcher for ExtensionCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(match_by_extension(entry, &self.extension))
    }
}
