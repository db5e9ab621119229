use crate::attributes::Attributes;
use crate::composite::CompositeOptions;
use crate::date::{DateCriterion, DateRangeCriterion};
use crate::entry::Entry;
use crate::error::SieveError;
use crate::name::{ExtensionCriterion, NameCriterion};
use crate::pattern::PatternCriterion;
use crate::size::{CommonSize, SizeCriterion, SizeRangeCriterion};
use crate::traits::Matcher;

/// Where a traversal's predicate comes from.
///
/// Each variant turns into one [`Matcher`]; a walk without any `Filter`
/// yields every entry.
pub enum Filter {
    Size(SizeCriterion),
    SizeRange(SizeRangeCriterion),
    CommonSize(CommonSize),
    Name(NameCriterion),
    Extension(ExtensionCriterion),
    Date(DateCriterion),
    DateRange(DateRangeCriterion),
    Pattern(PatternCriterion),
    /// Exact attribute-set equality.
    Attributes(Attributes),
    Composite(CompositeOptions),
    Custom(Box<dyn Matcher>),
}

impl Filter {
    /// Wrap a caller-supplied predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Box::new(predicate))
    }

    pub fn into_matcher(self) -> Box<dyn Matcher> {
        match self {
            Self::Size(c) => Box::new(c),
            Self::SizeRange(c) => Box::new(c),
            Self::CommonSize(c) => Box::new(c),
            Self::Name(c) => Box::new(c),
            Self::Extension(c) => Box::new(c),
            Self::Date(c) => Box::new(c),
            Self::DateRange(c) => Box::new(c),
            Self::Pattern(c) => Box::new(c),
            Self::Attributes(flags) => Box::new(AttributesMatcher(flags)),
            Self::Composite(c) => Box::new(c),
            Self::Custom(m) => m,
        }
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Size(c) => f.debug_tuple("Size").field(c).finish(),
            Self::SizeRange(c) => f.debug_tuple("SizeRange").field(c).finish(),
            Self::CommonSize(c) => f.debug_tuple("CommonSize").field(c).finish(),
            Self::Name(c) => f.debug_tuple("Name").field(c).finish(),
            Self::Extension(c) => f.debug_tuple("Extension").field(c).finish(),
            Self::Date(c) => f.debug_tuple("Date").field(c).finish(),
            Self::DateRange(c) => f.debug_tuple("DateRange").field(c).finish(),
            Self::Pattern(c) => f.debug_tuple("Pattern").field(c).finish(),
            Self::Attributes(c) => f.debug_tuple("Attributes").field(c).finish(),
            Self::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

macro_rules! filter_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Filter {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

filter_from! {
    SizeCriterion => Size,
    SizeRangeCriterion => SizeRange,
    CommonSize => CommonSize,
    NameCriterion => Name,
    ExtensionCriterion => Extension,
    DateCriterion => Date,
    DateRangeCriterion => DateRange,
    PatternCriterion => Pattern,
    Attributes => Attributes,
    CompositeOptions => Composite,
}

struct AttributesMatcher(Attributes);

impl Matcher for AttributesMatcher {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(crate::attributes::match_by_attributes(entry, self.0))
    }
}

/// Matches every entry. Used when no filter is specified.
pub(crate) struct AllMatcher;

impl Matcher for AllMatcher {
    fn matches(&self, _entry: &Entry) -> Result<bool, SieveError> {
        Ok(true)
    }
}
