use crate::attributes::{match_by_attributes, Attributes};
use crate::date::{DateCriterion, DateRangeCriterion};
use crate::entry::Entry;
use crate::error::SieveError;
use crate::name::{match_by_extension, NameCriterion};
use crate::pattern::PatternCriterion;
use crate::size::{match_by_common_size, CommonSize, SizeCriterion, SizeRangeCriterion};
use crate::traits::Matcher;

/// A bag of optional criteria combined with AND.
///
/// Every criterion that is set must match. A bag with nothing set matches
/// **nothing**: an empty `CompositeOptions` is a reject-all filter, not a
/// pass-through. Use no filter at all to list everything.
///
/// `extension` and `common_size` are file criteria. Directories have no size,
/// so `common_size` never matches one.
///
/// # Example
///
/// ```rust
/// use dirsieve::{CompositeOptions, CommonSize, NameCriterion};
///
/// let options = CompositeOptions::new()
///     .extension("log")
///     .common_size(CommonSize::Small)
///     .name(NameCriterion::new("server"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompositeOptions {
    pub name: Option<NameCriterion>,
    pub extension: Option<String>,
    pub attributes: Option<Attributes>,
    pub common_size: Option<CommonSize>,
    pub size: Option<SizeCriterion>,
    pub size_range: Option<SizeRangeCriterion>,
    pub date: Option<DateCriterion>,
    pub date_range: Option<DateRangeCriterion>,
    pub pattern: Option<PatternCriterion>,
}

impl CompositeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, criterion: NameCriterion) -> Self {
        self.name = Some(criterion);
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn attributes(mut self, flags: Attributes) -> Self {
        self.attributes = Some(flags);
        self
    }

    pub fn common_size(mut self, bucket: CommonSize) -> Self {
        self.common_size = Some(bucket);
        self
    }

    pub fn size(mut self, criterion: SizeCriterion) -> Self {
        self.size = Some(criterion);
        self
    }

    pub fn size_range(mut self, criterion: SizeRangeCriterion) -> Self {
        self.size_range = Some(criterion);
        self
    }

    pub fn date(mut self, criterion: DateCriterion) -> Self {
        self.date = Some(criterion);
        self
    }

    pub fn date_range(mut self, criterion: DateRangeCriterion) -> Self {
        self.date_range = Some(criterion);
        self
    }

    pub fn pattern(mut self, criterion: PatternCriterion) -> Self {
        self.pattern = Some(criterion);
        self
    }

    /// Number of criteria that are set.
    pub fn len(&self) -> usize {
        [
            self.name.is_some(),
            self.extension.is_some(),
            self.attributes.is_some(),
            self.common_size.is_some(),
            self.size.is_some(),
            self.size_range.is_some(),
            self.date.is_some(),
            self.date_range.is_some(),
            self.pattern.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// `true` when no criterion is set, in which case nothing matches.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The set criteria, in evaluation order.
    fn checks(&self) -> Vec<Check<'_>> {
        let mut checks = Vec::with_capacity(self.len());
        if let Some(c) = &self.name {
            checks.push(Check::Criterion(c));
        }
        if let Some(ext) = &self.extension {
            checks.push(Check::Extension(ext));
        }
        if let Some(flags) = self.attributes {
            checks.push(Check::Attributes(flags));
        }
        if let Some(bucket) = self.common_size {
            checks.push(Check::CommonSize(bucket));
        }
        if let Some(c) = &self.size {
            checks.push(Check::Criterion(c));
        }
        if let Some(c) = &self.size_range {
            checks.push(Check::Criterion(c));
        }
        if let Some(c) = &self.date {
            checks.push(Check::Criterion(c));
        }
        if let Some(c) = &self.date_range {
            checks.push(Check::Criterion(c));
        }
        if let Some(c) = &self.pattern {
            checks.push(Check::Criterion(c));
        }
        checks
    }
}

enum Check<'a> {
    Criterion(&'a dyn Matcher),
    Extension(&'a str),
    Attributes(Attributes),
    CommonSize(CommonSize),
}

impl Check<'_> {
    fn run(&self, entry: &Entry) -> Result<bool, SieveError> {
        match self {
            Check::Criterion(m) => m.matches(entry),
            Check::Extension(ext) => Ok(match_by_extension(entry, ext)),
            Check::Attributes(flags) => Ok(match_by_attributes(entry, *flags)),
            Check::CommonSize(bucket) => Ok(match_by_common_size(entry, *bucket)),
        }
    }
}

impl Matcher for CompositeOptions {
    /// AND over every set criterion, stopping at the first that fails.
    /// An error from a criterion stops evaluation and is returned.
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        let checks = self.checks();
        if checks.is_empty() {
            return Ok(false);
        }
        for check in &checks {
            if !check.run(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
