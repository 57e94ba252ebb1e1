use crate::error::ValidatorError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Validates values against an ordered set of regular expressions.
///
/// Every pattern must match the *whole* value; patterns are tried in
/// construction order and the first one that matches wins. All patterns share
/// one case-sensitivity mode.
///
/// # Examples
/// ```
/// use domain_validator::validation::pattern::RegexValidator;
///
/// let validator = RegexValidator::from_patterns(&[r"(\d+)-(\d+)", r"(\d+)"], true).unwrap();
/// assert!(validator.is_valid("12-34"));
/// assert_eq!(validator.validate("12-34").as_deref(), Some("1234"));
/// assert_eq!(validator.validate("56").as_deref(), Some("56"));
/// assert!(!validator.is_valid("12-"));
/// ```
#[derive(Debug, Clone)]
pub struct RegexValidator {
    sources: Vec<String>,
    patterns: Vec<Regex>,
}

impl RegexValidator {
    /// Case-sensitive validator for a single pattern.
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        Self::with_case(pattern, true)
    }

    pub fn with_case(pattern: &str, case_sensitive: bool) -> Result<Self, ValidatorError> {
        Self::from_patterns(&[pattern], case_sensitive)
    }

    /// Builds a validator matching any of `patterns`.
    ///
    /// # Errors
    /// Returns [`ValidatorError::InvalidPatternSpec`] if the list is empty, an
    /// entry is empty, or an entry fails to compile.
    pub fn from_patterns<S: AsRef<str>>(
        patterns: &[S],
        case_sensitive: bool,
    ) -> Result<Self, ValidatorError> {
        if patterns.is_empty() {
            return Err(ValidatorError::InvalidPatternSpec(
                "regular expressions are missing".to_string(),
            ));
        }

        let mut compiled = Vec::with_capacity(patterns.len());
        let mut sources = Vec::with_capacity(patterns.len());
        for (i, source) in patterns.iter().enumerate() {
            let source = source.as_ref();
            if source.is_empty() {
                return Err(ValidatorError::InvalidPatternSpec(format!(
                    "regular expression[{}] is missing",
                    i
                )));
            }
            // Anchor the whole expression so `is_match` means a full match
            let regex = RegexBuilder::new(&format!("^(?:{})$", source))
                .case_insensitive(!case_sensitive)
                .build()
                .map_err(|e| {
                    ValidatorError::InvalidPatternSpec(format!(
                        "regular expression[{}] does not compile: {}",
                        i, e
                    ))
                })?;
            compiled.push(regex);
            sources.push(source.to_string());
        }

        Ok(Self {
            sources,
            patterns: compiled,
        })
    }

    /// Returns `true` if any pattern matches the entire value.
    pub fn is_valid(&self, value: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(value))
    }

    /// Returns the capture groups of the first matching pattern.
    ///
    /// Groups that did not participate in the match are `None`. Returns `None`
    /// when no pattern matches.
    pub fn match_groups<'t>(&self, value: &'t str) -> Option<Vec<Option<&'t str>>> {
        self.patterns.iter().find_map(|p| {
            p.captures(value).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str()))
                    .collect()
            })
        })
    }

    /// Returns the matched groups aggregated into one string.
    ///
    /// With exactly one group its value is returned as is, otherwise the
    /// groups that participated are concatenated in order.
    pub fn validate(&self, value: &str) -> Option<String> {
        let groups = self.match_groups(value)?;
        if groups.len() == 1 {
            return groups[0].map(str::to_string);
        }
        Some(groups.into_iter().flatten().collect())
    }
}

impl fmt::Display for RegexValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegexValidator{{{}}}", self.sources.join(","))
    }
}
