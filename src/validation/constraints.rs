//! Field-level checks used next to the domain and email validators.

use serde::de::IgnoredAny;
use std::collections::HashSet;

/// Returns true if `text` is a well-formed JSON document.
///
/// # Examples
/// ```
/// use domain_validator::validation::constraints::is_well_formed_json;
///
/// assert!(is_well_formed_json(r#"{"email": "user@example.com"}"#));
/// assert!(!is_well_formed_json(r#"{"email": "user@example.com""#));
/// ```
pub fn is_well_formed_json(text: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}

/// Returns true if `value` names one of `allowed`, ignoring case.
///
/// Both sides are folded to upper case before comparing. A missing value is
/// never a member.
pub fn is_member(value: Option<&str>, allowed: &HashSet<String>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.to_uppercase();
    allowed.iter().any(|candidate| candidate.to_uppercase() == value)
}

/// Returns true if `list` is non-empty and holds no `None` entries.
pub fn has_no_null_and_nonempty<T>(list: &[Option<T>]) -> bool {
    !list.is_empty() && list.iter().all(Option::is_some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json() {
        assert!(is_well_formed_json("{}"));
        assert!(is_well_formed_json("[1, 2, 3]"));
        assert!(is_well_formed_json("\"text\""));
        assert!(is_well_formed_json("null"));
        assert!(!is_well_formed_json(""));
        assert!(!is_well_formed_json("{"));
        assert!(!is_well_formed_json("{} trailing"));
        assert!(!is_well_formed_json("{'single': 'quotes'}"));
    }

    #[test]
    fn test_member() {
        let allowed: HashSet<String> = ["GENERIC", "country_code"]
            .into_iter()
            .map(String::from)
            .collect();
        assert!(is_member(Some("generic"), &allowed));
        assert!(is_member(Some("Country_Code"), &allowed));
        assert!(!is_member(Some("local"), &allowed));
        assert!(!is_member(None, &allowed));
    }

    #[test]
    fn test_list_without_nulls() {
        assert!(has_no_null_and_nonempty(&[Some(1), Some(2)]));
        assert!(!has_no_null_and_nonempty(&[Some(1), None]));
        assert!(!has_no_null_and_nonempty::<u8>(&[]));
    }
}
