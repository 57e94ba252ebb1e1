/// Matches values against an ordered list of regular expressions.
///
/// Every pattern must match the whole value; the first matching pattern wins.
///
/// # Examples
/// ```
/// use domain_validator::validation::pattern::RegexValidator;
///
/// let validator = RegexValidator::new(r"(\w+)@(\w+)").unwrap();
/// assert_eq!(validator.validate("user@host").as_deref(), Some("userhost"));
/// ```
pub mod pattern;

/// Unicode to ASCII (punycode) conversion of domain names.
pub mod idn;

/// IANA top-level domain tables and the override registry.
///
/// Overrides published to the process-wide registry are frozen as soon as the
/// first shared validator is acquired.
///
/// # Examples
/// ```
/// use domain_validator::validation::tld::{TldCategory, base_entries};
///
/// assert!(base_entries(TldCategory::Infrastructure).contains(&"arpa".to_string()));
/// ```
pub mod tld;

/// Validates domain names against RFC 2396 / RFC 1123 syntax and the IANA
/// top-level domain tables.
///
/// # Examples
/// ```
/// use domain_validator::validation::domain::DomainValidator;
///
/// assert!(DomainValidator::instance(false).is_valid("example.com"));
/// assert!(!DomainValidator::instance(false).is_valid("-example.com"));
/// ```
pub mod domain;

/// Validates email addresses: user part syntax, domain names and bracketed
/// IP address literals.
///
/// # Examples
/// ```
/// use domain_validator::validation::email::EmailValidator;
///
/// assert!(EmailValidator::instance(false, false).is_valid("user@example.com"));
/// assert!(!EmailValidator::instance(false, false).is_valid("user@example.com."));
/// ```
pub mod email;

/// IP address literal validation used for `user@[address]` domains.
pub mod inet;

/// JSON well-formedness, case-insensitive membership and null-free list checks.
pub mod constraints;
