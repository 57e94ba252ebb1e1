use crate::error::ValidatorError;
use crate::validation::domain::DomainValidator;
use crate::validation::inet::{InetAddressValidator, IpLiteralValidator};
use crate::validation::pattern::RegexValidator;
use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};
use tracing::{debug, trace};

/// Maximum length of the user part (RFC 5321 section 4.5.3.1.1), in UTF-16
/// code units.
pub const MAX_USERNAME_LENGTH: usize = 64;

// Control characters plus the RFC 822 specials, apostrophe included
const SPECIAL_CHARS: &str = r#"\x00-\x1F\x7F\(\)<>@,;:'\\"\.\[\]"#;
// ASCII whitespace; controls other than space are already specials
const WHITESPACE: &str = r" \t\n\x0B\x0C\r";
const QUOTED_USER: &str = r#"("(\\"|[^"])*")"#;

static USER_REGEX: LazyLock<RegexValidator> = LazyLock::new(|| {
    let valid_chars = format!(r"(\\.)|[^{}{}]", WHITESPACE, SPECIAL_CHARS);
    let word = format!("(({}|')+|{})", valid_chars, QUOTED_USER);
    RegexValidator::new(&format!(r"^{0}(\.{0})*$", word)).expect("user grammar compiles")
});

// Splits at the last '@'; the domain part may not contain whitespace
static EMAIL_REGEX: LazyLock<RegexValidator> = LazyLock::new(|| {
    let pattern = format!(r"^([^\n\r\x{{85}}\x{{2028}}\x{{2029}}]+)@([^{}]+)$", WHITESPACE);
    RegexValidator::new(&pattern).expect("email grammar compiles")
});

static IP_DOMAIN_REGEX: LazyLock<RegexValidator> =
    LazyLock::new(|| RegexValidator::new(r"^\[(.*)\]$").expect("IP literal grammar compiles"));

static SHARED: [OnceLock<Arc<EmailValidator>>; 4] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

/// Why an email address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRejection {
    /// Not of the form `user@domain`, or ends with a dot.
    InvalidSyntax,
    InvalidUser,
    InvalidDomain,
    /// Bracketed domain literal that is not an IP address.
    InvalidIpLiteral,
}

impl EmailRejection {
    pub fn code(self) -> &'static str {
        match self {
            EmailRejection::InvalidSyntax => "INVALID_SYNTAX",
            EmailRejection::InvalidUser => "INVALID_USER",
            EmailRejection::InvalidDomain => "INVALID_DOMAIN",
            EmailRejection::InvalidIpLiteral => "INVALID_IP_LITERAL",
        }
    }
}

impl fmt::Display for EmailRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Email address validation based on RFC 822 syntax.
///
/// The user part is checked against a dot-separated word grammar, the domain
/// part either as a bracketed IP literal or as a domain name through a
/// [`DomainValidator`]. With `allow_tld`, a bare top-level domain such as
/// `user@com` is accepted too.
///
/// # Examples
/// ```
/// use domain_validator::validation::email::EmailValidator;
///
/// let validator = EmailValidator::instance(false, false);
/// assert!(validator.is_valid("jsmith@apache.org"));
/// assert!(validator.is_valid("\"joe@home\"@apache.org"));
/// assert!(validator.is_valid("jsmith@[192.168.2.1]"));
/// assert!(!validator.is_valid("jsmith@apache.org."));
/// assert!(!validator.is_valid("jsmith@localhost"));
/// ```
pub struct EmailValidator {
    allow_tld: bool,
    domain_validator: Arc<DomainValidator>,
    ip_validator: Arc<dyn IpLiteralValidator>,
}

impl EmailValidator {
    /// Returns the shared instance for the given flags, backed by the shared
    /// [`DomainValidator`] (which locks the TLD registry).
    pub fn instance(allow_local: bool, allow_tld: bool) -> Arc<EmailValidator> {
        let slot = &SHARED[usize::from(allow_local) * 2 + usize::from(allow_tld)];
        Arc::clone(slot.get_or_init(|| {
            debug!(allow_local, allow_tld, "initialised shared email validator");
            Arc::new(Self::from_parts(
                allow_tld,
                DomainValidator::instance(allow_local),
            ))
        }))
    }

    /// Builds a validator around an explicit domain validator.
    ///
    /// # Errors
    /// [`ValidatorError::ConfigMismatch`] if `domain_validator` does not agree
    /// with `allow_local`.
    pub fn with_domain_validator(
        allow_local: bool,
        allow_tld: bool,
        domain_validator: Arc<DomainValidator>,
    ) -> Result<EmailValidator, ValidatorError> {
        if domain_validator.is_allow_local() != allow_local {
            return Err(ValidatorError::ConfigMismatch {
                expected: allow_local,
                actual: domain_validator.is_allow_local(),
            });
        }
        Ok(Self::from_parts(allow_tld, domain_validator))
    }

    /// Replaces the validator used for bracketed IP literals.
    pub fn with_ip_validator(mut self, ip_validator: Arc<dyn IpLiteralValidator>) -> Self {
        self.ip_validator = ip_validator;
        self
    }

    fn from_parts(allow_tld: bool, domain_validator: Arc<DomainValidator>) -> Self {
        Self {
            allow_tld,
            domain_validator,
            ip_validator: Arc::new(InetAddressValidator),
        }
    }

    pub fn is_valid(&self, email: &str) -> bool {
        self.check(email).is_ok()
    }

    /// Like [`EmailValidator::is_valid`], reporting why an address was rejected.
    pub fn check(&self, email: &str) -> Result<(), EmailRejection> {
        if email.ends_with('.') {
            trace!(email, "email rejected: trailing dot");
            return Err(EmailRejection::InvalidSyntax);
        }

        let Some(groups) = EMAIL_REGEX.match_groups(email) else {
            trace!(email, "email rejected: invalid syntax");
            return Err(EmailRejection::InvalidSyntax);
        };
        let (user, domain) = match groups.as_slice() {
            [Some(user), Some(domain)] => (*user, *domain),
            _ => return Err(EmailRejection::InvalidSyntax),
        };

        if !self.is_valid_user(user) {
            trace!(email, "email rejected: invalid user part");
            return Err(EmailRejection::InvalidUser);
        }
        self.check_domain(domain).inspect_err(|reason| {
            trace!(email, %reason, "email rejected: invalid domain part");
        })
    }

    pub fn is_allow_tld(&self) -> bool {
        self.allow_tld
    }

    pub fn domain_validator(&self) -> &DomainValidator {
        &self.domain_validator
    }

    fn check_domain(&self, domain: &str) -> Result<(), EmailRejection> {
        if let Some(groups) = IP_DOMAIN_REGEX.match_groups(domain) {
            let literal = groups.first().copied().flatten().unwrap_or_default();
            return if self.ip_validator.is_valid_ip(literal) {
                Ok(())
            } else {
                Err(EmailRejection::InvalidIpLiteral)
            };
        }

        let valid = self.domain_validator.is_valid(domain)
            || (self.allow_tld
                && !domain.starts_with('.')
                && self.domain_validator.is_valid_tld(domain));
        if valid {
            Ok(())
        } else {
            Err(EmailRejection::InvalidDomain)
        }
    }

    fn is_valid_user(&self, user: &str) -> bool {
        user.encode_utf16().count() <= MAX_USERNAME_LENGTH && USER_REGEX.is_valid(user)
    }
}

impl fmt::Debug for EmailValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailValidator")
            .field("allow_tld", &self.allow_tld)
            .field("domain_validator", &self.domain_validator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::tld::TldRegistry;

    fn domain_validator(allow_local: bool) -> Arc<DomainValidator> {
        Arc::new(
            DomainValidator::builder()
                .allow_local(allow_local)
                .build_with(&TldRegistry::new())
                .unwrap(),
        )
    }

    fn validator() -> EmailValidator {
        EmailValidator::with_domain_validator(false, false, domain_validator(false)).unwrap()
    }

    struct RejectAll;

    impl IpLiteralValidator for RejectAll {
        fn is_valid_ip(&self, _text: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_valid_emails() {
        let validator = validator();
        assert!(validator.is_valid("foo@bar.com"));
        assert!(validator.is_valid("jsmith@apache.org"));
        assert!(validator.is_valid("jsmith@apache.com"));
        assert!(validator.is_valid("jsmith@apache.net"));
        assert!(validator.is_valid("jsmith@apache.info"));
        assert!(validator.is_valid("andy.noble@data-workshop.com"));
        assert!(validator.is_valid("Abc.Def@Example.Com"), "case-insensitive domain");
    }

    #[test]
    fn test_trailing_dot_is_rejected_early() {
        let validator = validator();
        assert_eq!(validator.check("foo@bar.com."), Err(EmailRejection::InvalidSyntax));
        assert!(!validator.is_valid("someone@yahoo.com.."));
        assert!(!validator.is_valid("jsmith@apache."));
    }

    #[test]
    fn test_structure() {
        let validator = validator();
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("missing.example.com"));
        assert!(!validator.is_valid("missing@"));
        assert!(!validator.is_valid("@missing.com"));
        assert!(!validator.is_valid("joeblow@apa che.org"), "space in domain");
        assert!(!validator.is_valid("joe@apache.org\n"), "trailing line break");
        assert!(!validator.is_valid("joe\r\n@apache.org"));
    }

    #[test]
    fn test_user_part_characters() {
        let validator = validator();
        for user in [
            "joe1blow", "joe$blow", "joe-", "joe_", "joe+", "joe!", "joe*", "joe'", "joe%45",
            "joe?", "joe&", "joe=", "+joe", "!joe", "*joe", "'joe", "%joe", "?joe", "&joe",
            "=joe", "andy.o'reilly", "joe\\@x",
        ] {
            let email = format!("{}@apache.org", user);
            assert!(validator.is_valid(&email), "{} should be valid", email);
        }

        for user in [
            "joe(", "joe)", "joe,", "joe;", "joe<", "joe>", "joe[", "joe]", "joe:", "jo e",
            "joe.", ".joe", "joe..ok", "jo\u{0000}e", "joe\"",
        ] {
            let email = format!("{}@apache.org", user);
            assert!(!validator.is_valid(&email), "{:?} should be invalid", email);
        }
    }

    #[test]
    fn test_quoted_user_part() {
        let validator = validator();
        assert!(validator.is_valid("\"joe\"@apache.org"));
        assert!(validator.is_valid("\"joe.\"@apache.org"));
        assert!(validator.is_valid("\"joe+\"@apache.org"));
        assert!(validator.is_valid("\"joe@\"@apache.org"), "splits at the last @");
        assert!(validator.is_valid("\"joe!@\"@apache.org"));
        assert!(validator.is_valid("\"joe blow\"@apache.org"));
        assert!(validator.is_valid("\"joe\\\"blow\"@apache.org"), "escaped quote");
        assert!(validator.is_valid("\"john\".doe@apache.org"));
        assert!(!validator.is_valid("\"unclosed@apache.org"));
    }

    #[test]
    fn test_user_part_length() {
        let validator = validator();
        let max_user = "a".repeat(MAX_USERNAME_LENGTH);
        assert!(validator.is_valid(&format!("{}@apache.org", max_user)));
        assert_eq!(
            validator.check(&format!("a{}@apache.org", max_user)),
            Err(EmailRejection::InvalidUser)
        );
    }

    #[test]
    fn test_user_part_length_counts_characters() {
        let validator = validator();
        assert!(validator.is_valid(&format!("{}@apache.org", "ü".repeat(33))));
        assert!(validator.is_valid(&format!("{}@apache.org", "ü".repeat(MAX_USERNAME_LENGTH))));
        assert_eq!(
            validator.check(&format!("{}@apache.org", "ü".repeat(MAX_USERNAME_LENGTH + 1))),
            Err(EmailRejection::InvalidUser)
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let validator = Arc::new(validator());
        std::thread::scope(|scope| {
            for n in 0..8 {
                let validator = Arc::clone(&validator);
                scope.spawn(move || {
                    for i in 0..50 {
                        let user = format!("user{n}.{i}");
                        assert!(validator.is_valid(&format!("{user}@apache.org")));
                        assert!(validator.is_valid(&format!("{user}@[10.0.0.{n}]")));
                        assert!(!validator.is_valid(&format!("{user}@apache.rog")));
                    }
                });
            }
        });
    }

    #[test]
    fn test_ip_literals() {
        let validator = validator();
        assert!(validator.is_valid("foo@[192.168.1.1]"));
        assert!(validator.is_valid("foo@[2001:db8::1]"));
        assert_eq!(
            validator.check("foo@[iii.168.1.1]"),
            Err(EmailRejection::InvalidIpLiteral)
        );
        assert!(!validator.is_valid("foo@[192.168.1.256]"));
        assert!(!validator.is_valid("foo@[192.168.1.1"), "unbalanced bracket");

        let strict = validator.with_ip_validator(Arc::new(RejectAll));
        assert!(!strict.is_valid("foo@[192.168.1.1]"), "collaborator decides");
        assert!(strict.is_valid("foo@apache.org"));
    }

    #[test]
    fn test_domain_part() {
        let validator = validator();
        assert_eq!(validator.check("jsmith@apache.c"), Err(EmailRejection::InvalidDomain));
        assert!(!validator.is_valid("jsmith@-apache.org"));
        assert!(!validator.is_valid("jsmith@apache..org"));
        assert!(validator.is_valid("someone@xn--d1abbgf6aiiy.xn--p1ai"));
        assert!(validator.is_valid("someone@президент.рф"));
    }

    #[test]
    fn test_allow_local() {
        let plain = validator();
        let local =
            EmailValidator::with_domain_validator(true, false, domain_validator(true)).unwrap();

        assert!(!plain.is_valid("joe@localhost"));
        assert!(!plain.is_valid("joe@localhost.localdomain"));
        assert!(local.is_valid("joe@localhost"));
        assert!(local.is_valid("joe@localhost.localdomain"));
        assert!(local.is_valid("joe@hostname"));
    }

    #[test]
    fn test_allow_tld() {
        let plain = validator();
        let with_tld =
            EmailValidator::with_domain_validator(false, true, domain_validator(false)).unwrap();

        assert!(!plain.is_valid("someone@com"));
        assert!(with_tld.is_valid("someone@com"));
        assert!(with_tld.is_valid("someone@COM"));
        assert!(!with_tld.is_valid("someone@.com"), "leading dot is not a TLD");
        assert!(!with_tld.is_valid("someone@nope"));
        assert!(with_tld.is_allow_tld());
    }

    #[test]
    fn test_config_mismatch() {
        let result = EmailValidator::with_domain_validator(true, false, domain_validator(false));
        assert!(matches!(
            result,
            Err(ValidatorError::ConfigMismatch {
                expected: true,
                actual: false
            })
        ));
    }

    #[test]
    fn test_shared_instances() {
        let first = EmailValidator::instance(true, true);
        let second = EmailValidator::instance(true, true);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.domain_validator().is_allow_local());
        assert!(first.is_allow_tld());
        assert!(!EmailValidator::instance(false, true).domain_validator().is_allow_local());
    }
}
