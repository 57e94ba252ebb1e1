use crate::error::ValidatorError;
use crate::validation::idn::unicode_to_ascii;
use crate::validation::pattern::RegexValidator;
use crate::validation::tld::{self, OverrideItem, Overrides, TldCategory, TldRegistry, TldTable};
use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};
use tracing::{debug, trace};

/// Maximum length of a domain name once converted to ASCII.
pub const MAX_DOMAIN_LENGTH: usize = 253;

// RFC 2396: domainlabel = alphanum | alphanum *( alphanum | "-" ) alphanum
// Max 63 characters
const DOMAIN_LABEL_REGEX: &str = r"[[:alnum:]](?:[[:alnum:]-]{0,61}[[:alnum:]])?";

// RFC 2396: toplabel = alpha | alpha *( alphanum | "-" ) alphanum
// Max 63 characters
const TOP_LABEL_REGEX: &str = r"[[:alpha:]](?:[[:alnum:]-]{0,61}[[:alnum:]])?";

// RFC 2396: hostname = *( domainlabel "." ) toplabel [ "." ]
// At least one domain label is required so that the TLD can be captured;
// single labels are checked against DOMAIN_LABEL_REGEX instead.
// RFC 1123 section 2.1 allows hostnames to start with a digit.
static DOMAIN_REGEX: LazyLock<RegexValidator> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{}\.)+({})\.?$", DOMAIN_LABEL_REGEX, TOP_LABEL_REGEX);
    RegexValidator::new(&pattern).expect("domain name grammar compiles")
});

static HOSTNAME_REGEX: LazyLock<RegexValidator> = LazyLock::new(|| {
    RegexValidator::new(DOMAIN_LABEL_REGEX).expect("hostname grammar compiles")
});

static SHARED: [OnceLock<Arc<DomainValidator>>; 2] = [OnceLock::new(), OnceLock::new()];

/// Why a domain name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRejection {
    /// Longer than [`MAX_DOMAIN_LENGTH`] after ASCII conversion.
    TooLong,
    InvalidSyntax,
    /// Syntactically fine, but the top-level domain is not recognised.
    UnknownTld,
}

impl DomainRejection {
    pub fn code(self) -> &'static str {
        match self {
            DomainRejection::TooLong => "TOO_LONG",
            DomainRejection::InvalidSyntax => "INVALID_SYNTAX",
            DomainRejection::UnknownTld => "UNKNOWN_TLD",
        }
    }
}

impl fmt::Display for DomainRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Domain name validation routines.
///
/// A domain is valid when it is syntactically a host name (RFC 2396 / RFC 1123)
/// whose rightmost label is a recognised top-level domain. Unicode input is
/// converted to punycode first. With `allow_local`, single-label host names and
/// local TLDs such as `localhost` are accepted as well.
///
/// Shared instances come from [`DomainValidator::instance`]; acquiring one locks
/// the process-wide TLD registry. Instances with their own overrides are built
/// with [`DomainValidator::builder`] and leave the registry untouched.
///
/// # Examples
/// ```
/// use domain_validator::validation::domain::DomainValidator;
///
/// let validator = DomainValidator::instance(false);
/// assert!(validator.is_valid("example.com"));
/// assert!(validator.is_valid("www.example.com."));
/// assert!(!validator.is_valid("example.invalid"));
/// assert!(!validator.is_valid("localhost"));
/// ```
#[derive(Debug, Clone)]
pub struct DomainValidator {
    allow_local: bool,
    overrides: Overrides,
}

impl DomainValidator {
    /// Returns the shared instance for the given `allow_local` flag.
    ///
    /// The first call for each flag builds the instance from the process-wide
    /// registry; every call locks the registry against further override updates.
    pub fn instance(allow_local: bool) -> Arc<DomainValidator> {
        let slot = &SHARED[usize::from(allow_local)];
        if let Some(validator) = slot.get() {
            return Arc::clone(validator);
        }

        let overrides = tld::registry().lock();
        Arc::clone(slot.get_or_init(|| {
            debug!(allow_local, "initialised shared domain validator");
            Arc::new(Self::from_parts(allow_local, overrides))
        }))
    }

    pub fn builder() -> DomainValidatorBuilder {
        DomainValidatorBuilder::default()
    }

    /// Builds an instance with explicit overrides on top of the current
    /// process-wide ones. The registry is not locked.
    pub fn with_overrides(
        allow_local: bool,
        items: &[OverrideItem],
    ) -> Result<DomainValidator, ValidatorError> {
        Self::builder().allow_local(allow_local).items(items.iter().cloned()).build()
    }

    fn from_parts(allow_local: bool, overrides: Overrides) -> Self {
        Self {
            allow_local,
            overrides,
        }
    }

    /// Returns true if `domain` parses as a domain name with a recognised
    /// top-level domain. The check is case-insensitive.
    pub fn is_valid(&self, domain: &str) -> bool {
        self.check(domain).is_ok()
    }

    /// Like [`DomainValidator::is_valid`], reporting why a domain was rejected.
    pub fn check(&self, domain: &str) -> Result<(), DomainRejection> {
        // Unicode is never shorter than punycode, so the ASCII form is what
        // gets measured. Input that fails to convert is left to the grammars.
        let ascii = unicode_to_ascii(domain);
        if ascii.len() > MAX_DOMAIN_LENGTH {
            trace!(domain, "domain rejected: too long");
            return Err(DomainRejection::TooLong);
        }

        if let Some(groups) = DOMAIN_REGEX.match_groups(&ascii) {
            let tld = groups.first().copied().flatten().unwrap_or_default();
            if self.is_valid_tld(tld) {
                return Ok(());
            }
            trace!(domain, tld, "domain rejected: unknown TLD");
            return Err(DomainRejection::UnknownTld);
        }

        if self.allow_local && HOSTNAME_REGEX.is_valid(&ascii) {
            return Ok(());
        }
        trace!(domain, "domain rejected: invalid syntax");
        Err(DomainRejection::InvalidSyntax)
    }

    /// Syntax-only check: a multi-label name or a single host label, whatever
    /// the TLD and regardless of `allow_local`.
    pub fn is_valid_domain_syntax(&self, domain: &str) -> bool {
        let ascii = unicode_to_ascii(domain);
        if ascii.len() > MAX_DOMAIN_LENGTH {
            return false;
        }
        DOMAIN_REGEX.is_valid(&ascii) || HOSTNAME_REGEX.is_valid(&ascii)
    }

    /// Returns true if `tld` is a recognised top-level domain.
    ///
    /// Local TLDs count only when local addresses are allowed. A leading dot
    /// is ignored and the check is case-insensitive.
    pub fn is_valid_tld(&self, tld: &str) -> bool {
        if self.allow_local && self.is_valid_local_tld(tld) {
            return true;
        }
        self.is_valid_infrastructure_tld(tld)
            || self.is_valid_generic_tld(tld)
            || self.is_valid_country_code_tld(tld)
    }

    pub fn is_valid_infrastructure_tld(&self, tld: &str) -> bool {
        self.contains(TldCategory::Infrastructure, tld)
    }

    pub fn is_valid_generic_tld(&self, tld: &str) -> bool {
        self.contains(TldCategory::Generic, tld)
    }

    pub fn is_valid_country_code_tld(&self, tld: &str) -> bool {
        self.contains(TldCategory::CountryCode, tld)
    }

    /// Returns true for widely used local TLDs (`localhost`, `localdomain`)
    /// and local overrides, whatever the `allow_local` setting.
    pub fn is_valid_local_tld(&self, tld: &str) -> bool {
        self.contains(TldCategory::Local, tld)
    }

    /// Every category recognising `tld`, in classification order.
    pub fn tld_categories(&self, tld: &str) -> Vec<TldCategory> {
        TldCategory::ALL
            .into_iter()
            .filter(|category| self.contains(*category, tld))
            .collect()
    }

    pub fn is_allow_local(&self) -> bool {
        self.allow_local
    }

    /// Returns a copy of one of this instance's override tables.
    pub fn overrides(&self, table: TldTable) -> Result<Vec<String>, ValidatorError> {
        self.overrides.get(table).map(tld::TldSet::to_vec)
    }

    fn contains(&self, category: TldCategory, tld: &str) -> bool {
        self.overrides.contains(category, &tld_key(tld))
    }
}

/// Normalises a TLD for lookup: ASCII form, lower case, one leading dot dropped.
fn tld_key(tld: &str) -> String {
    let key = unicode_to_ascii(tld).to_lowercase();
    match key.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => key,
    }
}

/// Builds a [`DomainValidator`] with its own override snapshot.
///
/// Tables without an explicit item fall back to the registry's current
/// overrides; later items for the same table replace earlier ones.
///
/// # Examples
/// ```
/// use domain_validator::validation::domain::DomainValidator;
/// use domain_validator::validation::tld::{OverrideItem, TldTable};
///
/// let validator = DomainValidator::builder()
///     .item(OverrideItem::new(TldTable::GenericPlus, ["corp"]))
///     .item(OverrideItem::new(TldTable::CountryCodeMinus, ["tv"]))
///     .build()
///     .unwrap();
/// assert!(validator.is_valid("intranet.corp"));
/// assert!(!validator.is_valid("example.tv"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainValidatorBuilder {
    allow_local: bool,
    items: Vec<OverrideItem>,
}

impl DomainValidatorBuilder {
    pub fn allow_local(mut self, allow_local: bool) -> Self {
        self.allow_local = allow_local;
        self
    }

    pub fn item(mut self, item: OverrideItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items<I: IntoIterator<Item = OverrideItem>>(mut self, items: I) -> Self {
        self.items.extend(items);
        self
    }

    /// Builds against the process-wide registry.
    ///
    /// # Errors
    /// [`ValidatorError::ReadOnlyCategory`] if an item names a compiled-in table.
    pub fn build(self) -> Result<DomainValidator, ValidatorError> {
        self.build_with(tld::registry())
    }

    pub fn build_with(self, registry: &TldRegistry) -> Result<DomainValidator, ValidatorError> {
        let overrides = registry.snapshot().with_items(&self.items)?;
        debug!(
            allow_local = self.allow_local,
            items = self.items.len(),
            "built domain validator with explicit overrides"
        );
        Ok(DomainValidator::from_parts(self.allow_local, overrides))
    }
}
