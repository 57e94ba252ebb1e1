//! IANA top-level domain tables and the application override registry.
//!
//! The compiled-in tables live in [`data`]. Applications may add ("plus") or
//! remove ("minus") generic, country code and local TLDs. Overrides published
//! through the process-wide [`registry`] can only change until the first shared
//! validator instance is acquired; after that the registry is locked for good.

use crate::error::ValidatorError;
use parking_lot::Mutex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

pub mod data;

/// Category a top-level domain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TldCategory {
    Generic,
    CountryCode,
    Infrastructure,
    Local,
}

impl TldCategory {
    pub const ALL: [TldCategory; 4] = [
        TldCategory::Infrastructure,
        TldCategory::Generic,
        TldCategory::CountryCode,
        TldCategory::Local,
    ];

    /// The compiled-in, sorted table for this category.
    pub fn base_entries(self) -> &'static [&'static str] {
        match self {
            TldCategory::Generic => data::GENERIC_TLDS,
            TldCategory::CountryCode => data::COUNTRY_CODE_TLDS,
            TldCategory::Infrastructure => data::INFRASTRUCTURE_TLDS,
            TldCategory::Local => data::LOCAL_TLDS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TldCategory::Generic => "GENERIC",
            TldCategory::CountryCode => "COUNTRY_CODE",
            TldCategory::Infrastructure => "INFRASTRUCTURE",
            TldCategory::Local => "LOCAL",
        }
    }
}

impl fmt::Display for TldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one of the TLD tables, either an override or a compiled-in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TldTable {
    GenericPlus,
    GenericMinus,
    CountryCodePlus,
    CountryCodeMinus,
    LocalPlus,
    LocalMinus,
    GenericReadOnly,
    CountryCodeReadOnly,
    InfrastructureReadOnly,
    LocalReadOnly,
}

impl TldTable {
    pub const ALL: [TldTable; 10] = [
        TldTable::GenericPlus,
        TldTable::GenericMinus,
        TldTable::CountryCodePlus,
        TldTable::CountryCodeMinus,
        TldTable::LocalPlus,
        TldTable::LocalMinus,
        TldTable::GenericReadOnly,
        TldTable::CountryCodeReadOnly,
        TldTable::InfrastructureReadOnly,
        TldTable::LocalReadOnly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TldTable::GenericPlus => "GENERIC_PLUS",
            TldTable::GenericMinus => "GENERIC_MINUS",
            TldTable::CountryCodePlus => "COUNTRY_CODE_PLUS",
            TldTable::CountryCodeMinus => "COUNTRY_CODE_MINUS",
            TldTable::LocalPlus => "LOCAL_PLUS",
            TldTable::LocalMinus => "LOCAL_MINUS",
            TldTable::GenericReadOnly => "GENERIC_RO",
            TldTable::CountryCodeReadOnly => "COUNTRY_CODE_RO",
            TldTable::InfrastructureReadOnly => "INFRASTRUCTURE_RO",
            TldTable::LocalReadOnly => "LOCAL_RO",
        }
    }

    pub fn category(self) -> TldCategory {
        match self {
            TldTable::GenericPlus | TldTable::GenericMinus | TldTable::GenericReadOnly => {
                TldCategory::Generic
            }
            TldTable::CountryCodePlus
            | TldTable::CountryCodeMinus
            | TldTable::CountryCodeReadOnly => TldCategory::CountryCode,
            TldTable::LocalPlus | TldTable::LocalMinus | TldTable::LocalReadOnly => {
                TldCategory::Local
            }
            TldTable::InfrastructureReadOnly => TldCategory::Infrastructure,
        }
    }

    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            TldTable::GenericReadOnly
                | TldTable::CountryCodeReadOnly
                | TldTable::InfrastructureReadOnly
                | TldTable::LocalReadOnly
        )
    }
}

impl fmt::Display for TldTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TldTable {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TldTable::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidatorError::UnknownTable(s.to_string()))
    }
}

/// A lower-cased set of TLD labels.
///
/// Entries are kept sorted by byte value so lookups can use binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TldSet(Vec<String>);

impl TldSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_lowercase())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        Self(labels)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.binary_search_by(|entry| entry.as_str().cmp(key)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Override for one table, used when building a validator with its own overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideItem {
    pub table: TldTable,
    pub values: Vec<String>,
}

impl OverrideItem {
    pub fn new<I, S>(table: TldTable, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable set of the six override tables a validator classifies with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    generic_plus: TldSet,
    generic_minus: TldSet,
    country_code_plus: TldSet,
    country_code_minus: TldSet,
    local_plus: TldSet,
    local_minus: TldSet,
}

impl Overrides {
    /// Returns the override table, or an error for the compiled-in tables.
    pub fn get(&self, table: TldTable) -> Result<&TldSet, ValidatorError> {
        match table {
            TldTable::GenericPlus => Ok(&self.generic_plus),
            TldTable::GenericMinus => Ok(&self.generic_minus),
            TldTable::CountryCodePlus => Ok(&self.country_code_plus),
            TldTable::CountryCodeMinus => Ok(&self.country_code_minus),
            TldTable::LocalPlus => Ok(&self.local_plus),
            TldTable::LocalMinus => Ok(&self.local_minus),
            read_only => Err(ValidatorError::ReadOnlyCategory(read_only)),
        }
    }

    /// Replaces one override table; the labels are lower-cased and sorted first.
    pub fn set<I, S>(&mut self, table: TldTable, labels: I) -> Result<(), ValidatorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slot = match table {
            TldTable::GenericPlus => &mut self.generic_plus,
            TldTable::GenericMinus => &mut self.generic_minus,
            TldTable::CountryCodePlus => &mut self.country_code_plus,
            TldTable::CountryCodeMinus => &mut self.country_code_minus,
            TldTable::LocalPlus => &mut self.local_plus,
            TldTable::LocalMinus => &mut self.local_minus,
            read_only => return Err(ValidatorError::ReadOnlyCategory(read_only)),
        };
        *slot = TldSet::new(labels);
        Ok(())
    }

    /// Applies explicit items on top of `self`; later items win.
    pub fn with_items(mut self, items: &[OverrideItem]) -> Result<Self, ValidatorError> {
        for item in items {
            self.set(item.table, &item.values)?;
        }
        Ok(self)
    }

    /// Membership test for an already normalised key.
    ///
    /// Minus entries take precedence over both the base table and plus entries.
    /// Infrastructure TLDs have no overrides.
    pub fn contains(&self, category: TldCategory, key: &str) -> bool {
        let in_base = category.base_entries().binary_search(&key).is_ok();
        let (plus, minus) = match category {
            TldCategory::Infrastructure => return in_base,
            TldCategory::Generic => (&self.generic_plus, &self.generic_minus),
            TldCategory::CountryCode => (&self.country_code_plus, &self.country_code_minus),
            TldCategory::Local => (&self.local_plus, &self.local_minus),
        };
        (in_base || plus.contains(key)) && !minus.contains(key)
    }
}

/// Holds the application's TLD overrides and the one-way lock guarding them.
#[derive(Debug, Default)]
pub struct TldRegistry {
    overrides: Mutex<Overrides>,
    locked: AtomicBool,
}

impl TldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an override table.
    ///
    /// # Errors
    /// - [`ValidatorError::LockedRegistry`] once [`TldRegistry::lock`] has been called
    /// - [`ValidatorError::ReadOnlyCategory`] for compiled-in tables
    ///
    /// # Examples
    /// ```
    /// use domain_validator::validation::tld::{TldRegistry, TldTable};
    ///
    /// let registry = TldRegistry::new();
    /// registry.update_override(TldTable::GenericPlus, ["Internal"]).unwrap();
    /// assert_eq!(registry.get_override(TldTable::GenericPlus).unwrap(), vec!["internal"]);
    ///
    /// registry.lock();
    /// assert!(registry.update_override(TldTable::GenericPlus, ["other"]).is_err());
    /// ```
    pub fn update_override<I, S>(&self, table: TldTable, labels: I) -> Result<(), ValidatorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = self.overrides.lock();
        if self.locked.load(Ordering::Acquire) {
            warn!(table = %table, "rejected TLD override update: registry is locked");
            return Err(ValidatorError::LockedRegistry);
        }
        overrides.set(table, labels)?;
        info!(
            table = %table,
            entries = overrides.get(table).map(TldSet::len).unwrap_or_default(),
            "published TLD override"
        );
        Ok(())
    }

    /// Returns a copy of an override table.
    pub fn get_override(&self, table: TldTable) -> Result<Vec<String>, ValidatorError> {
        self.overrides.lock().get(table).map(TldSet::to_vec)
    }

    /// Returns a copy of any table, compiled-in ones included.
    pub fn entries(&self, table: TldTable) -> Vec<String> {
        if table.is_read_only() {
            return base_entries(table.category());
        }
        self.get_override(table).unwrap_or_default()
    }

    /// Copy of the current overrides, without locking the registry.
    pub fn snapshot(&self) -> Overrides {
        self.overrides.lock().clone()
    }

    /// Locks the registry for good and returns the overrides in force.
    pub fn lock(&self) -> Overrides {
        let overrides = self.overrides.lock();
        if !self.locked.swap(true, Ordering::AcqRel) {
            info!("TLD registry locked; overrides can no longer change");
        }
        overrides.clone()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

static REGISTRY: LazyLock<TldRegistry> = LazyLock::new(TldRegistry::new);

/// The process-wide registry backing the shared validator instances.
pub fn registry() -> &'static TldRegistry {
    &REGISTRY
}

/// Returns a copy of a compiled-in table.
pub fn base_entries(category: TldCategory) -> Vec<String> {
    category
        .base_entries()
        .iter()
        .map(|tld| tld.to_string())
        .collect()
}
