//! Lifecycle of the process-wide TLD registry.
//!
//! Kept in a single test: the registry lock is one-way and shared by every
//! test of this binary.

use domain_validator::error::ValidatorError;
use domain_validator::validation::domain::DomainValidator;
use domain_validator::validation::email::EmailValidator;
use domain_validator::validation::tld::{self, OverrideItem, TldTable};
use std::sync::Arc;

#[test]
fn registry_locks_on_first_shared_instance() {
    let registry = tld::registry();
    assert!(!registry.is_locked(), "registry must start unlocked");

    registry
        .update_override(TldTable::GenericPlus, ["corp", "Internal"])
        .unwrap();
    registry
        .update_override(TldTable::CountryCodeMinus, ["ch"])
        .unwrap();
    assert_eq!(
        registry.update_override(TldTable::LocalReadOnly, ["lan"]),
        Err(ValidatorError::ReadOnlyCategory(TldTable::LocalReadOnly))
    );

    // Explicit instances see the overrides without locking.
    let explicit = DomainValidator::with_overrides(false, &[]).unwrap();
    assert!(explicit.is_valid("intranet.corp"));
    assert!(!registry.is_locked());

    let shared = DomainValidator::instance(false);
    assert!(registry.is_locked());
    assert!(shared.is_valid("intranet.corp"));
    assert!(shared.is_valid("host.internal"));
    assert!(!shared.is_valid("example.ch"), "ch is overridden out");
    assert!(shared.is_valid("example.com"));

    assert_eq!(
        registry.update_override(TldTable::GenericPlus, ["other"]),
        Err(ValidatorError::LockedRegistry)
    );
    assert_eq!(
        registry.update_override(TldTable::CountryCodeMinus, Vec::<String>::new()),
        Err(ValidatorError::LockedRegistry)
    );

    // Values published before the lock stay in force.
    assert!(!shared.is_valid("example.ch"));
    assert_eq!(
        registry.get_override(TldTable::GenericPlus).unwrap(),
        vec!["corp", "internal"]
    );

    // Repeated acquisition hands out the same instance.
    assert!(Arc::ptr_eq(&shared, &DomainValidator::instance(false)));

    // Shared email validators sit on top of the shared domain validators.
    let email = EmailValidator::instance(false, false);
    assert!(std::ptr::eq(email.domain_validator(), Arc::as_ptr(&shared)));
    assert!(email.is_valid("someone@intranet.corp"));
    assert!(!email.is_valid("someone@example.ch"));
    assert!(Arc::ptr_eq(&email, &EmailValidator::instance(false, false)));

    let local = EmailValidator::instance(true, true);
    assert!(local.is_valid("root@localhost"));
    assert!(local.is_valid("someone@corp"));

    // Explicit overrides still work after the lock, without touching the registry.
    let explicit = DomainValidator::with_overrides(
        false,
        &[OverrideItem::new(TldTable::CountryCodeMinus, Vec::<String>::new())],
    )
    .unwrap();
    assert!(explicit.is_valid("example.ch"));
    assert!(explicit.is_valid("intranet.corp"));
    assert_eq!(
        registry.get_override(TldTable::CountryCodeMinus).unwrap(),
        vec!["ch"]
    );
}
