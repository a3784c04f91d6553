//! Integration tests for container validation.

use failfast::{Config, ConfigError, Runner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Shipment {
    reference: String,
    parcels: Vec<Option<u32>>,
    labels: Vec<Option<u32>>,
}

fn shipment(reference: &str, parcels: usize, labels: usize) -> Shipment {
    Shipment {
        reference: reference.to_string(),
        parcels: (0..parcels as u32).map(Some).collect(),
        labels: (0..labels as u32).map(Some).collect(),
    }
}

fn runner() -> Runner<&'static str> {
    Runner::new("null shipment", |_| "rule error")
}

#[test]
fn test_size_bound_failure_skips_container_rules() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let config = Config::container(|s: &Shipment| s.parcels.len())
        .batch_size_range(1..=2, "no parcels", "too many parcels")
        .unwrap()
        .check(move |_: &Shipment| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("container rule")
        });

    assert_eq!(
        runner().validate_container(&shipment("S1", 3, 0), &config),
        Some("too many parcels")
    );
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[test]
fn test_bounds_are_inclusive() {
    let config = Config::container(|s: &Shipment| s.parcels.len())
        .min_batch_size(1, "no parcels")
        .max_batch_size(2, "too many parcels");

    assert_eq!(runner().validate_container(&shipment("S", 0, 0), &config), Some("no parcels"));
    assert_eq!(runner().validate_container(&shipment("S", 1, 0), &config), None);
    assert_eq!(runner().validate_container(&shipment("S", 2, 0), &config), None);
}

#[test]
fn test_bounds_apply_to_every_batch() {
    let config = Config::container(|s: &Shipment| s.parcels.len())
        .and_batch(|s: &Shipment| s.labels.len())
        .min_batch_size(1, "empty batch");

    assert_eq!(runner().validate_container(&shipment("S", 2, 0), &config), Some("empty batch"));
    assert_eq!(runner().validate_container(&shipment("S", 2, 1), &config), None);
}

#[test]
fn test_container_rules_run_when_sizes_pass() {
    let config = Config::container(|s: &Shipment| s.parcels.len())
        .max_batch_size(5, "too many parcels")
        .with_rules(
            Config::rules::<Shipment, &str>()
                .check(|s: &Shipment| s.reference.is_empty().then_some("no reference")),
        );

    assert_eq!(runner().validate_container(&shipment("", 1, 0), &config), Some("no reference"));
    assert_eq!(runner().validate_container(&shipment("S9", 1, 0), &config), None);
}

#[test]
fn test_inverted_range_is_rejected() {
    #[allow(clippy::reversed_empty_ranges)]
    let result = Config::container(|s: &Shipment| s.parcels.len())
        .batch_size_range(3..=1, "too few", "too many");

    match result {
        Err(error) => assert_eq!(error, ConfigError::InvertedRange { min: 3, max: 1 }),
        Ok(_) => panic!("Expected inverted range to be rejected"),
    }
}

#[test]
fn test_unbounded_container_without_rules_is_valid() {
    let config = Config::container(|s: &Shipment| s.parcels.len());
    assert_eq!(runner().validate_container(&shipment("", 100, 0), &config), None);
}

#[test]
fn test_panicking_batch_size_accessor_is_mapped() {
    let config = Config::container(|s: &Shipment| -> usize {
        if s.reference.is_empty() {
            panic!("no parcels recorded")
        }
        s.parcels.len()
    })
    .max_batch_size(2, "too many parcels");

    assert_eq!(
        runner().validate_container(&shipment("", 1, 0), &config),
        Some("rule error")
    );
    assert_eq!(
        runner().validate_container(&shipment("S", 1, 0), &config),
        None
    );
}
