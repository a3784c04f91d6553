//! Integration tests for batch-of-batch validation.

use failfast::{Config, NestedAnyFailure, NestedConfig, NestedFailure, Runner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stillwater::Validation;

struct Crate {
    id: u32,
    sealed: bool,
    bottles: Vec<Option<u32>>,
}

fn crate_of(id: u32, sealed: bool, bottles: &[u32]) -> Option<Crate> {
    Some(Crate {
        id,
        sealed,
        bottles: bottles.iter().copied().map(Some).collect(),
    })
}

fn runner() -> Runner<&'static str> {
    Runner::new("missing", |_| "rule error")
}

/// Bottles are numbered; bottle 0 is broken. Crates hold at most three bottles.
fn config(member_reads: Arc<AtomicUsize>) -> NestedConfig<Crate, u32, &'static str> {
    Config::nested(
        Config::container(|c: &Crate| c.bottles.len())
            .batch_size_range(1..=3, "empty crate", "overfull crate")
            .unwrap()
            .check(|c: &Crate| (!c.sealed).then_some("unsealed crate")),
        Config::members(
            move |c: &Crate| {
                member_reads.fetch_add(1, Ordering::SeqCst);
                c.bottles.as_slice()
            },
            Config::batch(
                Config::rules::<u32, &str>().check(|b: &u32| (*b == 0).then_some("broken bottle")),
            )
            .unique_by(|b: &u32| *b, "duplicate bottle"),
        ),
    )
    .unique_by(|c: &Crate| c.id, "duplicate crate")
}

#[test]
fn test_any_returns_container_failure_without_reading_members() {
    let reads = Arc::new(AtomicUsize::new(0));
    let config = config(Arc::clone(&reads));
    let crates = [crate_of(1, true, &[1, 2]), crate_of(2, false, &[0])];

    let found = runner()
        .validate_any_nested_with_pair(&crates, &config, |c| c.map(|c| c.id), |b| b.copied())
        .unwrap();

    assert_eq!(
        found,
        NestedAnyFailure::Container {
            index: 1,
            pair: Some(2),
            failure: "unsealed crate",
        }
    );
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_any_returns_first_member_failure() {
    let reads = Arc::new(AtomicUsize::new(0));
    let config = config(Arc::clone(&reads));
    let crates = [
        crate_of(1, true, &[1, 2]),
        crate_of(2, true, &[3, 0]),
        crate_of(3, true, &[0]),
    ];

    let found = runner()
        .validate_any_nested_with_pair(&crates, &config, |c| c.map(|c| c.id), |b| b.copied())
        .unwrap();

    assert!(!found.is_container_level());
    assert_eq!(found.to_string(), "[1][1]: broken bottle");
    // The third crate's members are never read.
    assert_eq!(reads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_any_nested_reports_null_container() {
    let config = config(Arc::new(AtomicUsize::new(0)));
    let crates = [crate_of(1, true, &[0]), None];

    assert_eq!(runner().validate_any_nested(&crates, &config), Some("missing"));
}

#[test]
fn test_each_aggregates_member_failures() {
    let config = config(Arc::new(AtomicUsize::new(0)));
    let crates = [crate_of(1, true, &[1, 0, 3])];

    let outcomes = runner().validate_each_nested(&crates, &config);

    match outcomes.into_iter().next() {
        Some(Validation::Failure(NestedFailure::Members(failures))) => {
            assert_eq!(failures.into_vec(), vec!["broken bottle"]);
        }
        _ => panic!("Expected member failures"),
    }
}

#[test]
fn test_each_one_outcome_per_container() {
    let reads = Arc::new(AtomicUsize::new(0));
    let config = config(Arc::clone(&reads));
    let crates = [
        crate_of(1, true, &[1, 2]),
        None,
        crate_of(1, true, &[3]),
        crate_of(4, true, &[5, 6, 7, 8]),
        crate_of(5, true, &[9, 9]),
    ];

    let outcomes = runner().validate_each_nested(&crates, &config);
    assert_eq!(outcomes.len(), 5);

    assert!(outcomes[0].is_success());
    assert!(matches!(outcomes[1], Validation::Failure(NestedFailure::Container("missing"))));
    assert!(matches!(
        outcomes[2],
        Validation::Failure(NestedFailure::Container("duplicate crate"))
    ));
    assert!(matches!(
        outcomes[3],
        Validation::Failure(NestedFailure::Container("overfull crate"))
    ));
    match &outcomes[4] {
        Validation::Failure(NestedFailure::Members(failures)) => {
            assert_eq!(failures.clone().into_vec(), vec!["duplicate bottle"]);
        }
        _ => panic!("Expected member failures"),
    }

    // Only the two containers that passed had their members read.
    assert_eq!(reads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_size_bound_takes_precedence_over_member_failures() {
    let config = config(Arc::new(AtomicUsize::new(0)));
    let crates = [crate_of(1, true, &[0, 0, 0, 0])];

    let outcomes = runner().validate_each_nested(&crates, &config);
    assert!(matches!(
        outcomes[0],
        Validation::Failure(NestedFailure::Container("overfull crate"))
    ));
    assert_eq!(runner().validate_any_nested(&crates, &config), Some("overfull crate"));
}

fn fragile_config() -> NestedConfig<Crate, u32, &'static str> {
    Config::nested(
        Config::container(|c: &Crate| c.bottles.len()),
        Config::members(
            |c: &Crate| {
                assert!(c.id != 0, "crate not loaded");
                c.bottles.as_slice()
            },
            Config::batch(Config::rules::<u32, &str>()),
        ),
    )
}

#[test]
fn test_panicking_member_accessor_fails_its_container() {
    let crates = [crate_of(1, true, &[1]), crate_of(0, true, &[2])];

    let outcomes = runner().validate_each_nested(&crates, &fragile_config());
    assert!(outcomes[0].is_success());
    assert!(matches!(
        outcomes[1],
        Validation::Failure(NestedFailure::Container("rule error"))
    ));

    let config = fragile_config();
    let found = runner()
        .validate_any_nested_with_pair(&crates, &config, |c| c.map(|c| c.id), |b| b.copied())
        .unwrap();
    assert_eq!(
        found,
        NestedAnyFailure::Container {
            index: 1,
            pair: Some(0),
            failure: "rule error",
        }
    );
}
