//! Property-based tests for the lock search.
//!
//! These use proptest to check that for arbitrary short secrets:
//! - the minimal search recovers exactly the secret
//! - fixed-length search only finds it at the secret's own length
//! - the number of lock queries matches the secret's position in the order
//! - panics inside a lock surface as errors when wrapped

use lockpick_core::{
    Alphabet, CatchUnwindLock, Combination, CountingLock, LockError, SearchConfig, Searcher,
    SecretLock, find_minimal, find_of_length, lock_fn,
};
use proptest::prelude::*;

// Secrets of length 1 or 2 keep a full search within 65_792 queries.
fn secret_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=2)
}

fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
    prop_oneof![Just(Alphabet::Unsigned), Just(Alphabet::Signed)]
}

// Index of `key` in odometer order, first position most significant.
fn rank(alphabet: Alphabet, key: &[u8]) -> u64 {
    key.iter()
        .fold(0u64, |acc, &byte| acc * 256 + alphabet.index_of(byte) as u64)
}

#[test]
fn prop_minimal_search_recovers_secret() {
    proptest!(ProptestConfig::with_cases(32), |(secret in secret_strategy())| {
        let found = find_minimal(|key| key == secret.as_slice());
        prop_assert_eq!(found, Some(Combination::new(secret.clone())));
    });
}

#[test]
fn prop_fixed_length_search_only_matches_secret_length() {
    proptest!(ProptestConfig::with_cases(16), |(secret in secret_strategy())| {
        let opens = |key: &[u8]| key == secret.as_slice();
        for len in 0..=2usize {
            let found = find_of_length(opens, len);
            if len == secret.len() {
                prop_assert_eq!(found, Some(Combination::new(secret.clone())));
            } else {
                prop_assert_eq!(found, None, "length {} must not match", len);
            }
        }
    });
}

#[test]
fn prop_attempts_match_position_in_order() {
    proptest!(ProptestConfig::with_cases(32), |(
        secret in secret_strategy(),
        alphabet in alphabet_strategy()
    )| {
        let mut lock = CountingLock::new(SecretLock::new(secret.clone()));
        let mut searcher = Searcher::new(SearchConfig { alphabet, ..SearchConfig::default() });

        let found = searcher.find_minimal(&mut lock).expect("infallible lock");
        prop_assert_eq!(found, Some(Combination::new(secret.clone())));

        // Every shorter length is exhausted before the secret's own length starts.
        let shorter: u64 = (1..secret.len() as u32).map(|d| 256u64.pow(d)).sum();
        let expected = shorter + rank(alphabet, &secret) + 1;
        prop_assert_eq!(lock.attempts(), expected);
        prop_assert_eq!(searcher.stats().attempts, expected);
        prop_assert_eq!(searcher.stats().deepest, secret.len());
    });
}

#[test]
fn prop_queries_are_strictly_increasing_in_order() {
    proptest!(ProptestConfig::with_cases(8), |(alphabet in alphabet_strategy(), target in any::<u8>())| {
        let mut lock = CountingLock::recording(lock_fn(|key: &[u8]| key.len() == 2 && key[1] == target));
        let mut searcher = Searcher::new(SearchConfig { alphabet, max_depth: 2 });
        searcher.find_minimal(&mut lock).expect("infallible lock");

        let history = lock.history();
        for pair in history.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.len() < b.len()
                    || (a.len() == b.len() && rank(alphabet, a.as_bytes()) + 1 == rank(alphabet, b.as_bytes())),
                "{} should come right before {}", a, b
            );
        }
    });
}

#[test]
fn prop_panicking_lock_surfaces_as_error() {
    proptest!(ProptestConfig::with_cases(8), |(trigger in any::<u8>())| {
        let lock = CatchUnwindLock::new(lock_fn(move |key: &[u8]| {
            if key == [trigger] {
                panic!("jammed at {trigger}");
            }
            false
        }));
        let result = Searcher::default().find_minimal(lock);
        prop_assert_eq!(result, Err(LockError::Panicked(format!("jammed at {trigger}"))));
    });
}
