use crate::alphabet::Alphabet;
use crate::combination::Combination;
use crate::lock::{FnLock, Lock, TryFnLock};
use crate::odometer::Odometer;

/// Settings that shape a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest length [`Searcher::find_minimal`] will try. Once this length
    /// has been exhausted the driver reports "not found".
    pub max_depth: usize,
    /// Symbols each position runs through, and their order.
    pub alphabet: Alphabet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: usize::MAX,
            alphabet: Alphabet::default(),
        }
    }
}

/// Counters for the most recent top-level search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Lock queries made, including a failing one.
    pub attempts: u64,
    /// Rounds that ran through every candidate without a match.
    pub depths_exhausted: usize,
    /// Longest candidate length started.
    pub deepest: usize,
}

/// Exhaustive, smallest-length-first search against a [`Lock`].
///
/// Single-threaded and synchronous: each lock query completes before the
/// next candidate is built, and length `d + 1` is never started before
/// length `d` has been exhausted.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Tries every candidate of exactly `len` bytes, in odometer order,
    /// until one opens `lock`.
    ///
    /// `len == 0` tests the empty sequence once. Every query is made with a
    /// key of exactly `len` bytes.
    ///
    /// # Returns
    /// * `Ok(Some(key))` for the first key that opens the lock.
    /// * `Ok(None)` if all `256^len` candidates were rejected.
    /// * `Err(e)` as soon as the lock fails; no further keys are tried.
    pub fn find_of_length<L: Lock>(
        &mut self,
        mut lock: L,
        len: usize,
    ) -> Result<Option<Combination>, L::Error> {
        self.stats = SearchStats::default();
        self.search_round(&mut lock, len)
    }

    /// Iterative deepening: runs [`find_of_length`](Searcher::find_of_length)
    /// for lengths `1, 2, 3, ...` and returns the first match, which is
    /// therefore of minimal length.
    ///
    /// Returns `Ok(None)` once `max_depth` has been exhausted. With the
    /// default configuration that bound is `usize::MAX`.
    pub fn find_minimal<L: Lock>(&mut self, mut lock: L) -> Result<Option<Combination>, L::Error> {
        self.stats = SearchStats::default();
        for depth in 1..=self.config.max_depth {
            if let Some(found) = self.search_round(&mut lock, depth)? {
                return Ok(Some(found));
            }
        }
        tracing::warn!(
            max_depth = self.config.max_depth,
            attempts = self.stats.attempts,
            "No combination found up to maximum depth"
        );
        Ok(None)
    }

    fn search_round<L: Lock + ?Sized>(
        &mut self,
        lock: &mut L,
        len: usize,
    ) -> Result<Option<Combination>, L::Error> {
        self.stats.deepest = self.stats.deepest.max(len);
        tracing::debug!(
            depth = len,
            alphabet = self.config.alphabet.name(),
            "Starting search round"
        );

        let mut odometer = Odometer::new(self.config.alphabet, len);
        loop {
            let key = odometer.current();
            debug_assert_eq!(key.len(), len);

            self.stats.attempts += 1;
            let opened = lock.try_open(key).map_err(|e| {
                tracing::error!(
                    depth = len,
                    attempts = self.stats.attempts,
                    "Lock failed, aborting search"
                );
                e
            })?;

            if opened {
                let found = Combination::from(key);
                tracing::info!(
                    depth = len,
                    attempts = self.stats.attempts,
                    fingerprint = %found.fingerprint(),
                    "Combination found"
                );
                return Ok(Some(found));
            }
            if !odometer.advance() {
                break;
            }
        }

        self.stats.depths_exhausted += 1;
        tracing::debug!(
            depth = len,
            attempts = self.stats.attempts,
            "Search round exhausted"
        );
        Ok(None)
    }
}

fn never<T>(infallible: std::convert::Infallible) -> T {
    match infallible {}
}

/// Smallest-length-first search with an infallible predicate and the
/// default configuration.
pub fn find_minimal<F>(oracle: F) -> Option<Combination>
where
    F: FnMut(&[u8]) -> bool,
{
    Searcher::default()
        .find_minimal(FnLock::new(oracle))
        .unwrap_or_else(never)
}

/// Exhaustive search over keys of exactly `len` bytes with an infallible
/// predicate.
pub fn find_of_length<F>(oracle: F, len: usize) -> Option<Combination>
where
    F: FnMut(&[u8]) -> bool,
{
    Searcher::default()
        .find_of_length(FnLock::new(oracle), len)
        .unwrap_or_else(never)
}

/// [`find_minimal`] for a predicate that can fail. The first error ends
/// the search and is returned as is.
pub fn try_find_minimal<F, E>(oracle: F) -> Result<Option<Combination>, E>
where
    F: FnMut(&[u8]) -> Result<bool, E>,
{
    Searcher::default().find_minimal(TryFnLock::new(oracle))
}

/// [`find_of_length`] for a predicate that can fail.
pub fn try_find_of_length<F, E>(oracle: F, len: usize) -> Result<Option<Combination>, E>
where
    F: FnMut(&[u8]) -> Result<bool, E>,
{
    Searcher::default().find_of_length(TryFnLock::new(oracle), len)
}
