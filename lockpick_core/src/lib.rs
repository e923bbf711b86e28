pub mod alphabet;
pub mod combination;
pub mod config;
pub mod lock;
pub mod odometer;
pub mod search;

pub use alphabet::Alphabet;
pub use combination::Combination;
pub use config::{ConfiguredLock, LockSettings, LockpickConfig, SearchSettings};
pub use lock::{
    BudgetLock, CatchUnwindLock, CountingLock, DigestLock, DigestParseError, FnLock, Lock,
    LockError, SecretLock, TryFnLock, lock_fn,
};
pub use odometer::{Combinations, Odometer};
pub use search::{
    SearchConfig, SearchStats, Searcher, find_minimal, find_of_length, try_find_minimal,
    try_find_of_length,
};
