use crate::combination::Combination;
use std::convert::Infallible;
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error;

/// Errors produced by the lock wrappers in this module.
///
/// `E` is the error type of the wrapped lock; use [`Infallible`] when the
/// wrapped lock cannot fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LockError<E> {
    /// The wrapped lock itself failed.
    #[error("lock failed: {0}")]
    Inner(E),
    /// A [`BudgetLock`] refused further attempts.
    #[error("attempt budget exhausted after {attempts} attempts")]
    BudgetExhausted { attempts: u64 },
    /// The wrapped lock panicked; carries the panic message.
    #[error("lock panicked: {0}")]
    Panicked(String),
}

/// Errors from parsing a [`DigestLock`] target.
#[derive(Error, Debug, PartialEq)]
pub enum DigestParseError {
    #[error("digest is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("digest must be 16 bytes (32 hex characters), got {0} bytes")]
    WrongLength(usize),
}

/// The oracle a search runs against.
///
/// A `Lock` is asked about one candidate key at a time and answers whether
/// that exact key opens it. The search relies on the answer being a stable
/// function of the key: a key rejected once is never offered again.
///
/// Returning `Err` aborts the search. The error is handed back to the
/// caller untouched and the lock is not queried again.
pub trait Lock {
    type Error;

    /// Tests a single key.
    ///
    /// # Returns
    /// * `Ok(true)` if `key` opens the lock.
    /// * `Ok(false)` if it does not.
    /// * `Err(e)` if the lock could not answer.
    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error>;
}

impl<L: Lock + ?Sized> Lock for &mut L {
    type Error = L::Error;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        (**self).try_open(key)
    }
}

/// Adapts an infallible predicate `FnMut(&[u8]) -> bool` into a [`Lock`].
pub struct FnLock<F> {
    predicate: F,
}

impl<F> FnLock<F>
where
    F: FnMut(&[u8]) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Lock for FnLock<F>
where
    F: FnMut(&[u8]) -> bool,
{
    type Error = Infallible;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        Ok((self.predicate)(key))
    }
}

/// Shorthand for [`FnLock::new`].
pub fn lock_fn<F>(predicate: F) -> FnLock<F>
where
    F: FnMut(&[u8]) -> bool,
{
    FnLock::new(predicate)
}

/// Adapts a fallible predicate `FnMut(&[u8]) -> Result<bool, E>` into a [`Lock`].
pub struct TryFnLock<F> {
    predicate: F,
}

impl<F, E> TryFnLock<F>
where
    F: FnMut(&[u8]) -> Result<bool, E>,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F, E> Lock for TryFnLock<F>
where
    F: FnMut(&[u8]) -> Result<bool, E>,
{
    type Error = E;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        (self.predicate)(key)
    }
}

/// Opens for exactly one stored combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretLock {
    secret: Vec<u8>,
}

impl SecretLock {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn from_hex(secret: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self::new(hex::decode(secret)?))
    }

    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }
}

impl Lock for SecretLock {
    type Error = Infallible;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        Ok(key == self.secret.as_slice())
    }
}

/// Opens for any combination whose MD5 digest equals the stored digest.
///
/// Searching against it recovers the shortest MD5 preimage, which is only
/// practical for very short keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestLock {
    digest: [u8; 16],
}

impl DigestLock {
    pub fn new(digest: [u8; 16]) -> Self {
        Self { digest }
    }

    /// Locks onto the digest of `key`.
    pub fn for_key(key: &[u8]) -> Self {
        Self::new(md5::compute(key).0)
    }

    pub fn from_hex(digest: &str) -> Result<Self, DigestParseError> {
        let bytes = hex::decode(digest.trim())?;
        let digest: [u8; 16] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DigestParseError::WrongLength(bytes.len()))?;
        Ok(Self::new(digest))
    }
}

impl Lock for DigestLock {
    type Error = Infallible;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        Ok(md5::compute(key).0 == self.digest)
    }
}

/// Counts how often the wrapped lock is queried and, optionally, records
/// every key it was asked about.
#[derive(Debug)]
pub struct CountingLock<L> {
    inner: L,
    attempts: u64,
    history: Option<Vec<Combination>>,
}

impl<L: Lock> CountingLock<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            attempts: 0,
            history: None,
        }
    }

    /// Like [`new`](CountingLock::new), but also keeps a copy of every key.
    pub fn recording(inner: L) -> Self {
        Self {
            inner,
            attempts: 0,
            history: Some(Vec::new()),
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Keys seen so far, oldest first. Empty unless built with
    /// [`recording`](CountingLock::recording).
    pub fn history(&self) -> &[Combination] {
        self.history.as_deref().unwrap_or(&[])
    }

}

impl<L: Lock> Lock for CountingLock<L> {
    type Error = L::Error;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        self.attempts += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(Combination::from(key));
        }
        self.inner.try_open(key)
    }
}

/// Refuses to query the wrapped lock more than `max_attempts` times.
///
/// Once the budget is spent every call fails with
/// [`LockError::BudgetExhausted`], which ends the search.
#[derive(Debug)]
pub struct BudgetLock<L> {
    inner: L,
    max_attempts: u64,
    attempts: u64,
}

impl<L: Lock> BudgetLock<L> {
    pub fn new(inner: L, max_attempts: u64) -> Self {
        Self {
            inner,
            max_attempts,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn remaining(&self) -> u64 {
        self.max_attempts.saturating_sub(self.attempts)
    }
}

impl<L: Lock> Lock for BudgetLock<L> {
    type Error = LockError<L::Error>;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        if self.attempts >= self.max_attempts {
            return Err(LockError::BudgetExhausted {
                attempts: self.attempts,
            });
        }
        self.attempts += 1;
        self.inner.try_open(key).map_err(LockError::Inner)
    }
}

/// Turns a panic inside the wrapped lock into [`LockError::Panicked`].
///
/// Without this wrapper a panicking lock unwinds straight through the search.
#[derive(Debug)]
pub struct CatchUnwindLock<L> {
    inner: L,
}

impl<L: Lock> CatchUnwindLock<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

}

impl<L: Lock> Lock for CatchUnwindLock<L> {
    type Error = LockError<L::Error>;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        match catch_unwind(AssertUnwindSafe(|| self.inner.try_open(key))) {
            Ok(result) => result.map_err(LockError::Inner),
            Err(panic_payload) => {
                let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic type".to_string()
                };
                Err(LockError::Panicked(msg))
            }
        }
    }
}
