use std::fmt;

/// A fixed-length byte sequence offered to a [`Lock`](crate::lock::Lock).
///
/// The search hands out combinations only once the lock has accepted them;
/// during enumeration candidates live in a borrowed scratch buffer instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination(Vec<u8>);

impl Combination {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// MD5 hex digest of the bytes, for identifying a combination in logs
    /// without printing it.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(&self.0))
    }
}

impl From<Vec<u8>> for Combination {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Combination {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Combination> for Vec<u8> {
    fn from(combination: Combination) -> Self {
        combination.0
    }
}

impl AsRef<[u8]> for Combination {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Combination {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<Vec<u8>> for Combination {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &self.0 == other
    }
}

/// Lowercase hex, two digits per byte. The empty combination renders as "".
impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
