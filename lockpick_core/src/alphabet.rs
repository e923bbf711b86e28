use serde::Deserialize;

use crate::odometer::Combinations;

/// Number of symbols every alphabet carries.
pub const BASE: usize = 256;

/// The ordered set of byte values each position of a candidate may take.
///
/// Both variants cover all 256 byte values; they differ only in the order
/// in which the odometer walks them.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Alphabet {
    /// `0x00, 0x01, ..., 0xFF`.
    #[default]
    Unsigned,
    /// Two's-complement order of `i8::MIN..=i8::MAX`:
    /// `0x80, ..., 0xFF, 0x00, ..., 0x7F`.
    Signed,
}

impl Alphabet {
    pub fn base(&self) -> usize {
        BASE
    }

    pub fn first(&self) -> u8 {
        match self {
            Alphabet::Unsigned => u8::MIN,
            Alphabet::Signed => i8::MIN as u8,
        }
    }

    pub fn last(&self) -> u8 {
        match self {
            Alphabet::Unsigned => u8::MAX,
            Alphabet::Signed => i8::MAX as u8,
        }
    }

    /// The symbol at `index` in alphabet order. Inverse of [`index_of`](Alphabet::index_of).
    pub fn symbol(&self, index: u8) -> u8 {
        index.wrapping_add(self.first())
    }

    /// Position of `byte` in alphabet order.
    pub fn index_of(&self, byte: u8) -> u8 {
        byte.wrapping_sub(self.first())
    }

    /// The symbol following `byte`, or `None` if `byte` is the last one.
    pub fn successor(&self, byte: u8) -> Option<u8> {
        if byte == self.last() {
            None
        } else {
            Some(byte.wrapping_add(1))
        }
    }

    /// `base^n`, the number of candidates of length `n`. `None` if it does
    /// not fit in a `u128` (lengths above 15).
    pub fn space_size(&self, n: usize) -> Option<u128> {
        let exponent = u32::try_from(n).ok()?;
        (BASE as u128).checked_pow(exponent)
    }

    /// All candidates of length `n`, in search order, as owned combinations.
    pub fn combinations(&self, n: usize) -> Combinations {
        Combinations::new(*self, n)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Unsigned => "unsigned",
            Alphabet::Signed => "signed",
        }
    }
}

impl std::str::FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsigned" => Ok(Alphabet::Unsigned),
            "signed" => Ok(Alphabet::Signed),
            other => Err(format!(
                "unknown alphabet '{other}', expected 'unsigned' or 'signed'"
            )),
        }
    }
}
