use crate::alphabet::Alphabet;
use crate::combination::Combination;

/// Mixed-radix counter over an [`Alphabet`] that produces every candidate of
/// a fixed length exactly once.
///
/// Position 0 is the most significant digit and the last position the least
/// significant, so for [`Alphabet::Unsigned`] candidates come out in plain
/// lexicographic order: `[0, 0], [0, 1], ..., [0, 255], [1, 0], ...`.
///
/// The odometer owns a single scratch buffer which is rewritten in place on
/// every [`advance`](Odometer::advance); callers only ever see it borrowed.
#[derive(Debug, Clone)]
pub struct Odometer {
    alphabet: Alphabet,
    digits: Vec<u8>,
    exhausted: bool,
}

impl Odometer {
    /// Starts at the first candidate of length `len`: every position set to
    /// `alphabet.first()`. For `len == 0` that is the empty sequence.
    pub fn new(alphabet: Alphabet, len: usize) -> Self {
        Self {
            alphabet,
            digits: vec![alphabet.first(); len],
            exhausted: false,
        }
    }

    /// The candidate the odometer currently points at.
    pub fn current(&self) -> &[u8] {
        &self.digits
    }

    /// Steps to the next candidate. Returns `false` once the last candidate
    /// has been passed; the buffer then holds the first candidate again and
    /// every further call also returns `false`.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        for digit in self.digits.iter_mut().rev() {
            match self.alphabet.successor(*digit) {
                Some(next) => {
                    *digit = next;
                    return true;
                }
                None => *digit = self.alphabet.first(),
            }
        }
        self.exhausted = true;
        false
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Owning iterator over all candidates of one length, in odometer order.
///
/// Allocates a fresh [`Combination`] per item; the search itself works off
/// the borrowed [`Odometer`] buffer instead.
#[derive(Debug, Clone)]
pub struct Combinations {
    odometer: Odometer,
    done: bool,
}

impl Combinations {
    pub fn new(alphabet: Alphabet, len: usize) -> Self {
        Self {
            odometer: Odometer::new(alphabet, len),
            done: false,
        }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = Combination::from(self.odometer.current());
        self.done = !self.odometer.advance();
        Some(item)
    }
}
