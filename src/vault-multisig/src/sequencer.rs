//! The vault's authorization counter.
//!
//! The counter is the only mutable state in the core. All verification work
//! is read-only; the final compare-and-increment here is the mutual-exclusion
//! boundary that lets two concurrent attempts race safely: both may pass
//! every signature check against the same observed nonce, but only one can
//! advance it, and the loser's intent is stale.

use alloy_primitives::U256;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct NonceSequencer {
    nonce: Mutex<U256>,
}

impl NonceSequencer {
    pub fn new(start: U256) -> Self {
        Self { nonce: Mutex::new(start) }
    }

    /// Current counter, without mutation.
    ///
    /// Intents are built against the value observed here *before* signature
    /// collection begins.
    pub fn current(&self) -> U256 {
        *self.nonce.lock()
    }

    /// Advance the counter by exactly 1 iff it still equals `expected`.
    ///
    /// Returns `false` (leaving state untouched) when another authorization
    /// consumed the nonce first.
    pub fn advance_if_current(&self, expected: U256) -> bool {
        let mut nonce = self.nonce.lock();
        if *nonce != expected {
            return false;
        }
        let next = nonce.saturating_add(U256::from(1u64));
        *nonce = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use alloy_primitives::U256;

    use super::NonceSequencer;

    #[test]
    fn current_does_not_mutate() {
        let seq = NonceSequencer::new(U256::from(5u64));
        assert_eq!(seq.current(), U256::from(5u64));
        assert_eq!(seq.current(), U256::from(5u64));
    }

    #[test]
    fn advance_requires_exact_match() {
        let seq = NonceSequencer::default();
        assert!(!seq.advance_if_current(U256::from(1u64)));
        assert_eq!(seq.current(), U256::ZERO);
        assert!(seq.advance_if_current(U256::ZERO));
        assert_eq!(seq.current(), U256::from(1u64));
        // The consumed value cannot be advanced again.
        assert!(!seq.advance_if_current(U256::ZERO));
        assert_eq!(seq.current(), U256::from(1u64));
    }

    #[test]
    fn concurrent_advances_admit_exactly_one_winner() {
        let seq = Arc::new(NonceSequencer::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || seq.advance_if_current(U256::ZERO))
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(seq.current(), U256::from(1u64));
    }
}
