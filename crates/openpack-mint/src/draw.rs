//! The deterministic draw stream behind every randomized mint.
//!
//! A stream is keyed by the commitment's seed plus reveal-time entropy,
//! domain-separated from every other hash in the system. Each draw is
//! `SHA-256(stream_seed || counter)` truncated to a `u64`, so the whole
//! card sequence of a mint is a pure function of `(commit seed, reveal
//! entropy)` and replays bit-for-bit.

use sha2::{Digest, Sha256};

const STREAM_DOMAIN: &[u8] = b"openpack:draw:v1:";

/// Counter-mode SHA-256 stream of bounded random draws.
#[derive(Debug, Clone)]
pub struct DrawStream {
    seed: [u8; 32],
    counter: u64,
}

impl DrawStream {
    #[must_use]
    pub fn new(commit_seed: &[u8; 32], reveal: &[u8; 32]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(STREAM_DOMAIN);
        hasher.update(commit_seed);
        hasher.update(reveal);
        Self {
            seed: hasher.finalize().into(),
            counter: 0,
        }
    }

    /// Next raw 64-bit draw.
    pub fn next_u64(&mut self) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Uniform draw in `[0, n)`. `n` must be nonzero.
    pub fn next_range(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0, "draw range must be nonzero");
        self.next_u64() % n.max(1)
    }

    /// Weighted index draw: returns `i` with probability
    /// `weights[i] / sum(weights)`. The total weight must be positive;
    /// individual zero-weight entries are never picked.
    pub fn weighted(&mut self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        debug_assert!(total > 0, "weighted draw needs a positive total weight");
        let mut roll = self.next_range(total.max(1));
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return index;
            }
            roll -= weight;
        }
        weights.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_seeds_replay() {
        let mut a = DrawStream::new(&[1u8; 32], &[2u8; 32]);
        let mut b = DrawStream::new(&[1u8; 32], &[2u8; 32]);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn either_half_changes_the_stream() {
        let mut base = DrawStream::new(&[1u8; 32], &[2u8; 32]);
        let mut other_commit = DrawStream::new(&[3u8; 32], &[2u8; 32]);
        let mut other_reveal = DrawStream::new(&[1u8; 32], &[4u8; 32]);
        let first = base.next_u64();
        assert_ne!(first, other_commit.next_u64());
        assert_ne!(first, other_reveal.next_u64());
    }

    #[test]
    fn range_draws_stay_in_bounds() {
        let mut stream = DrawStream::new(&[5u8; 32], &[6u8; 32]);
        for _ in 0..1000 {
            assert!(stream.next_range(7) < 7);
        }
    }

    #[test]
    fn weighted_never_picks_zero_weight() {
        let mut stream = DrawStream::new(&[5u8; 32], &[6u8; 32]);
        for _ in 0..1000 {
            let index = stream.weighted(&[10, 0, 10, 0]);
            assert!(index == 0 || index == 2);
        }
    }

    #[test]
    #[should_panic(expected = "positive total weight")]
    fn weighted_rejects_all_zero_weights() {
        let mut stream = DrawStream::new(&[1u8; 32], &[2u8; 32]);
        stream.weighted(&[0, 0, 0]);
    }

    #[test]
    fn weighted_covers_all_positive_weights() {
        let mut stream = DrawStream::new(&[8u8; 32], &[9u8; 32]);
        let mut seen = [false; 4];
        for _ in 0..2000 {
            seen[stream.weighted(&[70, 22, 6, 2])] = true;
        }
        assert!(seen.iter().all(|&s| s), "not all weights drawn: {seen:?}");
    }
}
