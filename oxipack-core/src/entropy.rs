//! Entropy capability for random fill directives.
//!
//! The engine never reaches for a hidden global generator: randomness is an
//! injected capability. Tests hand in a seeded [`rand::rngs::StdRng`] to get
//! reproducible buffers; production callers use [`rand::thread_rng`] (which
//! the convenience wrappers do for them).

use rand::RngCore;

/// A source of random bits for `r` fill directives.
///
/// Implementations must be safe to drive from the single call that owns
/// them; concurrent calls each bring their own source.
pub trait EntropySource {
    /// Draw `width` random bits, right-justified in the returned word.
    ///
    /// `width` must not exceed 64.
    fn next_bits(&mut self, width: u32) -> u64;
}

/// Every [`RngCore`] is an entropy source.
impl<R: RngCore> EntropySource for R {
    fn next_bits(&mut self, width: u32) -> u64 {
        debug_assert!(width <= 64, "cannot draw more than 64 bits at once");
        let raw = self.next_u64();
        if width >= 64 {
            raw
        } else {
            raw & ((1u64 << width) - 1)
        }
    }
}
