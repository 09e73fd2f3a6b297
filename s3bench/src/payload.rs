//! Random contents for uploaded objects.

use bytes::{Bytes, BytesMut};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Produces fresh random payloads, one per upload trial.
///
/// Random contents prevent deduplication or compression on the storage side from skewing the
/// measurements. The RNG is injected so tests can use a seeded source.
#[derive(Debug)]
pub struct PayloadGenerator<R> {
    rng: R,
}

impl PayloadGenerator<StdRng> {
    /// Creates a generator backed by a cryptographically secure RNG seeded from the OS.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: RngCore> PayloadGenerator<R> {
    /// Creates a generator drawing bytes from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns `len` bytes of newly generated random data.
    pub fn generate(&mut self, len: u64) -> Bytes {
        let mut buf = BytesMut::zeroed(len as usize);
        self.rng.fill_bytes(&mut buf);
        buf.freeze()
    }
}
