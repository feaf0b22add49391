//! Bounded discrete-log recovery for elements of the form `m * h`.
//!
//! Exponential ElGamal decrypts to `m * h` rather than `m`. Recovering `m` is
//! only feasible because plaintexts are kept small: the table below maps every
//! `m * h` in a fixed window back to `m`, built once on first use.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use tracing::{debug, warn};

use crate::elgamal::PLAINTEXT_BOUND;
use crate::errors::{Error, Result};
use crate::functions::scalar_from_i64;

/// Largest number of entries a lookup table may hold.
pub const MAX_WINDOW_LEN: usize = 1 << 20;

/// Half-open range `[min, max)` of integers the lookup table can recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaintextWindow {
    min: i64,
    max: i64,
}

impl Default for PlaintextWindow {
    fn default() -> Self {
        PlaintextWindow {
            min: -1000,
            max: 1000,
        }
    }
}

impl PlaintextWindow {
    /// The window must cover every encryptable plaintext and hold at most
    /// [`MAX_WINDOW_LEN`] entries.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min >= max {
            return Err(Error::Argument(format!(
                "empty plaintext window [{min}, {max})"
            )));
        }
        if min > -(PLAINTEXT_BOUND - 1) || max < PLAINTEXT_BOUND {
            return Err(Error::Argument(format!(
                "plaintext window [{min}, {max}) does not cover the encryptable range ({}, {})",
                -PLAINTEXT_BOUND, PLAINTEXT_BOUND
            )));
        }
        match window_len(min, max) {
            Some(len) if len <= MAX_WINDOW_LEN => Ok(PlaintextWindow { min, max }),
            _ => Err(Error::Argument(format!(
                "plaintext window [{min}, {max}) exceeds {MAX_WINDOW_LEN} entries"
            ))),
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, m: i64) -> bool {
        self.min <= m && m < self.max
    }

    pub fn len(&self) -> usize {
        window_len(self.min, self.max).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn window_len(min: i64, max: i64) -> Option<usize> {
    max.checked_sub(min).and_then(|span| usize::try_from(span).ok())
}

/// Lazily built map from compressed `m * h` to `m`.
///
/// Construction happens at most once, guarded by a [`OnceLock`], so the table
/// can be shared across threads and authorities after [`GroupParameters`]
/// creation without any further synchronisation.
///
/// [`GroupParameters`]: crate::params::GroupParameters
#[derive(Clone)]
pub struct DiscreteLogTable {
    h: RistrettoPoint,
    window: PlaintextWindow,
    table: OnceLock<HashMap<CompressedRistretto, i64>>,
}

impl fmt::Debug for DiscreteLogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteLogTable")
            .field("window", &self.window)
            .field("built", &self.is_built())
            .finish()
    }
}

impl DiscreteLogTable {
    pub fn new(h: RistrettoPoint, window: PlaintextWindow) -> Self {
        DiscreteLogTable {
            h,
            window,
            table: OnceLock::new(),
        }
    }

    pub fn window(&self) -> PlaintextWindow {
        self.window
    }

    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Forces construction; later calls are no-ops.
    pub fn build(&self) {
        self.entries();
    }

    fn entries(&self) -> &HashMap<CompressedRistretto, i64> {
        self.table.get_or_init(|| {
            debug!(
                min = self.window.min(),
                max = self.window.max(),
                "building discrete log table"
            );
            let mut entries = HashMap::with_capacity(self.window.len());
            // Walk the window by repeated addition of h.
            let mut point = self.h * scalar_from_i64(self.window.min());
            for m in self.window.min()..self.window.max() {
                entries.insert(point.compress(), m);
                point += self.h;
            }
            entries
        })
    }

    /// Returns `m` such that `element == m * h`, if `m` lies in the window.
    pub fn lookup(&self, element: &RistrettoPoint) -> Result<i64> {
        match self.entries().get(&element.compress()) {
            Some(m) => Ok(*m),
            None => {
                warn!("discrete log lookup missed the plaintext window");
                Err(Error::Decryption {
                    min: self.window.min(),
                    max: self.window.max(),
                })
            }
        }
    }
}
