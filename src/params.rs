use std::sync::Arc;

use curve25519_dalek::ristretto::RistrettoPoint;
use sha2::Sha512;
use tracing::debug;

use crate::dlog::{DiscreteLogTable, PlaintextWindow};

/// Domain separation tag prefixed to every generator tag before hashing to the group.
pub const DST: &[u8] = b"EXP-ELGAMAL-RISTRETTO255-GENERATOR-00";

pub const GENERATOR_G_TAG: &[u8] = b"g";
pub const GENERATOR_H_TAG: &[u8] = b"h";

/// Prime order of the Ristretto255 group, little-endian:
/// 2^252 + 27742317777372353535851937790883648493.
pub const GROUP_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// Public parameters of a deployment: two generators with no known discrete-log
/// relation, the group order, and the shared discrete-log table for `h`.
#[derive(Debug, Clone)]
pub struct GroupParameters {
    g: RistrettoPoint,
    h: RistrettoPoint,
    order: [u8; 32],
    dlog: Arc<DiscreteLogTable>,
}

impl GroupParameters {
    pub fn setup() -> Self {
        Self::setup_with_window(PlaintextWindow::default())
    }

    pub fn setup_with_window(window: PlaintextWindow) -> Self {
        let g = hash_to_point(GENERATOR_G_TAG);
        let h = hash_to_point(GENERATOR_H_TAG);
        debug!(
            window_min = window.min(),
            window_max = window.max(),
            "group parameters derived"
        );
        GroupParameters {
            g,
            h,
            order: GROUP_ORDER,
            dlog: Arc::new(DiscreteLogTable::new(h, window)),
        }
    }

    pub fn g(&self) -> RistrettoPoint {
        self.g
    }

    pub fn h(&self) -> RistrettoPoint {
        self.h
    }

    /// Group order, little-endian.
    pub fn order(&self) -> [u8; 32] {
        self.order
    }

    pub fn dlog_table(&self) -> &DiscreteLogTable {
        &self.dlog
    }

    pub fn window(&self) -> PlaintextWindow {
        self.dlog.window()
    }
}

fn hash_to_point(tag: &[u8]) -> RistrettoPoint {
    let mut input = Vec::with_capacity(DST.len() + tag.len());
    input.extend_from_slice(DST);
    input.extend_from_slice(tag);
    RistrettoPoint::hash_from_bytes::<Sha512>(&input)
}
