use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

/// Samples a scalar uniformly from `[1, order)`.
pub fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let s = Scalar::random(rng);
        if s != Scalar::ZERO {
            return s;
        }
    }
}

/// Maps a signed integer onto the scalar field, negative values to `order - |v|`.
pub fn scalar_from_i64(v: i64) -> Scalar {
    let magnitude = Scalar::from(v.unsigned_abs());
    if v < 0 {
        -magnitude
    } else {
        magnitude
    }
}
