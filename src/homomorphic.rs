//! Operations on ciphertexts that act on the underlying plaintexts without decrypting.
//!
//! `add` and `scalar_mul` take the public key for interface symmetry only; the
//! algebra does not need it. Results are new values, inputs are untouched.

use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::elgamal::encrypt;
use crate::errors::{Error, Result};
use crate::functions::scalar_from_i64;
use crate::keygen::PublicKey;
use crate::params::GroupParameters;

/// Decrypts to `m1 + m2`.
pub fn add(
    _params: &GroupParameters,
    _pk: &PublicKey,
    c1: &Ciphertext,
    c2: &Ciphertext,
) -> Ciphertext {
    Ciphertext::new(c1.a() + c2.a(), c1.b() + c2.b())
}

pub fn add_all(
    params: &GroupParameters,
    pk: &PublicKey,
    c_list: &[Ciphertext],
) -> Result<Ciphertext> {
    let (first, rest) = c_list
        .split_first()
        .ok_or_else(|| Error::Argument("empty ciphertext list".to_string()))?;
    Ok(rest.iter().fold(*first, |sum, ci| add(params, pk, &sum, ci)))
}

/// Decrypts to `alpha * m`. No range check: overflow of the lookup window
/// surfaces as a decryption error.
pub fn scalar_mul(
    _params: &GroupParameters,
    _pk: &PublicKey,
    c: &Ciphertext,
    alpha: i64,
) -> Ciphertext {
    let alpha = scalar_from_i64(alpha);
    Ciphertext::new(c.a() * alpha, c.b() * alpha)
}

/// Adds a fresh encryption of zero, leaving the plaintext unchanged.
pub fn rerandomize<R: RngCore + CryptoRng>(
    params: &GroupParameters,
    pk: &PublicKey,
    c: &Ciphertext,
    rng: &mut R,
) -> Result<Ciphertext> {
    let zero = encrypt(params, pk, 0, rng)?;
    Ok(add(params, pk, c, &zero))
}
