//! Exponential ElGamal encryption and decryption.
//!
//! The plaintext `m` is encoded as `m * h`, which makes ciphertexts additively
//! homomorphic but means decryption ends in a bounded discrete-log lookup.
//! Only `-PLAINTEXT_BOUND < m < PLAINTEXT_BOUND` may be encrypted.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::errors::{Error, Result};
use crate::functions::{random_nonzero_scalar, scalar_from_i64};
use crate::keygen::{PublicKey, SecretKey};
use crate::params::GroupParameters;

pub const PLAINTEXT_BOUND: i64 = 100;

pub fn check_plaintext(m: i64) -> Result<()> {
    if -PLAINTEXT_BOUND < m && m < PLAINTEXT_BOUND {
        Ok(())
    } else {
        Err(Error::Range {
            value: m,
            min: -PLAINTEXT_BOUND,
            max: PLAINTEXT_BOUND,
        })
    }
}

pub fn encrypt<R: RngCore + CryptoRng>(
    params: &GroupParameters,
    pk: &PublicKey,
    m: i64,
    rng: &mut R,
) -> Result<Ciphertext> {
    check_plaintext(m)?;
    let k = random_nonzero_scalar(rng);
    encrypt_with_randomness(params, pk, m, &k)
}

/// Encryption with caller-supplied ephemeral randomness. Reusing `k` across
/// two messages leaks their difference.
pub fn encrypt_with_randomness(
    params: &GroupParameters,
    pk: &PublicKey,
    m: i64,
    k: &Scalar,
) -> Result<Ciphertext> {
    check_plaintext(m)?;
    let a = params.g() * k;
    let b = pk.0 * k + params.h() * scalar_from_i64(m);
    Ok(Ciphertext::new(a, b))
}

/// Opens `element == m * h` through the parameters' lookup table.
pub fn recover_discrete_log(params: &GroupParameters, element: &RistrettoPoint) -> Result<i64> {
    params.dlog_table().lookup(element)
}

pub fn decrypt(params: &GroupParameters, sk: &SecretKey, ct: &Ciphertext) -> Result<i64> {
    let hm = ct.b() - ct.a() * sk.0;
    recover_discrete_log(params, &hm)
}
