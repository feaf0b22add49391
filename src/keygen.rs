use std::fmt;

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::functions::{random_nonzero_scalar, scalar_from_i64};
use crate::params::GroupParameters;

#[derive(Clone)]
pub struct SecretKey(pub(crate) Scalar);

impl SecretKey {
    /// Wraps a chosen scalar; zero is not a valid private key.
    pub fn from_scalar(x: Scalar) -> Result<Self> {
        if x == Scalar::ZERO {
            return Err(Error::Argument("private key must be nonzero".to_string()));
        }
        Ok(SecretKey(x))
    }

    pub fn from_i64(x: i64) -> Result<Self> {
        Self::from_scalar(scalar_from_i64(x))
    }

    pub fn public_key(&self, params: &GroupParameters) -> PublicKey {
        PublicKey(params.g() * self.0)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub(crate) RistrettoPoint);

impl PublicKey {
    pub fn from_point(p: RistrettoPoint) -> Self {
        PublicKey(p)
    }

    pub fn as_point(&self) -> &RistrettoPoint {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let compressed = CompressedRistretto::from_slice(bytes).map_err(|_| {
            Error::Format(format!("public key must be 32 bytes, got {}", bytes.len()))
        })?;
        compressed
            .decompress()
            .map(PublicKey)
            .ok_or_else(|| Error::Format("public key is not a valid group element".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

pub fn keygen<R: RngCore + CryptoRng>(params: &GroupParameters, rng: &mut R) -> KeyPair {
    let secret = SecretKey(random_nonzero_scalar(rng));
    let public = secret.public_key(params);
    KeyPair { secret, public }
}
