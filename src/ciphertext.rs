//! Ciphertext value type and its byte codec.
//!
//! A [`Ciphertext`] can only be obtained from valid group elements, either by
//! encrypting or by decoding through [`Ciphertext::from_components`] /
//! [`Ciphertext::from_bytes`], which reject anything that is not exactly two
//! canonical Ristretto encodings. Every operation that accepts `&Ciphertext`
//! therefore works on validated input.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};

use crate::errors::{Error, Result};
use crate::params::GroupParameters;

pub const CIPHERTEXT_SIZE: usize = 64;

/// `(A, B) = (k * g, k * pk + m * h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext {
    a: RistrettoPoint,
    b: RistrettoPoint,
}

impl Ciphertext {
    pub(crate) fn new(a: RistrettoPoint, b: RistrettoPoint) -> Self {
        Ciphertext { a, b }
    }

    pub fn a(&self) -> &RistrettoPoint {
        &self.a
    }

    pub fn b(&self) -> &RistrettoPoint {
        &self.b
    }

    pub fn to_components(&self) -> [CompressedRistretto; 2] {
        [self.a.compress(), self.b.compress()]
    }

    pub fn from_components(components: &[CompressedRistretto]) -> Result<Self> {
        if components.len() != 2 {
            return Err(Error::Format(format!(
                "expected 2 components, got {}",
                components.len()
            )));
        }
        let a = components[0].decompress().ok_or_else(|| {
            Error::Format("component A is not a valid group element".to_string())
        })?;
        let b = components[1].decompress().ok_or_else(|| {
            Error::Format("component B is not a valid group element".to_string())
        })?;
        Ok(Ciphertext { a, b })
    }

    pub fn to_bytes(&self) -> [u8; CIPHERTEXT_SIZE] {
        let mut out = [0u8; CIPHERTEXT_SIZE];
        out[..32].copy_from_slice(self.a.compress().as_bytes());
        out[32..].copy_from_slice(self.b.compress().as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CIPHERTEXT_SIZE {
            return Err(Error::Format(format!(
                "expected {} bytes, got {}",
                CIPHERTEXT_SIZE,
                bytes.len()
            )));
        }
        let components = bytes
            .chunks_exact(32)
            .map(|chunk| {
                CompressedRistretto::from_slice(chunk)
                    .map_err(|_| Error::Format("bad component length".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_components(&components)
    }
}

/// True iff `components` is exactly a pair of valid group elements.
pub fn validate_ciphertext(_params: &GroupParameters, components: &[CompressedRistretto]) -> bool {
    Ciphertext::from_components(components).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::encrypt;
    use crate::keygen::keygen;
    use rand::rngs::OsRng;

    fn sample_ciphertext(params: &GroupParameters) -> Ciphertext {
        let kp = keygen(params, &mut OsRng);
        encrypt(params, &kp.public, 5, &mut OsRng).expect("encryption failed")
    }

    #[test]
    fn test_validate_ciphertext() {
        let params = GroupParameters::setup();
        let ct = sample_ciphertext(&params);
        let components = ct.to_components();
        assert!(validate_ciphertext(&params, &components));

        assert!(!validate_ciphertext(&params, &components[..1]));
        let three = [components[0], components[1], components[0]];
        assert!(!validate_ciphertext(&params, &three));

        let bad = CompressedRistretto([0xffu8; 32]);
        assert!(!validate_ciphertext(&params, &[components[0], bad]));
        assert!(!validate_ciphertext(&params, &[bad, components[1]]));
    }

    #[test]
    fn test_bytes() {
        let params = GroupParameters::setup();
        let ct = sample_ciphertext(&params);
        let decoded = Ciphertext::from_bytes(&ct.to_bytes()).expect("decoding failed");
        assert_eq!(decoded, ct);
    }

    #[test]
    fn test_from_bytes_rejects_malformed() {
        let params = GroupParameters::setup();
        let ct = sample_ciphertext(&params);
        let bytes = ct.to_bytes();

        assert!(matches!(
            Ciphertext::from_bytes(&bytes[..63]),
            Err(Error::Format(_))
        ));

        let mut corrupted = bytes;
        corrupted[40] ^= 0xff;
        corrupted[63] = 0xff;
        assert!(matches!(
            Ciphertext::from_bytes(&corrupted),
            Err(Error::Format(_))
        ));
    }
}
