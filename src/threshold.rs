//! N-of-N threshold decryption.
//!
//! Each authority publishes `x_i * g`; the group key is their sum, so the
//! matching private scalar `x_1 + ... + x_n` is never held by anyone. To
//! decrypt, every authority in turn subtracts `x_i * A` from `B`, and the last
//! one opens the result through the discrete-log table. Skipping an authority
//! leaves `x_j * A` in `B` and the final lookup fails.
//!
//! Nothing here proves that a submitted public key was generated honestly;
//! [`build_corrupt_public_key`] shows how the last authority to publish can
//! steer the group key to one it controls.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::ciphertext::Ciphertext;
use crate::elgamal::recover_discrete_log;
use crate::errors::{Error, Result};
use crate::keygen::{keygen, KeyPair, PublicKey, SecretKey};
use crate::params::GroupParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDecryption {
    /// `(A, B - x_i * A)`, to be passed to the next authority.
    Partial(Ciphertext),
    Plaintext(i64),
}

impl PartialDecryption {
    pub fn into_ciphertext(self) -> Result<Ciphertext> {
        match self {
            PartialDecryption::Partial(ct) => Ok(ct),
            PartialDecryption::Plaintext(_) => Err(Error::Argument(
                "decryption chain already finalized".to_string(),
            )),
        }
    }

    pub fn into_plaintext(self) -> Result<i64> {
        match self {
            PartialDecryption::Plaintext(m) => Ok(m),
            PartialDecryption::Partial(_) => Err(Error::Argument(
                "decryption chain not finalized".to_string(),
            )),
        }
    }
}

pub fn aggregate_group_key(pub_keys: &[PublicKey]) -> Result<PublicKey> {
    if pub_keys.is_empty() {
        return Err(Error::Argument("empty public key list".to_string()));
    }
    Ok(PublicKey(pub_keys.iter().map(|pk| pk.0).sum::<RistrettoPoint>()))
}

pub fn partial_decrypt(
    params: &GroupParameters,
    sk: &SecretKey,
    ct: &Ciphertext,
    is_final: bool,
) -> Result<PartialDecryption> {
    let b = ct.b() - ct.a() * sk.0;
    if is_final {
        recover_discrete_log(params, &b).map(PartialDecryption::Plaintext)
    } else {
        Ok(PartialDecryption::Partial(Ciphertext::new(*ct.a(), b)))
    }
}

/// Public key a malicious authority publishes so that the aggregate of
/// `other_pub_keys` and this key equals `chosen * g`.
pub fn build_corrupt_public_key(
    params: &GroupParameters,
    chosen: &SecretKey,
    other_pub_keys: &[PublicKey],
) -> Result<PublicKey> {
    let legit = aggregate_group_key(other_pub_keys)?;
    Ok(PublicKey(params.g() * chosen.0 - legit.0))
}

/// A numbered decryption authority holding one share of the group secret.
#[derive(Debug, Clone)]
pub struct Authority {
    pub index: u8,
    keypair: KeyPair,
}

impl Authority {
    pub fn new<R: RngCore + CryptoRng>(
        params: &GroupParameters,
        index: u8,
        rng: &mut R,
    ) -> Self {
        Authority {
            index,
            keypair: keygen(params, rng),
        }
    }

    /// Rejects a zero secret or a public key that does not match it.
    pub fn from_keypair(params: &GroupParameters, index: u8, keypair: KeyPair) -> Result<Self> {
        if keypair.secret.0 == Scalar::ZERO {
            return Err(Error::Argument(format!("authority {index} has a zero private key")));
        }
        if keypair.secret.public_key(params) != keypair.public {
            return Err(Error::Argument(format!(
                "authority {index} public key does not match its private key"
            )));
        }
        Ok(Authority { index, keypair })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    pub fn partial_decrypt(
        &self,
        params: &GroupParameters,
        ct: &Ciphertext,
        is_final: bool,
    ) -> Result<PartialDecryption> {
        trace!(authority = self.index, is_final, "partial decryption");
        partial_decrypt(params, &self.keypair.secret, ct, is_final)
    }
}

/// Runs the full chain over `authorities` in order, the last step final.
pub fn threshold_decrypt(
    params: &GroupParameters,
    authorities: &[Authority],
    ct: &Ciphertext,
) -> Result<i64> {
    let (last, rest) = authorities
        .split_last()
        .ok_or_else(|| Error::Argument("empty authority list".to_string()))?;
    debug!(authorities = authorities.len(), "threshold decryption");
    let mut current = *ct;
    for authority in rest {
        current = authority
            .partial_decrypt(params, &current, false)?
            .into_ciphertext()?;
    }
    last.partial_decrypt(params, &current, true)?.into_plaintext()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::{decrypt, encrypt};
    use rand::rngs::OsRng;
    use zeroize::Zeroize;

    fn authorities(params: &GroupParameters, n: u8) -> Vec<Authority> {
        (1..=n).map(|i| Authority::new(params, i, &mut OsRng)).collect()
    }

    fn group_key(authorities: &[Authority]) -> PublicKey {
        let pub_keys: Vec<PublicKey> = authorities.iter().map(|a| *a.public_key()).collect();
        aggregate_group_key(&pub_keys).expect("aggregation failed")
    }

    #[test]
    fn test_aggregate_group_key() {
        let params = GroupParameters::setup();
        let keys = [
            SecretKey::from_i64(3).expect("key construction failed"),
            SecretKey::from_i64(5).expect("key construction failed"),
            SecretKey::from_i64(7).expect("key construction failed"),
        ];
        let pub_keys: Vec<PublicKey> = keys.iter().map(|k| k.public_key(&params)).collect();
        let group = aggregate_group_key(&pub_keys).expect("aggregation failed");
        let expected = SecretKey::from_i64(15).expect("key construction failed");
        assert_eq!(group, expected.public_key(&params));

        let reversed: Vec<PublicKey> = pub_keys.iter().rev().copied().collect();
        assert_eq!(aggregate_group_key(&reversed), Ok(group));

        assert_eq!(aggregate_group_key(&pub_keys[..1]), Ok(pub_keys[0]));
        assert!(matches!(aggregate_group_key(&[]), Err(Error::Argument(_))));
    }

    #[test]
    fn test_authority_from_keypair() {
        let params = GroupParameters::setup();
        let kp = keygen(&params, &mut OsRng);
        let authority =
            Authority::from_keypair(&params, 1, kp.clone()).expect("authority construction failed");
        assert_eq!(*authority.public_key(), kp.public);

        let mismatched = KeyPair {
            secret: kp.secret.clone(),
            public: keygen(&params, &mut OsRng).public,
        };
        assert!(matches!(
            Authority::from_keypair(&params, 2, mismatched),
            Err(Error::Argument(_))
        ));

        let mut wiped = kp;
        wiped.secret.zeroize();
        assert!(matches!(
            Authority::from_keypair(&params, 3, wiped),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn test_partial_decrypt_keeps_a() {
        let params = GroupParameters::setup();
        let auths = authorities(&params, 2);
        let pk = group_key(&auths);
        let ct = encrypt(&params, &pk, 9, &mut OsRng).expect("encryption failed");

        let step = auths[0]
            .partial_decrypt(&params, &ct, false)
            .expect("partial decryption failed")
            .into_ciphertext()
            .expect("expected ciphertext");
        assert_eq!(step.a(), ct.a());
        assert_ne!(step.b(), ct.b());

        let m = auths[1]
            .partial_decrypt(&params, &step, true)
            .expect("partial decryption failed");
        assert_eq!(m, PartialDecryption::Plaintext(9));
    }

    #[test]
    fn test_threshold_any_order() {
        let params = GroupParameters::setup();
        let auths = authorities(&params, 3);
        let pk = group_key(&auths);
        let ct = encrypt(&params, &pk, -33, &mut OsRng).expect("encryption failed");

        assert_eq!(threshold_decrypt(&params, &auths, &ct), Ok(-33));
        let reordered = vec![auths[2].clone(), auths[0].clone(), auths[1].clone()];
        assert_eq!(threshold_decrypt(&params, &reordered, &ct), Ok(-33));
    }

    #[test]
    fn test_threshold_missing_authority() {
        let params = GroupParameters::setup();
        let auths = authorities(&params, 3);
        let pk = group_key(&auths);
        let ct = encrypt(&params, &pk, 12, &mut OsRng).expect("encryption failed");

        let result = threshold_decrypt(&params, &auths[..2], &ct);
        assert!(matches!(result, Err(Error::Decryption { .. })));
        assert!(matches!(
            threshold_decrypt(&params, &[], &ct),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn test_corrupt_public_key() {
        let params = GroupParameters::setup();
        let auths = authorities(&params, 2);
        let honest: Vec<PublicKey> = auths.iter().map(|a| *a.public_key()).collect();

        let chosen = SecretKey::from_i64(123_456_789).expect("key construction failed");
        let corrupt =
            build_corrupt_public_key(&params, &chosen, &honest).expect("construction failed");
        assert!(PublicKey::from_bytes(&corrupt.to_bytes()).is_ok());

        let group =
            aggregate_group_key(&[honest[0], honest[1], corrupt]).expect("aggregation failed");
        assert_eq!(group, chosen.public_key(&params));

        let ct = encrypt(&params, &group, 77, &mut OsRng).expect("encryption failed");
        assert_eq!(decrypt(&params, &chosen, &ct), Ok(77));

        assert!(matches!(
            build_corrupt_public_key(&params, &chosen, &[]),
            Err(Error::Argument(_))
        ));
    }
}
