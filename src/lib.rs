//! This crate implements exponential ElGamal over the Ristretto255 group.
//!
//! Based on:
//! Cramer, Gennaro and Schoenmakers, "A Secure and Optimally Efficient
//! Multi-Authority Election Scheme", 1997.
//! This crate provides additively homomorphic encryption of small integers,
//! N-of-N threshold decryption over an aggregated group key, and a private
//! poll built on both.
//!
//! # Example
//! ```
//! use exp_elgamal::{decrypt, encrypt, homomorphic, keygen, GroupParameters};
//! use rand::rngs::OsRng;
//!
//! let params = GroupParameters::setup();
//! let kp = keygen(&params, &mut OsRng);
//! let c1 = encrypt(&params, &kp.public, 20, &mut OsRng).unwrap();
//! let c2 = encrypt(&params, &kp.public, 22, &mut OsRng).unwrap();
//! let sum = homomorphic::add(&params, &kp.public, &c1, &c2);
//! assert_eq!(decrypt(&params, &kp.secret, &sum).unwrap(), 42);
//! ```

pub mod ciphertext;
pub mod dlog;
pub mod elgamal;
pub mod errors;
mod functions;
pub mod homomorphic;
pub mod keygen;
pub mod params;
pub mod poll;
pub mod threshold;

pub use ciphertext::{validate_ciphertext, Ciphertext};
pub use dlog::{DiscreteLogTable, PlaintextWindow, MAX_WINDOW_LEN};
pub use elgamal::{
    decrypt, encrypt, encrypt_with_randomness, recover_discrete_log, PLAINTEXT_BOUND,
};
pub use errors::{Error, Result};
pub use keygen::{keygen, KeyPair, PublicKey, SecretKey};
pub use params::GroupParameters;
pub use poll::{encode_vote, run_poll, run_poll_with, tally, EncryptedVote, PollConfig};
pub use threshold::{
    aggregate_group_key, build_corrupt_public_key, partial_decrypt, threshold_decrypt, Authority,
    PartialDecryption,
};
