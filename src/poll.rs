//! Private yes/no poll over threshold ElGamal.
//!
//! Each ballot is a pair of ciphertexts counting votes for `0` and for `1`,
//! exactly one of which encrypts `1`. Ballots are summed homomorphically and
//! only the two totals are ever decrypted.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::ciphertext::Ciphertext;
use crate::dlog::PlaintextWindow;
use crate::elgamal::encrypt;
use crate::errors::{Error, Result};
use crate::homomorphic::add;
use crate::keygen::PublicKey;
use crate::params::GroupParameters;
use crate::threshold::{aggregate_group_key, threshold_decrypt, Authority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptedVote {
    pub for_zero: Ciphertext,
    pub for_one: Ciphertext,
}

/// `window` is the minimum lookup window; it is widened when the number of
/// voters could push a tally past its upper end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub authorities: u8,
    pub window: PlaintextWindow,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            authorities: 3,
            window: PlaintextWindow::default(),
        }
    }
}

pub fn encode_vote<R: RngCore + CryptoRng>(
    params: &GroupParameters,
    pk: &PublicKey,
    vote: u8,
    rng: &mut R,
) -> Result<EncryptedVote> {
    if vote > 1 {
        return Err(Error::Argument(format!("vote must be 0 or 1, got {vote}")));
    }
    let vote = i64::from(vote);
    Ok(EncryptedVote {
        for_zero: encrypt(params, pk, 1 - vote, rng)?,
        for_one: encrypt(params, pk, vote, rng)?,
    })
}

/// Sums the `for_zero` and `for_one` counters of all ballots independently.
pub fn tally(
    params: &GroupParameters,
    pk: &PublicKey,
    votes: &[EncryptedVote],
) -> Result<EncryptedVote> {
    let (first, rest) = votes
        .split_first()
        .ok_or_else(|| Error::Argument("empty vote list".to_string()))?;
    Ok(rest.iter().fold(*first, |total, v| EncryptedVote {
        for_zero: add(params, pk, &total.for_zero, &v.for_zero),
        for_one: add(params, pk, &total.for_one, &v.for_one),
    }))
}

/// Runs a poll with the default configuration, returning
/// `(votes for zero, votes for one)`.
pub fn run_poll(votes: &[u8]) -> Result<(i64, i64)> {
    run_poll_with(&PollConfig::default(), votes, &mut OsRng)
}

pub fn run_poll_with<R: RngCore + CryptoRng>(
    config: &PollConfig,
    votes: &[u8],
    rng: &mut R,
) -> Result<(i64, i64)> {
    if config.authorities == 0 {
        return Err(Error::Argument("poll needs at least one authority".to_string()));
    }
    let window = tally_window(config.window, votes.len())?;
    let params = GroupParameters::setup_with_window(window);

    let authorities: Vec<Authority> = (1..=config.authorities)
        .map(|index| Authority::new(&params, index, &mut *rng))
        .collect();
    let pub_keys: Vec<PublicKey> = authorities.iter().map(|a| *a.public_key()).collect();
    let pk = aggregate_group_key(&pub_keys)?;
    debug!(authorities = authorities.len(), "group key aggregated");

    let encrypted = votes
        .iter()
        .map(|&v| encode_vote(&params, &pk, v, &mut *rng))
        .collect::<Result<Vec<_>>>()?;
    let total = tally(&params, &pk, &encrypted)?;
    debug!(ballots = encrypted.len(), "ballots tallied");

    let zeros = threshold_decrypt(&params, &authorities, &total.for_zero)?;
    let ones = threshold_decrypt(&params, &authorities, &total.for_one)?;
    info!(zeros, ones, "poll decrypted");
    Ok((zeros, ones))
}

/// Each tally lies in `[0, voters]`, so the window must reach `voters + 1`.
fn tally_window(window: PlaintextWindow, voters: usize) -> Result<PlaintextWindow> {
    let needed = i64::try_from(voters)
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| Error::Argument(format!("too many voters: {voters}")))?;
    if window.max() >= needed {
        return Ok(window);
    }
    debug!(voters, "widening lookup window for tally");
    PlaintextWindow::new(window.min(), needed)
}
