//! Subscription ledger: principal -> paid-through timestamp.
//!
//! Only the payment path writes here; the gate and queries read.

use crate::types::{DataKey, Error};
use soroban_sdk::{Address, Env};

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Paid-through timestamp of `principal`. Principals that never paid read
/// as `0`.
pub fn current_expiry(env: &Env, principal: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Subscription(principal.clone()))
        .unwrap_or(0)
}

pub fn is_active(env: &Env, principal: &Address, now: u64) -> bool {
    current_expiry(env, principal) > now
}

/// New paid-through after adding `duration` to a subscription that is paid
/// through `current`.
///
/// The period starts from whichever is later, `now` or `current`: an expired
/// subscription restarts from `now`, a live one stacks on the time left.
pub fn extended_expiry(current: u64, now: u64, duration: u64) -> Result<u64, Error> {
    current
        .max(now)
        .checked_add(duration)
        .ok_or(Error::Overflow)
}

/// Extend `principal` by `duration` seconds and return the new paid-through.
pub fn extend(env: &Env, principal: &Address, duration: u64, now: u64) -> Result<u64, Error> {
    let new_expiry = extended_expiry(current_expiry(env, principal), now, duration)?;

    let key = DataKey::Subscription(principal.clone());
    env.storage().persistent().set(&key, &new_expiry);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_BUMP_LEDGERS,
        PERSISTENT_BUMP_LEDGERS,
    );
    Ok(new_expiry)
}
