//! Access gate: runs synchronously right before the pool executes a swap.
//!
//! **PRs that only change how swaps are allowed or blocked should edit this
//! file only.**

use crate::admin::{get_pool, require_initialized};
use crate::ledger;
use crate::resolver::resolve;
use crate::types::Error;
use soroban_sdk::{Address, Env, Symbol};

/// Evaluate the access policy for one swap at the current ledger time.
///
/// Returns `true` when every required principal is subscribed. A failed
/// requirement is an `Error::SubscriptionExpired` unless the policy is
/// notify-only, in which case this returns `false` and the swap may proceed.
pub fn check_access(
    env: &Env,
    caller: &Address,
    recipient: &Address,
    originator: &Address,
) -> Result<bool, Error> {
    let config = require_initialized(env)?;
    let now = env.ledger().timestamp();

    let required = resolve(env, &config.policy, caller, recipient, originator);
    let satisfied = required
        .iter()
        .all(|principal| ledger::is_active(env, &principal, now));

    if !satisfied && !config.policy.notify_only {
        return Err(Error::SubscriptionExpired);
    }
    Ok(satisfied)
}

/// Pool hook. Only the bound pool may call it.
pub fn do_before_swap(
    env: &Env,
    sender: Address,
    recipient: Address,
    originator: Address,
) -> Result<(), Error> {
    let config = require_initialized(env)?;
    get_pool(env)?.require_auth();

    let satisfied = check_access(env, &sender, &recipient, &originator)?;
    if config.policy.notify_only {
        env.events().publish(
            (Symbol::new(env, "access_observed"),),
            (sender, recipient, originator, satisfied),
        );
    }
    Ok(())
}
