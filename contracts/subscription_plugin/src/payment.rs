//! Payment processor: pay_for_subscription and quote.
//!
//! **PRs that only change how subscriptions are priced or settled should
//! edit this file only.**

use crate::admin::{bump_instance, require_initialized};
use crate::ledger;
use crate::types::Error;
use soroban_sdk::{token::TokenClient, Address, Env, String, Symbol};

/// Strkey of the all-zero ed25519 account, treated as the null identity.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn is_null_identity(env: &Env, principal: &Address) -> bool {
    *principal == Address::from_string(&String::from_str(env, NULL_ACCOUNT))
}

/// Token units owed for `periods` periods at `period_cost` each.
pub fn amount_due(period_cost: i128, periods: u32) -> Result<i128, Error> {
    period_cost
        .checked_mul(i128::from(periods))
        .ok_or(Error::Overflow)
}

/// Seconds of access bought by `periods` periods.
pub fn period_extension(period_duration: u64, periods: u32) -> Result<u64, Error> {
    period_duration
        .checked_mul(u64::from(periods))
        .ok_or(Error::Overflow)
}

pub fn do_quote(env: &Env, periods: u32) -> Result<i128, Error> {
    let config = require_initialized(env)?;
    if periods == 0 {
        return Err(Error::InvalidPeriodCount);
    }
    amount_due(config.period_cost, periods)
}

/// Extend `subscriber` by `periods` periods, charging `payer`.
///
/// # Guarantees
/// - `payer` bears the full cost even when paying on behalf of someone else.
/// - Funds are checked before the ledger is touched; a failed transfer
///   aborts the invocation so no extension survives without payment.
/// - Emits `pay_for_subscription` with `(periods, payer, subscriber,
///   amount_paid)` and returns the new paid-through timestamp.
pub fn do_pay_for_subscription(
    env: &Env,
    payer: Address,
    periods: u32,
    subscriber: Address,
) -> Result<u64, Error> {
    let config = require_initialized(env)?;
    payer.require_auth();

    if periods == 0 {
        return Err(Error::InvalidPeriodCount);
    }
    if is_null_identity(env, &subscriber) {
        return Err(Error::InvalidSubscriber);
    }

    let amount = amount_due(config.period_cost, periods)?;
    let extension = period_extension(config.period_duration, periods)?;

    let token = TokenClient::new(env, &config.payment_token);
    let plugin = env.current_contract_address();
    if amount > 0
        && (token.balance(&payer) < amount || token.allowance(&payer, &plugin) < amount)
    {
        return Err(Error::InsufficientFunds);
    }

    let now = env.ledger().timestamp();
    let new_expiry = ledger::extend(env, &subscriber, extension, now)?;

    if amount > 0 {
        token.transfer_from(&plugin, &payer, &config.fees_receiver, &amount);
    }

    bump_instance(env);
    env.events().publish(
        (Symbol::new(env, "pay_for_subscription"),),
        (periods, payer, subscriber, amount),
    );
    Ok(new_expiry)
}
