//! Contract types: storage keys, errors, config and the access policy.
//!
//! Kept in a separate module to reduce merge conflicts when editing the
//! ledger, the gate or contract entrypoints.

use soroban_sdk::{contracterror, contracttype, Address, BytesN, Vec};

/// Storage keys. Everything but `Subscription` lives in instance storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Plugin factory pinned at construction.
    Factory,
    /// Pool whose swaps this plugin gates.
    Pool,
    Config,
    /// Set once by `initialize`; absent or `false` means uninitialized.
    Initialized,
    /// Paid-through timestamp of a principal (persistent storage).
    Subscription(Address),
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    InvalidConfig = 400,
    Unauthorized = 401,
    Overflow = 403,
    /// "Subscription is out of date": a required principal has no
    /// unexpired subscription and the policy is not notify-only.
    SubscriptionExpired = 410,
    NotInitialized = 1001,
    AlreadyInitialized = 1002,
    /// Zero periods requested.
    InvalidPeriodCount = 1003,
    /// Subscriber is the null identity.
    InvalidSubscriber = 1004,
    /// Payer's balance or allowance cannot cover the amount due.
    InsufficientFunds = 1005,
}

/// Which identity of an in-flight swap must hold a subscription.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PrincipalKind {
    /// The account that invoked the pool.
    Caller = 0,
    /// The account receiving the swap output.
    Recipient = 1,
    /// The account that signed the outermost transaction.
    Originator = 2,
}

/// Principal-resolution policy.
///
/// Every kind listed in `required` must independently be satisfied. An
/// empty set allows every swap. `notify_only` keeps the evaluation but never
/// blocks.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessPolicy {
    pub required: Vec<PrincipalKind>,
    pub notify_only: bool,
}

impl AccessPolicy {
    pub fn requires(&self, kind: PrincipalKind) -> bool {
        self.required.iter().any(|k| k == kind)
    }
}

/// Subscription terms, fixed at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionConfig {
    /// SEP-41 token subscriptions are paid in.
    pub payment_token: Address,
    /// Seconds covered by one paid period. Must be positive.
    pub period_duration: u64,
    /// Token base units owed per period. Must not be negative.
    pub period_cost: i128,
    /// Receives every subscription payment.
    pub fees_receiver: Address,
    pub policy: AccessPolicy,
    /// Commitment consumed by an external discount/allow-list verifier.
    pub eligibility_root: BytesN<32>,
}
