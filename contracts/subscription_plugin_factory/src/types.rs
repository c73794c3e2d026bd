//! Factory types: storage keys, errors, and the plugin terms it forwards.
//!
//! The subscription types mirror the plugin contract's own definitions so
//! the values round-trip unchanged through `init`.

use soroban_sdk::{contracterror, contracttype, Address, BytesN, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Algebra pool factory: pool registry and role bookkeeping.
    AlgebraFactory,
    /// Plugin bound to a pool (persistent storage).
    PluginByPool(Address),
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 401,
    /// No pool is registered for the token pair.
    PoolNotExist = 404,
    /// No plugin is bound to the pool.
    PluginNotExist = 405,
    /// The pool already has a plugin.
    PluginAlreadyExists = 409,
    NotInitialized = 1001,
    AlreadyInitialized = 1002,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PrincipalKind {
    Caller = 0,
    Recipient = 1,
    Originator = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessPolicy {
    pub required: Vec<PrincipalKind>,
    pub notify_only: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionConfig {
    pub payment_token: Address,
    pub period_duration: u64,
    pub period_cost: i128,
    pub fees_receiver: Address,
    pub policy: AccessPolicy,
    pub eligibility_root: BytesN<32>,
}
