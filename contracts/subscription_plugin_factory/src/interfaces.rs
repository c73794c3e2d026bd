//! Clients for the contracts the factory talks to.

use crate::types::SubscriptionConfig;
use soroban_sdk::{contractclient, Address, Env, Symbol};

/// Pool registry and role checks of the Algebra pool factory.
#[contractclient(name = "AlgebraFactoryClient")]
pub trait AlgebraFactoryInterface {
    fn has_role_or_owner(env: Env, role: Symbol, account: Address) -> bool;
    fn pool_by_pair(env: Env, token0: Address, token1: Address) -> Option<Address>;
}

/// The part of the subscription plugin the factory drives.
#[contractclient(name = "SubscriptionPluginClient")]
pub trait SubscriptionPluginInterface {
    fn init(env: Env, pool: Address, config: SubscriptionConfig);
    fn initialize(env: Env, caller: Address);
}
