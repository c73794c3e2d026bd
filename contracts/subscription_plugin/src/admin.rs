//! Lifecycle and config: construction, init, initialize, getters.
//!
//! **PRs that only change construction or the uninitialized -> active
//! transition should edit this file only.**

use crate::types::{DataKey, Error, SubscriptionConfig};
use soroban_sdk::{Address, BytesN, Env, Symbol};

pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Pin the plugin factory. Runs once, as part of deployment, so no one but
/// that factory can later call [`do_init`].
pub fn do_construct(env: &Env, factory: Address) {
    env.storage().instance().set(&DataKey::Factory, &factory);
    bump_instance(env);
}

/// Store the pool and the subscription terms. Only the pinned factory may
/// call this. The plugin stays uninitialized until [`do_initialize`].
pub fn do_init(env: &Env, pool: Address, config: SubscriptionConfig) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Config) {
        return Err(Error::AlreadyInitialized);
    }
    get_factory(env)?.require_auth();

    if config.period_duration == 0 || config.period_cost < 0 {
        return Err(Error::InvalidConfig);
    }

    env.storage().instance().set(&DataKey::Pool, &pool);
    env.storage().instance().set(&DataKey::Config, &config);
    env.storage().instance().set(&DataKey::Initialized, &false);
    bump_instance(env);
    Ok(())
}

/// One-shot uninitialized -> active transition, restricted to the pool or
/// the factory.
pub fn do_initialize(env: &Env, caller: Address) -> Result<(), Error> {
    let pool = get_pool(env)?;
    let factory = get_factory(env)?;
    caller.require_auth();
    if caller != pool && caller != factory {
        return Err(Error::Unauthorized);
    }
    if is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }

    env.storage().instance().set(&DataKey::Initialized, &true);
    bump_instance(env);
    env.events()
        .publish((Symbol::new(env, "initialized"),), caller);
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

/// Returns the config if the plugin is active, `Error::NotInitialized`
/// otherwise. Call this at the top of every guarded function.
pub fn require_initialized(env: &Env) -> Result<SubscriptionConfig, Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    get_config(env)
}

pub fn get_config(env: &Env) -> Result<SubscriptionConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn get_pool(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Pool)
        .ok_or(Error::NotInitialized)
}

pub fn get_factory(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Factory)
        .ok_or(Error::NotInitialized)
}

pub fn get_eligibility_root(env: &Env) -> Result<BytesN<32>, Error> {
    Ok(get_config(env)?.eligibility_root)
}
