//! Pool -> plugin bindings and the role gate in front of them.
//!
//! **PRs that only change who may bind plugins, or how, should edit this
//! file only.**

use crate::interfaces::{AlgebraFactoryClient, SubscriptionPluginClient};
use crate::types::{DataKey, Error, SubscriptionConfig};
use soroban_sdk::{Address, Env, Symbol};

/// Role on the Algebra factory required to bind plugins.
pub const POOLS_ADMINISTRATOR_ROLE: &str = "pools_administrator";

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

pub fn do_init(env: &Env, algebra_factory: Address) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::AlgebraFactory) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage()
        .instance()
        .set(&DataKey::AlgebraFactory, &algebra_factory);
    Ok(())
}

pub fn get_algebra_factory(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::AlgebraFactory)
        .ok_or(Error::NotInitialized)
}

fn require_pools_administrator(
    env: &Env,
    algebra: &AlgebraFactoryClient,
    caller: &Address,
) -> Result<(), Error> {
    caller.require_auth();
    let role = Symbol::new(env, POOLS_ADMINISTRATOR_ROLE);
    if !algebra.has_role_or_owner(&role, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn plugin_by_pool(env: &Env, pool: &Address) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::PluginByPool(pool.clone()))
}

/// Bind `plugin` to the existing pool of `(token0, token1)` and hand it its
/// subscription terms. Returns the pool.
pub fn do_create_plugin_for_existing_pool(
    env: &Env,
    caller: Address,
    token0: Address,
    token1: Address,
    plugin: Address,
    config: SubscriptionConfig,
) -> Result<Address, Error> {
    let algebra = AlgebraFactoryClient::new(env, &get_algebra_factory(env)?);
    require_pools_administrator(env, &algebra, &caller)?;

    let pool = algebra
        .pool_by_pair(&token0, &token1)
        .ok_or(Error::PoolNotExist)?;
    if plugin_by_pool(env, &pool).is_some() {
        return Err(Error::PluginAlreadyExists);
    }

    // Fails unless the plugin was deployed with this factory pinned.
    SubscriptionPluginClient::new(env, &plugin).init(&pool, &config);

    let key = DataKey::PluginByPool(pool.clone());
    env.storage().persistent().set(&key, &plugin);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_BUMP_LEDGERS,
        PERSISTENT_BUMP_LEDGERS,
    );
    env.events().publish(
        (Symbol::new(env, "plugin_created"), pool.clone()),
        plugin,
    );
    Ok(pool)
}

/// Activate the plugin bound to `pool` on the factory's authority. Returns
/// the plugin.
pub fn do_initialize_plugin(env: &Env, caller: Address, pool: Address) -> Result<Address, Error> {
    let algebra = AlgebraFactoryClient::new(env, &get_algebra_factory(env)?);
    require_pools_administrator(env, &algebra, &caller)?;

    let plugin = plugin_by_pool(env, &pool).ok_or(Error::PluginNotExist)?;
    SubscriptionPluginClient::new(env, &plugin).initialize(&env.current_contract_address());

    env.events().publish(
        (Symbol::new(env, "plugin_initialized"), pool),
        plugin.clone(),
    );
    Ok(plugin)
}
