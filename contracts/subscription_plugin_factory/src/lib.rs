#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod interfaces;
mod registry;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use interfaces::{AlgebraFactoryInterface, SubscriptionPluginInterface};
pub use registry::POOLS_ADMINISTRATOR_ROLE;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SubscriptionPluginFactory;

#[contractimpl]
impl SubscriptionPluginFactory {
    /// Initialize the factory with the Algebra pool factory it resolves
    /// pools and roles against.
    pub fn init(env: Env, algebra_factory: Address) -> Result<(), Error> {
        registry::do_init(&env, algebra_factory)
    }

    pub fn get_algebra_factory(env: Env) -> Result<Address, Error> {
        registry::get_algebra_factory(&env)
    }

    /// Bind a subscription plugin to the existing pool of `(token0, token1)`.
    ///
    /// `caller` must hold the pools administrator role on the Algebra
    /// factory. `plugin` must have been deployed with this factory as its
    /// constructor argument. The plugin receives `config` through its `init`
    /// and still has to be initialized by the pool or
    /// [`SubscriptionPluginFactory::initialize_plugin`] before it gates
    /// swaps.
    ///
    /// # Errors
    ///
    /// | Variant | Reason |
    /// |---------|--------|
    /// | `NotInitialized` | Factory has no Algebra factory yet. |
    /// | `Unauthorized` | `caller` lacks the role. |
    /// | `PoolNotExist` | No pool for the pair. |
    /// | `PluginAlreadyExists` | The pool already has a plugin. |
    pub fn create_plugin_for_existing_pool(
        env: Env,
        caller: Address,
        token0: Address,
        token1: Address,
        plugin: Address,
        config: SubscriptionConfig,
    ) -> Result<Address, Error> {
        registry::do_create_plugin_for_existing_pool(&env, caller, token0, token1, plugin, config)
    }

    /// Activate the plugin bound to `pool`. Returns the plugin.
    ///
    /// # Errors
    ///
    /// | Variant | Reason |
    /// |---------|--------|
    /// | `NotInitialized` | Factory has no Algebra factory yet. |
    /// | `Unauthorized` | `caller` lacks the role. |
    /// | `PluginNotExist` | No plugin is bound to `pool`. |
    pub fn initialize_plugin(env: Env, caller: Address, pool: Address) -> Result<Address, Error> {
        registry::do_initialize_plugin(&env, caller, pool)
    }

    /// Plugin bound to `pool`, if any.
    pub fn plugin_by_pool(env: Env, pool: Address) -> Option<Address> {
        registry::plugin_by_pool(&env, &pool)
    }
}

#[cfg(test)]
mod test;
