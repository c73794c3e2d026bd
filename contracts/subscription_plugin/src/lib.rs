#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod gate;
mod ledger;
mod payment;
mod resolver;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use payment::NULL_ACCOUNT;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SubscriptionPlugin;

#[contractimpl]
impl SubscriptionPlugin {
    // ── Lifecycle / Config ───────────────────────────────────────────────

    /// Deploy-time constructor. `factory` is the only account that may
    /// later call [`SubscriptionPlugin::init`].
    pub fn __constructor(env: Env, factory: Address) {
        admin::do_construct(&env, factory)
    }

    /// Bind the plugin to `pool` with its subscription terms. Called once by
    /// the factory pinned at construction.
    ///
    /// The plugin stays uninitialized (every guarded entrypoint returns
    /// [`Error::NotInitialized`]) until [`SubscriptionPlugin::initialize`].
    ///
    /// # Errors
    /// * [`Error::AlreadyInitialized`] - a config is already stored.
    /// * [`Error::InvalidConfig`] - zero `period_duration` or negative
    ///   `period_cost`.
    pub fn init(env: Env, pool: Address, config: SubscriptionConfig) -> Result<(), Error> {
        admin::do_init(&env, pool, config)
    }

    /// Activate the plugin. Only the bound pool or the factory may call this,
    /// and only once.
    pub fn initialize(env: Env, caller: Address) -> Result<(), Error> {
        admin::do_initialize(&env, caller)
    }

    pub fn is_initialized(env: Env) -> bool {
        admin::is_initialized(&env)
    }

    /// Get the subscription terms.
    pub fn get_config(env: Env) -> Result<SubscriptionConfig, Error> {
        admin::get_config(&env)
    }

    /// Get the pool this plugin gates.
    pub fn get_pool(env: Env) -> Result<Address, Error> {
        admin::get_pool(&env)
    }

    pub fn get_factory(env: Env) -> Result<Address, Error> {
        admin::get_factory(&env)
    }

    /// Get the discount/allow-list commitment. Verification happens outside
    /// this contract.
    pub fn get_eligibility_root(env: Env) -> Result<BytesN<32>, Error> {
        admin::get_eligibility_root(&env)
    }

    // ── Payments ─────────────────────────────────────────────────────────

    /// `payer` buys `periods` periods of access for `subscriber`.
    ///
    /// The payer must have approved the plugin to spend
    /// `periods * period_cost` of the payment token. Renewing a live
    /// subscription stacks on the remaining time; renewing a lapsed one
    /// starts from now.
    ///
    /// Returns the subscriber's new paid-through timestamp.
    ///
    /// # Errors
    ///
    /// | Variant | Reason |
    /// |---------|--------|
    /// | `NotInitialized` | Plugin is not active. |
    /// | `InvalidPeriodCount` | `periods` is zero. |
    /// | `InvalidSubscriber` | `subscriber` is the null account. |
    /// | `Overflow` | Cost or duration does not fit. |
    /// | `InsufficientFunds` | Payer balance or allowance is short. |
    pub fn pay_for_subscription(
        env: Env,
        payer: Address,
        periods: u32,
        subscriber: Address,
    ) -> Result<u64, Error> {
        payment::do_pay_for_subscription(&env, payer, periods, subscriber)
    }

    /// Amount of payment token owed for `periods` periods.
    pub fn quote(env: Env, periods: u32) -> Result<i128, Error> {
        payment::do_quote(&env, periods)
    }

    // ── Access gate ──────────────────────────────────────────────────────

    /// Pool hook invoked before every swap. Fails with
    /// [`Error::SubscriptionExpired`] when a principal required by the
    /// policy is not subscribed, which aborts the swap.
    pub fn before_swap(
        env: Env,
        sender: Address,
        recipient: Address,
        originator: Address,
    ) -> Result<(), Error> {
        gate::do_before_swap(&env, sender, recipient, originator)
    }

    /// Read-only evaluation of the gate for the given identities.
    pub fn check_access(
        env: Env,
        caller: Address,
        recipient: Address,
        originator: Address,
    ) -> Result<bool, Error> {
        gate::check_access(&env, &caller, &recipient, &originator)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Paid-through timestamp of `principal`, `0` if it never subscribed.
    pub fn get_expiry(env: Env, principal: Address) -> u64 {
        ledger::current_expiry(&env, &principal)
    }

    pub fn is_subscribed(env: Env, principal: Address) -> bool {
        ledger::is_active(&env, &principal, env.ledger().timestamp())
    }
}
