use crate::{
    AccessPolicy, Error, PrincipalKind, SubscriptionConfig, SubscriptionPluginFactory,
    SubscriptionPluginFactoryClient, POOLS_ADMINISTRATOR_ROLE,
};
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{
    contract, contractimpl, contracttype, vec, Address, BytesN, Env, Symbol, TryFromVal,
};

// ============== Collaborator stubs ==============

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Role(Symbol, Address),
    Pool(Address, Address),
    BoundFactory,
    BoundPool,
    BoundConfig,
    Activator,
}

/// Algebra pool factory stand-in: role grants and a pair -> pool table.
#[contract]
pub struct MockAlgebraFactory;

#[contractimpl]
impl MockAlgebraFactory {
    pub fn grant_role(env: Env, role: Symbol, account: Address) {
        env.storage()
            .instance()
            .set(&MockKey::Role(role, account), &true);
    }

    pub fn stub_pool(env: Env, token0: Address, token1: Address, pool: Address) {
        env.storage()
            .instance()
            .set(&MockKey::Pool(token0, token1), &pool);
    }

    pub fn has_role_or_owner(env: Env, role: Symbol, account: Address) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Role(role, account))
            .unwrap_or(false)
    }

    pub fn pool_by_pair(env: Env, token0: Address, token1: Address) -> Option<Address> {
        env.storage().instance().get(&MockKey::Pool(token0, token1))
    }
}

/// Records what the factory hands to a plugin.
#[contract]
pub struct MockPlugin;

#[contractimpl]
impl MockPlugin {
    pub fn __constructor(env: Env, factory: Address) {
        env.storage().instance().set(&MockKey::BoundFactory, &factory);
    }

    pub fn init(env: Env, pool: Address, config: SubscriptionConfig) {
        Self::get_factory(env.clone()).require_auth();
        env.storage().instance().set(&MockKey::BoundPool, &pool);
        env.storage().instance().set(&MockKey::BoundConfig, &config);
    }

    pub fn initialize(env: Env, caller: Address) {
        caller.require_auth();
        env.storage().instance().set(&MockKey::Activator, &caller);
    }

    pub fn activator(env: Env) -> Option<Address> {
        env.storage().instance().get(&MockKey::Activator)
    }

    pub fn get_factory(env: Env) -> Address {
        env.storage().instance().get(&MockKey::BoundFactory).unwrap()
    }

    pub fn get_pool(env: Env) -> Address {
        env.storage().instance().get(&MockKey::BoundPool).unwrap()
    }

    pub fn get_config(env: Env) -> SubscriptionConfig {
        env.storage().instance().get(&MockKey::BoundConfig).unwrap()
    }
}

// ============== Fixtures ==============

struct Fixture<'a> {
    factory: SubscriptionPluginFactoryClient<'a>,
    algebra: MockAlgebraFactoryClient<'a>,
    admin: Address,
    token0: Address,
    token1: Address,
    pool: Address,
}

fn setup(env: &Env) -> Fixture<'_> {
    env.mock_all_auths();

    let algebra = MockAlgebraFactoryClient::new(env, &env.register(MockAlgebraFactory, ()));
    let factory = SubscriptionPluginFactoryClient::new(
        env,
        &env.register(SubscriptionPluginFactory, ()),
    );
    factory.init(&algebra.address);

    let admin = Address::generate(env);
    let token0 = Address::generate(env);
    let token1 = Address::generate(env);
    let pool = Address::generate(env);
    algebra.stub_pool(&token0, &token1, &pool);

    Fixture {
        factory,
        algebra,
        admin,
        token0,
        token1,
        pool,
    }
}

fn grant_admin(env: &Env, f: &Fixture) {
    f.algebra
        .grant_role(&Symbol::new(env, POOLS_ADMINISTRATOR_ROLE), &f.admin);
}

/// A plugin deployed with this factory pinned as its constructor argument.
fn deploy_plugin(env: &Env, f: &Fixture) -> Address {
    env.register(MockPlugin, (f.factory.address.clone(),))
}

fn config(env: &Env) -> SubscriptionConfig {
    SubscriptionConfig {
        payment_token: Address::generate(env),
        period_duration: 30 * 24 * 60 * 60,
        period_cost: 100,
        fees_receiver: Address::generate(env),
        policy: AccessPolicy {
            required: vec![env, PrincipalKind::Recipient],
            notify_only: false,
        },
        eligibility_root: BytesN::from_array(env, &[7u8; 32]),
    }
}

// ============== Tests ==============

#[test]
fn test_create_plugin_binds_pool_and_forwards_config() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);
    let plugin = MockPluginClient::new(&env, &deploy_plugin(&env, &f));
    let cfg = config(&env);

    assert_eq!(f.factory.plugin_by_pool(&f.pool), None);
    let pool = f.factory.create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &plugin.address,
        &cfg,
    );

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, f.factory.address);
    let topic = Symbol::try_from_val(&env, &topics.get(0).unwrap()).unwrap();
    assert_eq!(topic, Symbol::new(&env, "plugin_created"));
    assert_eq!(Address::try_from_val(&env, &data).unwrap(), plugin.address);

    assert_eq!(pool, f.pool);
    assert_eq!(f.factory.plugin_by_pool(&f.pool), Some(plugin.address.clone()));
    assert_eq!(plugin.get_factory(), f.factory.address);
    assert_eq!(plugin.get_pool(), f.pool);
    assert_eq!(plugin.get_config(), cfg);
}

#[test]
fn test_create_plugin_requires_pools_administrator() {
    let env = Env::default();
    let f = setup(&env);
    let plugin = deploy_plugin(&env, &f);

    let result = f.factory.try_create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &plugin,
        &config(&env),
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(f.factory.plugin_by_pool(&f.pool), None);
}

#[test]
fn test_create_plugin_for_unknown_pair() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);
    let plugin = deploy_plugin(&env, &f);
    let stray = Address::generate(&env);

    let result = f.factory.try_create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &stray,
        &plugin,
        &config(&env),
    );
    assert_eq!(result, Err(Ok(Error::PoolNotExist)));
}

#[test]
fn test_create_plugin_twice_for_same_pool() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);
    let first = deploy_plugin(&env, &f);
    let second = deploy_plugin(&env, &f);

    f.factory.create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &first,
        &config(&env),
    );
    let result = f.factory.try_create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &second,
        &config(&env),
    );

    assert_eq!(result, Err(Ok(Error::PluginAlreadyExists)));
    assert_eq!(f.factory.plugin_by_pool(&f.pool), Some(first));
}

#[test]
fn test_init_rejects_reinit() {
    let env = Env::default();
    let f = setup(&env);

    assert_eq!(f.factory.get_algebra_factory(), f.algebra.address);
    let other = Address::generate(&env);
    assert_eq!(
        f.factory.try_init(&other),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_create_plugin_before_init() {
    let env = Env::default();
    env.mock_all_auths();
    let factory = SubscriptionPluginFactoryClient::new(
        &env,
        &env.register(SubscriptionPluginFactory, ()),
    );
    let caller = Address::generate(&env);
    let token = Address::generate(&env);

    let result = factory.try_create_plugin_for_existing_pool(
        &caller,
        &token,
        &token,
        &env.register(MockPlugin, (factory.address.clone(),)),
        &config(&env),
    );
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_initialize_plugin_activates_on_factory_authority() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);
    let plugin = MockPluginClient::new(&env, &deploy_plugin(&env, &f));
    f.factory.create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &plugin.address,
        &config(&env),
    );
    assert_eq!(plugin.activator(), None);

    let activated = f.factory.initialize_plugin(&f.admin, &f.pool);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, f.factory.address);
    let topic = Symbol::try_from_val(&env, &topics.get(0).unwrap()).unwrap();
    assert_eq!(topic, Symbol::new(&env, "plugin_initialized"));
    assert_eq!(Address::try_from_val(&env, &data).unwrap(), plugin.address);

    assert_eq!(activated, plugin.address);
    assert_eq!(plugin.activator(), Some(f.factory.address.clone()));
}

#[test]
fn test_initialize_plugin_requires_pools_administrator() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);
    let plugin = MockPluginClient::new(&env, &deploy_plugin(&env, &f));
    f.factory.create_plugin_for_existing_pool(
        &f.admin,
        &f.token0,
        &f.token1,
        &plugin.address,
        &config(&env),
    );

    let outsider = Address::generate(&env);
    assert_eq!(
        f.factory.try_initialize_plugin(&outsider, &f.pool),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(plugin.activator(), None);
}

#[test]
fn test_initialize_plugin_without_binding() {
    let env = Env::default();
    let f = setup(&env);
    grant_admin(&env, &f);

    assert_eq!(
        f.factory.try_initialize_plugin(&f.admin, &f.pool),
        Err(Ok(Error::PluginNotExist))
    );
}
