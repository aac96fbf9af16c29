//! Shared setup for services over the in-memory backend

use mygram_auth_core::{AccountService, Argon2Params, AuthConfig, NewAccount};
use mygram_db::{Repositories, UserRow};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Config with a cheap Argon2 work factor so tests stay fast
#[allow(dead_code)]
pub fn fast_config() -> AuthConfig {
    AuthConfig::try_new(TEST_SECRET)
        .expect("test secret is long enough")
        .with_hash_workers(4)
        .with_argon2_params(Argon2Params {
            m_cost: 1024,
            t_cost: 1,
            p_cost: 1,
        })
}

/// Account service and repositories sharing one in-memory store
#[allow(dead_code)]
pub fn test_services() -> (AccountService, Repositories) {
    let repos = Repositories::in_memory();
    let service = AccountService::new(&repos, &fast_config()).expect("valid test config");
    (service, repos)
}

/// Register `name` with `name@example.com`
#[allow(dead_code)]
pub async fn register(service: &AccountService, name: &str, password: &str) -> UserRow {
    service
        .register(NewAccount {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            age: 25,
            password: password.to_string(),
        })
        .await
        .expect("registration succeeds")
}
