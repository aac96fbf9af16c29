//! Property-based tests for the credential store
//!
//! Argon2 is deliberately slow, so case counts are kept small.

mod common;

use std::sync::Arc;

use mygram_auth_core::{AuthError, CredentialStore};
use mygram_db::{CreateUser, Repositories};
use mygram_types::UserId;
use proptest::prelude::*;

use common::fast_config;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn store_with_user() -> (CredentialStore, UserId) {
    let repos = Repositories::in_memory();
    let user = repos
        .users
        .create(CreateUser {
            id: uuid::Uuid::new_v4(),
            username: "prop".to_string(),
            email: "prop@example.com".to_string(),
            age: 30,
        })
        .await
        .unwrap();
    let store = CredentialStore::new(Arc::clone(&repos.credentials), &fast_config()).unwrap();
    (store, user.user_id())
}

/// Passwords that satisfy the six-character policy, including non-ASCII ones
fn arb_password() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9!@#$%^&*]{6,40}",
        "\\PC{6,20}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: a password verifies right after it is stored
    #[test]
    fn created_password_verifies(password in arb_password()) {
        let rt = runtime();
        let verified = rt.block_on(async {
            let (store, user) = store_with_user().await;
            store.create(user, &password).await.unwrap();
            store.verify(user, &password).await.unwrap()
        });
        prop_assert!(verified);
    }

    /// Property: any other password is rejected
    #[test]
    fn different_password_rejected(p1 in arb_password(), p2 in arb_password()) {
        prop_assume!(p1 != p2);
        let rt = runtime();
        let verified = rt.block_on(async {
            let (store, user) = store_with_user().await;
            store.create(user, &p1).await.unwrap();
            store.verify(user, &p2).await.unwrap()
        });
        prop_assert!(!verified);
    }

    /// Property: anything shorter than six characters is a weak credential
    #[test]
    fn short_passwords_rejected(password in "\\PC{0,5}") {
        let rt = runtime();
        let result = rt.block_on(async {
            let (store, user) = store_with_user().await;
            store.create(user, &password).await
        });
        let is_weak = matches!(result, Err(AuthError::WeakCredential { min: 6 }));
        prop_assert!(is_weak);
    }
}

#[tokio::test]
async fn concurrent_verifications_are_independent() {
    let (store, user) = store_with_user().await;
    store.create(user, "secret1").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let candidate = if i % 2 == 0 { "secret1" } else { "secret2" };
            (i, store.verify(user, candidate).await.unwrap())
        }));
    }
    for handle in handles {
        let (i, ok) = handle.await.unwrap();
        assert_eq!(ok, i % 2 == 0);
    }
}
