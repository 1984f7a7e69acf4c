//! Shared setup for the route tests

use std::sync::Arc;

use actix_web::web;

use ss_api::AppState;
use ss_core::{
    InMemoryStore, MockNotifier, RegistrationService, VerificationService,
    VerificationServiceConfig,
};

/// Minimum bcrypt cost keeps registration tests fast
pub const TEST_HASH_COST: u32 = 4;

pub type TestState = AppState<InMemoryStore, InMemoryStore, MockNotifier>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub store: InMemoryStore,
    pub notifier: Arc<MockNotifier>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(VerificationServiceConfig::default())
}

pub fn create_test_context_with(config: VerificationServiceConfig) -> TestContext {
    let store = InMemoryStore::new();
    let shared = Arc::new(store.clone());
    let notifier = Arc::new(MockNotifier::delivering());

    let verification_service = Arc::new(VerificationService::new(
        shared.clone(),
        notifier.clone(),
        config,
    ));
    let registration_service = Arc::new(RegistrationService::new(
        shared,
        verification_service.clone(),
        TEST_HASH_COST,
    ));

    TestContext {
        state: web::Data::new(AppState::new(verification_service, registration_service)),
        store,
        notifier,
    }
}

/// Code of the most recent request stored for an address
pub async fn latest_code(store: &InMemoryStore, address: &str) -> String {
    store
        .requests_for(address)
        .await
        .last()
        .map(|request| request.code.clone())
        .expect("a code was issued")
}
