//! Concurrent verification of the same code

use std::sync::Arc;

use crate::domain::value_objects::RoleType;
use crate::errors::VerificationError;
use crate::repositories::{InMemoryStore, ProfileRepository};
use crate::services::verification::{
    IssueCodeCommand, MockNotifier, VerificationService, VerificationServiceConfig,
};

const ADDRESS: &str = "race@itcelaya.edu.mx";

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_verifies_succeed_exactly_once() {
    let store = InMemoryStore::new();
    store.seed_profile(RoleType::Student, 3, ADDRESS).await;
    let service = Arc::new(VerificationService::new(
        Arc::new(store.clone()),
        Arc::new(MockNotifier::delivering()),
        VerificationServiceConfig::default(),
    ));

    service
        .issue_code(IssueCodeCommand::new(ADDRESS).with_profile_id(3))
        .await
        .unwrap();
    let code = store.requests_for(ADDRESS).await[0].code.clone();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            let code = code.clone();
            tokio::spawn(async move { service.verify_code(ADDRESS, &code).await })
        })
        .collect();

    let mut successes = 0;
    let mut already_used = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(error) => {
                assert_eq!(error.as_verification(), Some(VerificationError::AlreadyUsed));
                already_used += 1;
            }
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(already_used, 15);

    let profile = store.find_by_id(RoleType::Student, 3).await.unwrap().unwrap();
    assert!(profile.verified);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_issues_leave_one_pending() {
    let store = InMemoryStore::new();
    let service = Arc::new(VerificationService::new(
        Arc::new(store.clone()),
        Arc::new(MockNotifier::delivering()),
        VerificationServiceConfig::default(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.issue_code(IssueCodeCommand::new(ADDRESS)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let requests = store.requests_for(ADDRESS).await;
    assert_eq!(requests.len(), 8);
    assert_eq!(requests.iter().filter(|request| !request.used).count(), 1);
    assert!(!requests.last().unwrap().used);
}
