// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{rescan_settings, ScriptedProbe, TestHarness};
use odgate::application::dto::submit_request::RescanRequestDto;
use odgate::application::usecases::rescan_website::RescanWebsiteUseCase;
use odgate::config::settings::{RescanPolicy, RescanSettings};
use odgate::domain::models::outcome::{RejectionReason, RescanOutcome, ValidationOutcome};
use odgate::domain::models::website::WebsiteStatus;
use odgate::domain::repositories::blacklist_repository::BlacklistRepository;
use odgate::queue::task_queue::TaskQueue;

fn reason_of(outcome: ValidationOutcome) -> RejectionReason {
    match outcome {
        ValidationOutcome::Rejected { reason, .. } => reason,
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submission_normalizes_registers_and_enqueues() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    let outcome = harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Accepted { website_id: 1 });

    let websites = harness.websites.snapshot();
    assert_eq!(websites.len(), 1);
    assert_eq!(websites[0].url, "http://example.com/files/");
    assert_eq!(websites[0].status, WebsiteStatus::Pending);
    assert_eq!(websites[0].submitter_fingerprint, "10.0.0.1");

    let task = harness.queue.try_dequeue().await.unwrap().unwrap();
    assert_eq!(task.website_id, 1);
    assert_eq!(task.url, "http://example.com/files/");
    assert_eq!(task.priority, 1);
}

#[tokio::test]
async fn test_resubmission_rejected_as_duplicate() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();
    let outcome = harness
        .service
        .admit("http://example.com/files/", "10.0.0.2")
        .await
        .unwrap();

    assert_eq!(reason_of(outcome), RejectionReason::AlreadyRegistered);
    assert_eq!(harness.websites.snapshot().len(), 1);
    assert_eq!(harness.queue.len(), 1);
}

#[tokio::test]
async fn test_subdirectory_of_registered_site_rejected() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();
    let outcome = harness
        .service
        .admit("http://example.com/files/sub/", "10.0.0.1")
        .await
        .unwrap();

    assert_eq!(reason_of(outcome), RejectionReason::ParentRegistered);
    assert_eq!(harness.websites.snapshot().len(), 1);
}

#[tokio::test]
async fn test_blacklisted_submission_rejected() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    harness.blacklist.add("http://spam.example.com/").await.unwrap();

    let outcome = harness
        .service
        .admit("http://spam.example.com/warez", "10.0.0.1")
        .await
        .unwrap();

    assert_eq!(reason_of(outcome), RejectionReason::Blacklisted);
    assert!(harness.websites.snapshot().is_empty());
    assert_eq!(harness.queue.len(), 0);
}

#[tokio::test]
async fn test_probe_negative_leaves_no_trace() {
    let harness = TestHarness::new(ScriptedProbe::Always(false));

    let outcome = harness
        .service
        .admit("http://example.com/blog", "10.0.0.1")
        .await
        .unwrap();

    assert_eq!(reason_of(outcome), RejectionReason::NotOpenDirectory);
    assert!(harness.websites.snapshot().is_empty());
    assert_eq!(harness.queue.len(), 0);
}

#[tokio::test]
async fn test_concurrent_duplicate_submissions_admit_exactly_once() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .admit("http://example.com/files/", &format!("10.0.0.{}", i))
                .await
                .unwrap()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_accepted() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(harness.websites.snapshot().len(), 1);
    assert_eq!(harness.queue.len(), 1);
}

#[tokio::test]
async fn test_concurrent_overlapping_submissions_keep_containment_invariant() {
    // Strict containment closes the child-before-parent window that the
    // default ancestor-only policy leaves open.
    let mut settings = crate::helpers::admission_settings();
    settings.strict_containment = true;
    let harness = TestHarness::with_settings(ScriptedProbe::Always(true), settings);

    let urls = [
        "http://example.com/a/",
        "http://example.com/a/b/",
        "http://example.com/a/b/c/",
    ];
    let mut handles = Vec::new();
    for url in urls {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            service.admit(url, "10.0.0.1").await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let websites = harness.websites.snapshot();
    for a in &websites {
        for b in &websites {
            if a.id != b.id {
                assert!(
                    !b.url.starts_with(&a.url),
                    "containment violation: {} covers {}",
                    a.url,
                    b.url
                );
            }
        }
    }
}

#[tokio::test]
async fn test_parent_of_registered_site_admitted_under_default_policy() {
    // Only the ancestor direction is checked by default; submitting a
    // parent of an existing, more specific site is allowed.
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    harness
        .service
        .admit("http://example.com/files/sub/", "10.0.0.1")
        .await
        .unwrap();
    let outcome = harness
        .service
        .admit("http://example.com/files/", "10.0.0.1")
        .await
        .unwrap();

    assert!(outcome.is_accepted());
    assert_eq!(harness.websites.snapshot().len(), 2);
}

#[tokio::test]
async fn test_parent_of_registered_site_rejected_in_strict_mode() {
    let mut settings = crate::helpers::admission_settings();
    settings.strict_containment = true;
    let harness = TestHarness::with_settings(ScriptedProbe::Always(true), settings);

    harness
        .service
        .admit("http://example.com/files/sub/", "10.0.0.1")
        .await
        .unwrap();
    let outcome = harness
        .service
        .admit("http://example.com/files/", "10.0.0.1")
        .await
        .unwrap();

    assert_eq!(reason_of(outcome), RejectionReason::ChildRegistered);
    assert_eq!(harness.websites.snapshot().len(), 1);
}

#[tokio::test]
async fn test_rescan_with_lower_priority_value_dequeues_first() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();
    assert_eq!(harness.queue.len(), 1);

    let rescan = RescanWebsiteUseCase::new(
        harness.websites.clone(),
        harness.queue.clone(),
        rescan_settings(),
        1,
    );
    let outcome = rescan
        .execute(RescanRequestDto {
            website_id: 1,
            priority: Some(0),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, RescanOutcome::Enqueued(_)));

    // The rescan was enqueued last but carries the smaller priority value.
    let first = harness.queue.try_dequeue().await.unwrap().unwrap();
    assert_eq!(first.priority, 0);
    let second = harness.queue.try_dequeue().await.unwrap().unwrap();
    assert_eq!(second.priority, 1);
}

#[tokio::test]
async fn test_rescan_unknown_website_rejected() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));

    let rescan = RescanWebsiteUseCase::new(
        harness.websites.clone(),
        harness.queue.clone(),
        rescan_settings(),
        1,
    );
    let outcome = rescan
        .execute(RescanRequestDto {
            website_id: 404,
            priority: None,
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        RescanOutcome::Rejected {
            reason: RejectionReason::WebsiteNotFound,
            ..
        }
    ));
    assert_eq!(harness.queue.len(), 0);
}

#[tokio::test]
async fn test_rescan_negative_priority_rejected() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();

    let rescan = RescanWebsiteUseCase::new(
        harness.websites.clone(),
        harness.queue.clone(),
        rescan_settings(),
        1,
    );
    let outcome = rescan
        .execute(RescanRequestDto {
            website_id: 1,
            priority: Some(-5),
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        RescanOutcome::Rejected {
            reason: RejectionReason::InvalidPriority,
            ..
        }
    ));
}

#[tokio::test]
async fn test_rescan_suppress_policy_skips_duplicate_task() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();

    let rescan = RescanWebsiteUseCase::new(
        harness.websites.clone(),
        harness.queue.clone(),
        RescanSettings {
            policy: RescanPolicy::Suppress,
        },
        1,
    );
    let outcome = rescan
        .execute(RescanRequestDto {
            website_id: 1,
            priority: Some(0),
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        RescanOutcome::Suppressed { website_id: 1 }
    ));
    assert_eq!(harness.queue.len(), 1);
}

#[tokio::test]
async fn test_rescan_always_add_policy_allows_coexisting_tasks() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    harness
        .service
        .admit("http://example.com/files", "10.0.0.1")
        .await
        .unwrap();

    let rescan = RescanWebsiteUseCase::new(
        harness.websites.clone(),
        harness.queue.clone(),
        rescan_settings(),
        1,
    );
    rescan
        .execute(RescanRequestDto {
            website_id: 1,
            priority: None,
        })
        .await
        .unwrap();

    assert_eq!(harness.queue.len(), 2);
}
