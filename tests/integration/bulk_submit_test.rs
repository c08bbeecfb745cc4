// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{bulk_settings, ScriptedProbe, TestHarness};
use odgate::application::dto::submit_request::{BulkSubmitRequestDto, SubmissionMeta};
use odgate::application::usecases::submit_bulk::SubmitBulkUseCase;
use odgate::domain::models::outcome::{BatchReceipt, BulkOutcome, RejectionReason};
use odgate::domain::repositories::blacklist_repository::BlacklistRepository;
use odgate::queue::task_queue::TaskQueue;

fn request(urls: Vec<String>) -> BulkSubmitRequestDto {
    BulkSubmitRequestDto {
        urls,
        meta: SubmissionMeta {
            remote_addr: "10.0.0.1".to_string(),
            forwarded_for: None,
            user_agent: None,
        },
    }
}

#[tokio::test]
async fn test_empty_batch_rejected_wholesale() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), bulk_settings());

    let outcome = bulk.execute(request(Vec::new())).await;

    assert!(matches!(
        outcome,
        BulkOutcome::Rejected {
            reason: RejectionReason::TooManyUrls,
            ..
        }
    ));
    assert!(harness.websites.snapshot().is_empty());
    assert_eq!(harness.queue.len(), 0);
}

#[tokio::test]
async fn test_oversized_batch_rejected_with_no_side_effects() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), bulk_settings());

    let urls: Vec<String> = (0..1500)
        .map(|i| format!("http://site{}.example.com/", i))
        .collect();
    let outcome = bulk.execute(request(urls)).await;

    assert!(matches!(
        outcome,
        BulkOutcome::Rejected {
            reason: RejectionReason::TooManyUrls,
            ..
        }
    ));
    assert!(harness.websites.snapshot().is_empty());
    assert_eq!(harness.queue.len(), 0);
}

#[tokio::test]
async fn test_batch_at_upper_bound_accepted() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    let mut settings = bulk_settings();
    settings.max_urls = 10;
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), settings);

    let urls: Vec<String> = (0..10)
        .map(|i| format!("http://site{}.example.com/", i))
        .collect();
    let outcome = bulk.execute(request(urls)).await;

    assert_eq!(
        outcome,
        BulkOutcome::Submitted(BatchReceipt { submitted: 10 })
    );
    assert_eq!(harness.websites.snapshot().len(), 10);
    assert_eq!(harness.queue.len(), 10);
}

#[tokio::test]
async fn test_failing_item_does_not_abort_siblings() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    harness
        .blacklist
        .add("http://spam.example.com/")
        .await
        .unwrap();
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), bulk_settings());

    let outcome = bulk
        .execute(request(vec![
            "http://good1.example.com/files".to_string(),
            "http://spam.example.com/warez/".to_string(),
            "not a url at all".to_string(),
            "http://good2.example.com/files".to_string(),
        ]))
        .await;

    // The receipt acknowledges the whole batch regardless of outcomes.
    assert_eq!(
        outcome,
        BulkOutcome::Submitted(BatchReceipt { submitted: 4 })
    );

    let urls: Vec<String> = harness
        .websites
        .snapshot()
        .into_iter()
        .map(|website| website.url)
        .collect();
    assert_eq!(urls.len(), 2);
    assert!(urls.contains(&"http://good1.example.com/files/".to_string()));
    assert!(urls.contains(&"http://good2.example.com/files/".to_string()));
    assert_eq!(harness.queue.len(), 2);
}

#[tokio::test]
async fn test_duplicate_urls_within_batch_admitted_once() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), bulk_settings());

    let outcome = bulk
        .execute(request(vec![
            "http://example.com/files".to_string();
            6
        ]))
        .await;

    assert_eq!(
        outcome,
        BulkOutcome::Submitted(BatchReceipt { submitted: 6 })
    );
    assert_eq!(harness.websites.snapshot().len(), 1);
    assert_eq!(harness.queue.len(), 1);
}

#[tokio::test]
async fn test_batch_is_fully_drained_before_returning() {
    let harness = TestHarness::new(ScriptedProbe::Always(true));
    let mut settings = bulk_settings();
    settings.workers = 2;
    let bulk = SubmitBulkUseCase::new(harness.service.clone(), settings);

    let urls: Vec<String> = (0..20)
        .map(|i| format!("http://site{}.example.com/", i))
        .collect();
    bulk.execute(request(urls)).await;

    // Every worker must have finished by the time the call returns.
    assert_eq!(harness.websites.snapshot().len(), 20);
    assert_eq!(harness.queue.len(), 20);
}
