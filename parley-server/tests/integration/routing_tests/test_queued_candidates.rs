use parley_core::ServerEvent;
use serde_json::json;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{candidates, settle, wait_ms};

#[tokio::test(start_paused = true)]
async fn test_candidate_before_registration_is_delivered_once() {
    init_tracing();
    let relay = create_test_relay();

    let a = relay.join("r1", "u-A").await.unwrap();
    relay
        .candidate(a, "u-B", json!({"candidate": "candidate:1"}))
        .await
        .unwrap();
    settle().await;

    let b = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    let events = relay.events_for(&b).await;
    assert_eq!(
        candidates(&events),
        vec![(json!({"candidate": "candidate:1"}), a)]
    );

    // Queued handshake data comes before any presence for the newcomer.
    let first_candidate = events
        .iter()
        .position(|e| matches!(e, ServerEvent::IceCandidate { .. }))
        .unwrap();
    let first_info = events
        .iter()
        .position(|e| matches!(e, ServerEvent::UserInfo(_)))
        .unwrap();
    assert!(first_candidate < first_info);

    // Re-registering the same connection does not replay the queue.
    relay.register(b, "r1", "u-B").await.unwrap();
    settle().await;
    assert_eq!(candidates(&relay.events_for(&b).await).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_queued_candidates_keep_enqueue_order() {
    init_tracing();
    let relay = create_test_relay();

    let a = relay.join("r1", "u-A").await.unwrap();
    let c = relay.join("r1", "u-C").await.unwrap();
    relay.candidate(a, "u-B", json!("a-1")).await.unwrap();
    relay.candidate(c, "u-B", json!("c-1")).await.unwrap();
    relay.candidate(a, "u-B", json!("a-2")).await.unwrap();
    settle().await;

    let b = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    assert_eq!(
        candidates(&relay.events_for(&b).await),
        vec![(json!("a-1"), a), (json!("c-1"), c), (json!("a-2"), a)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_candidates_expire_when_target_never_shows_up() {
    init_tracing();
    let relay = create_test_relay();

    let a = relay.join("r1", "u-A").await.unwrap();
    relay.candidate(a, "u-B", json!("late")).await.unwrap();
    settle().await;

    wait_ms(61_000).await;

    let b = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    assert!(candidates(&relay.events_for(&b).await).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_candidate_for_closing_connection_waits_for_reconnect() {
    init_tracing();
    let relay = create_test_relay();

    let a = relay.join("r1", "u-A").await.unwrap();
    let b_old = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    // b_old is live, so this one goes out directly.
    relay.candidate(a, "u-B", json!("direct")).await.unwrap();
    settle().await;
    assert_eq!(
        candidates(&relay.events_for(&b_old).await),
        vec![(json!("direct"), a)]
    );

    relay.disconnect(b_old).await.unwrap();
    settle().await;

    // u-B is still bound to the closed connection; the candidate must be kept.
    relay.candidate(a, "u-B", json!("queued")).await.unwrap();
    settle().await;

    let b_new = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    assert_eq!(
        candidates(&relay.events_for(&b_new).await),
        vec![(json!("queued"), a)]
    );
    assert_eq!(candidates(&relay.events_for(&b_old).await).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_purge_timer_spares_newer_queue() {
    init_tracing();
    let relay = create_test_relay();

    let a = relay.join("r1", "u-A").await.unwrap();

    // t=0: first queue for u-B, purge timer due at t=60s.
    relay.candidate(a, "u-B", json!("first")).await.unwrap();
    settle().await;

    // t=30s: u-B registers and drains the first queue, then drops off.
    wait_ms(30_000).await;
    let b_old = relay.join("r1", "u-B").await.unwrap();
    settle().await;
    relay.disconnect(b_old).await.unwrap();
    settle().await;

    // t=40s: second queue for u-B, purge due at t=100s.
    wait_ms(10_000).await;
    relay.candidate(a, "u-B", json!("second")).await.unwrap();
    settle().await;

    // t=70s: the first timer has fired; the second queue must survive it.
    wait_ms(30_000).await;
    let b_new = relay.join("r1", "u-B").await.unwrap();
    settle().await;

    assert_eq!(
        candidates(&relay.events_for(&b_old).await),
        vec![(json!("first"), a)]
    );
    assert_eq!(
        candidates(&relay.events_for(&b_new).await),
        vec![(json!("second"), a)]
    );
}
