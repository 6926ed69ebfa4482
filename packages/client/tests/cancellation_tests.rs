//! Cancellation and input rejection of hostname connect operations

mod common;

use std::io;
use std::time::Duration;

use tokio::time::Instant;
use tokio_test::{assert_pending, assert_ready_err, task};

use common::{
    Plan, ScriptedConnector, ScriptedResolver, Step, assert_at, endpoint, ms, resolved, v4,
};
use hostdial_client::{AddressFamilies, ConnectError, ConnectParams};

fn hanging_resolution() -> ScriptedResolver {
    ScriptedResolver::new(vec![Step::Address(ms(0), resolved(v4(1)))])
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_flight_reaches_everything_once() {
    let resolver = ScriptedResolver::new(vec![
        Step::Address(ms(0), resolved(v4(1))),
        Step::Address(ms(10), resolved(v4(2))),
    ]);
    let resolutions = resolver.log();
    let connector = ScriptedConnector::new();
    let attempts = connector.log();
    let endpoint = endpoint(resolver, connector, ms(300));

    let t0 = Instant::now();
    let connecting = endpoint.connect("cancel.example", common::PORT);
    let cancel = connecting.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(ms(100)).await;
        cancel.cancel();
    });

    let err = connecting.await.expect_err("operation was cancelled");
    match &err {
        ConnectError::Cancelled { hostname, port } => {
            assert_eq!(hostname, "cancel.example");
            assert_eq!(*port, common::PORT);
        }
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert!(err.is_cancelled());
    assert_at(t0, Instant::now(), ms(100));

    // One attempt in flight, one candidate still queued.
    assert_eq!(attempts.started_addrs(), vec![v4(1)]);
    assert_eq!(attempts.cancelled(), 1);
    assert_eq!(resolutions.cancelled(), 1);

    // The queued candidate never starts.
    tokio::time::sleep(ms(1_000)).await;
    assert_eq!(attempts.starts().len(), 1);

    let stats = endpoint.stats();
    assert_eq!(stats.operations_cancelled, 1);
    assert_eq!(stats.attempts_cancelled, 1);
    assert_eq!(stats.operations_in_progress(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_idempotent() {
    let resolver = hanging_resolution();
    let resolutions = resolver.log();
    let connector = ScriptedConnector::new();
    let attempts = connector.log();
    let endpoint = endpoint(resolver, connector, ms(300));

    let connecting = endpoint.connect("twice.example", common::PORT);
    let handle = connecting.cancel_handle();
    tokio::time::sleep(ms(50)).await;

    connecting.cancel();
    handle.cancel();
    connecting.cancel();
    assert!(handle.is_cancelled());

    let err = connecting.await.expect_err("cancelled");
    assert!(err.is_cancelled());
    handle.cancel();

    assert_eq!(attempts.cancelled(), 1);
    assert_eq!(resolutions.cancelled(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_success_is_a_no_op() {
    let resolver = ScriptedResolver::immediate(&[v4(1)]);
    let resolutions = resolver.log();
    let connector = ScriptedConnector::new().plan(v4(1), Plan::Succeed(ms(10)));
    let endpoint = endpoint(resolver, connector, ms(300));

    let connecting = endpoint.connect("done.example", common::PORT);
    let handle = connecting.cancel_handle();
    let connected = connecting.await.expect("connects");
    handle.cancel();

    assert_eq!(connected, v4(1));
    // Resolution had already completed, so there was nothing to cancel.
    assert_eq!(resolutions.cancelled(), 0);
    assert_eq!(endpoint.stats().operations_cancelled, 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_poll() {
    let resolver = ScriptedResolver::immediate(&[v4(1)]);
    let connector = ScriptedConnector::new().plan(v4(1), Plan::Succeed(ms(10)));
    let attempts = connector.log();
    let endpoint = endpoint(resolver, connector, ms(300));

    let connecting = endpoint.connect("early.example", common::PORT);
    connecting.cancel();

    let err = connecting.await.expect_err("cancelled before starting");
    assert!(err.is_cancelled());
    assert!(attempts.starts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_attempt_spacing() {
    let resolver = ScriptedResolver::immediate(&[v4(1), v4(2)]);
    let connector =
        ScriptedConnector::new().plan(v4(1), Plan::Fail(ms(10), io::ErrorKind::ConnectionRefused));
    let attempts = connector.log();
    let endpoint = endpoint(resolver, connector, ms(300));

    let connecting = endpoint.connect("gap.example", common::PORT);
    let handle = connecting.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(ms(200)).await;
        handle.cancel();
    });

    // Nothing in flight, one candidate waiting for its slot.
    let err = connecting.await.expect_err("cancelled");
    assert!(err.is_cancelled());
    tokio::time::sleep(ms(500)).await;
    assert_eq!(attempts.started_addrs(), vec![v4(1)]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_connecting_cancels() {
    let resolver = hanging_resolution();
    let resolutions = resolver.log();
    let connector = ScriptedConnector::new();
    let attempts = connector.log();
    let endpoint = endpoint(resolver, connector, ms(300));

    let connecting = endpoint.connect("dropped.example", common::PORT);
    tokio::time::sleep(ms(20)).await;
    assert_eq!(attempts.starts().len(), 1);
    drop(connecting);

    tokio::time::sleep(ms(1)).await;
    assert_eq!(attempts.cancelled(), 1);
    assert_eq!(resolutions.cancelled(), 1);
    assert_eq!(endpoint.stats().operations_cancelled, 1);
}

#[tokio::test(start_paused = true)]
async fn test_pending_until_an_outcome() {
    let resolver = hanging_resolution();
    let connector = ScriptedConnector::new();
    let endpoint = endpoint(resolver, connector, ms(300));

    let mut connecting = task::spawn(endpoint.connect("pending.example", common::PORT));
    assert_pending!(connecting.poll());
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_pending!(connecting.poll());

    connecting.cancel();
    tokio::time::sleep(ms(1)).await;
    assert!(connecting.is_woken());
    let err = assert_ready_err!(connecting.poll());
    assert!(err.is_cancelled());
}

#[test]
fn test_invalid_hostname_settles_without_resolving() {
    let resolver = ScriptedResolver::immediate(&[v4(1)]);
    let resolutions = resolver.log();
    let endpoint = endpoint(resolver, ScriptedConnector::new(), ms(300));

    for hostname in ["", "   ", "bad host", "tab\there", "a..b", "[not-v6]"] {
        let mut connecting = task::spawn(endpoint.connect(hostname, common::PORT));
        let err = assert_ready_err!(connecting.poll());
        assert!(
            matches!(err, ConnectError::InvalidHostname { .. }),
            "{hostname:?} gave {err:?}"
        );
        assert!(err.is_invalid_input());
    }
    assert_eq!(resolutions.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_underscore_name_reaches_resolver() {
    let resolver = ScriptedResolver::immediate(&[v4(1)]);
    let resolutions = resolver.log();
    let connector = ScriptedConnector::new().plan(v4(1), Plan::Succeed(ms(5)));
    let endpoint = endpoint(resolver, connector, ms(300));

    let connected = endpoint
        .connect("db_primary", common::PORT)
        .await
        .expect("underscore names are looked up");

    assert_eq!(connected, v4(1));
    assert_eq!(resolutions.calls(), 1);
    assert_eq!(resolutions.last_name().as_deref(), Some("db_primary"));
}

#[test]
fn test_invalid_params_settle_without_resolving() {
    let resolver = ScriptedResolver::immediate(&[v4(1)]);
    let resolutions = resolver.log();
    let endpoint = endpoint(resolver, ScriptedConnector::new(), ms(300));

    let zero_timeout = ConnectParams::default().with_timeout(Duration::ZERO);
    let no_families = ConnectParams::default().with_families(AddressFamilies {
        ipv4: false,
        ipv6: false,
    });

    for params in [zero_timeout, no_families] {
        let mut connecting = task::spawn(endpoint.connect_with("ok.example", common::PORT, params));
        let err = assert_ready_err!(connecting.poll());
        assert!(matches!(err, ConnectError::InvalidParams(_)), "got {err:?}");
    }
    assert_eq!(resolutions.calls(), 0);
    assert_eq!(endpoint.stats().operations_started, 0);
}
