//! Scripted collaborators for engine tests
//!
//! The resolver replays a timed script of events; the connector answers
//! each address according to a per-address plan. Both record what the
//! engine did to them so tests can assert on starts and cancellations.
//! Meant for `#[tokio::test(start_paused = true)]`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt};
use tokio::time::Instant;

use hostdial_client::{
    CandidateEndpoint, Connect, ConnectParams, HostResolution, HostnameEndpoint, Name,
    ResolutionReceiver, Resolve, ResolvedAddress,
};

pub const PORT: u16 = 443;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Documentation-range IPv4 address with the engine's destination port.
pub fn v4(last_octet: u8) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, last_octet)), PORT)
}

/// Documentation-range IPv6 address with the engine's destination port.
pub fn v6(last_segment: u16) -> SocketAddr {
    SocketAddr::new(
        IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, last_segment)),
        PORT,
    )
}

/// What the resolver reports, as the resolver would: port zero.
pub fn resolved(addr: SocketAddr) -> ResolvedAddress {
    ResolvedAddress::from(SocketAddr::new(addr.ip(), 0))
}

/// Assert `actual` happened `expected` after `t0`, within timer granularity.
#[track_caller]
pub fn assert_at(t0: Instant, actual: Instant, expected: Duration) {
    let elapsed = actual.duration_since(t0);
    assert!(
        elapsed >= expected && elapsed <= expected + ms(1),
        "expected event at {expected:?}, happened at {elapsed:?}"
    );
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

pub enum Step {
    Address(Duration, ResolvedAddress),
    Complete(Duration),
    /// Drop the receiver without completing.
    Vanish(Duration),
}

#[derive(Debug, Default)]
pub struct ResolverLog {
    calls: AtomicUsize,
    cancelled: AtomicUsize,
    last_name: Mutex<Option<String>>,
}

impl ResolverLog {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn last_name(&self) -> Option<String> {
        self.last_name.lock().expect("resolver log poisoned").clone()
    }
}

/// Replays its script relative to the moment `resolve` is called. A script
/// without a terminal step keeps the resolution open until cancelled.
pub struct ScriptedResolver {
    script: Arc<Vec<Step>>,
    log: Arc<ResolverLog>,
}

impl ScriptedResolver {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: Arc::new(script),
            log: Arc::new(ResolverLog::default()),
        }
    }

    /// Every address at once, then completion.
    pub fn immediate(addrs: &[SocketAddr]) -> Self {
        let mut script: Vec<Step> = addrs
            .iter()
            .map(|addr| Step::Address(Duration::ZERO, resolved(*addr)))
            .collect();
        script.push(Step::Complete(Duration::ZERO));
        Self::new(script)
    }

    pub fn log(&self) -> Arc<ResolverLog> {
        Arc::clone(&self.log)
    }
}

struct TrackedResolution {
    abort: AbortHandle,
    log: Arc<ResolverLog>,
}

impl HostResolution for TrackedResolution {
    fn cancel(&mut self) {
        self.log.cancelled.fetch_add(1, Ordering::SeqCst);
        self.abort.abort();
    }
}

impl Resolve for ScriptedResolver {
    fn resolve(&self, name: &Name, _port: u16, mut receiver: ResolutionReceiver) {
        self.log.calls.fetch_add(1, Ordering::SeqCst);
        *self.log.last_name.lock().expect("resolver log poisoned") = Some(name.to_string());

        let (abort, registration) = AbortHandle::new_pair();
        receiver.resolution_began(TrackedResolution {
            abort,
            log: Arc::clone(&self.log),
        });

        let script = Arc::clone(&self.script);
        let start = Instant::now();
        let replay = async move {
            for step in script.iter() {
                match step {
                    Step::Address(at, address) => {
                        tokio::time::sleep_until(start + *at).await;
                        receiver.address_resolved(address.clone());
                    }
                    Step::Complete(at) => {
                        tokio::time::sleep_until(start + *at).await;
                        receiver.resolution_complete();
                        return;
                    }
                    Step::Vanish(at) => {
                        tokio::time::sleep_until(start + *at).await;
                        drop(receiver);
                        return;
                    }
                }
            }
            futures::future::pending::<()>().await;
            drop(receiver);
        };
        tokio::spawn(Abortable::new(replay, registration));
    }
}

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum Plan {
    Succeed(Duration),
    Fail(Duration, io::ErrorKind),
    Hang,
}

#[derive(Debug, Default)]
pub struct AttemptLog {
    starts: Mutex<Vec<(SocketAddr, Instant)>>,
    cancelled: AtomicUsize,
}

impl AttemptLog {
    pub fn starts(&self) -> Vec<(SocketAddr, Instant)> {
        self.starts.lock().expect("attempt log poisoned").clone()
    }

    pub fn started_addrs(&self) -> Vec<SocketAddr> {
        self.starts().into_iter().map(|(addr, _)| addr).collect()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Counts the attempt as cancelled when dropped before finishing.
struct AttemptGuard {
    log: Arc<AttemptLog>,
    finished: bool,
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.log.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Connection is the remote address that was connected to. Addresses
/// without a plan hang.
pub struct ScriptedConnector {
    plans: HashMap<SocketAddr, Plan>,
    log: Arc<AttemptLog>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self {
            plans: HashMap::new(),
            log: Arc::new(AttemptLog::default()),
        }
    }

    pub fn plan(mut self, addr: SocketAddr, plan: Plan) -> Self {
        self.plans.insert(addr, plan);
        self
    }

    pub fn log(&self) -> Arc<AttemptLog> {
        Arc::clone(&self.log)
    }
}

impl Connect for ScriptedConnector {
    type Connection = SocketAddr;

    fn connect(&self, endpoint: &CandidateEndpoint) -> BoxFuture<'static, io::Result<SocketAddr>> {
        let addr = endpoint.addr;
        self.log
            .starts
            .lock()
            .expect("attempt log poisoned")
            .push((addr, Instant::now()));

        let plan = self.plans.get(&addr).copied().unwrap_or(Plan::Hang);
        let guard = AttemptGuard {
            log: Arc::clone(&self.log),
            finished: false,
        };

        async move {
            let mut guard = guard;
            let result = match plan {
                Plan::Succeed(after) => {
                    tokio::time::sleep(after).await;
                    Ok(addr)
                }
                Plan::Fail(after, kind) => {
                    tokio::time::sleep(after).await;
                    Err(io::Error::new(kind, format!("scripted failure for {addr}")))
                }
                Plan::Hang => futures::future::pending().await,
            };
            guard.finished = true;
            result
        }
        .boxed()
    }
}

pub fn endpoint(
    resolver: ScriptedResolver,
    connector: ScriptedConnector,
    attempt_delay: Duration,
) -> HostnameEndpoint<ScriptedResolver, ScriptedConnector> {
    HostnameEndpoint::new(resolver, connector)
        .with_params(ConnectParams::default().with_attempt_delay(attempt_delay))
}
