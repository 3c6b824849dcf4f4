// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Periodic polling of the counter's read-only functions.
//!
//! Each poll cycle issues the three queries concurrently. A query that fails
//! or returns an undecodable value leaves its field of the [`CounterView`]
//! untouched until a later cycle succeeds.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use super::{
    api::{ApiError, ReadOnlyApi},
    c32::StandardPrincipal,
    clarity::ClarityValue,
};

pub mod functions {
    pub const GET_COUNTER: &str = "get-counter";
    pub const GET_OWNER: &str = "get-owner";
    pub const IS_PAUSED: &str = "is-paused";
}

/// Last known state of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterView {
    pub counter: u128,
    pub owner: Option<StandardPrincipal>,
    pub paused: bool,
    /// When any query last succeeded.
    pub last_refresh: Option<Instant>,
}

/// Queries that failed during one poll cycle.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub failures: Vec<(&'static str, ApiError)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct Poller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    api: Arc<dyn ReadOnlyApi>,
    interval: Duration,
    view: watch::Sender<CounterView>,
}

impl Poller {
    pub fn new(api: Arc<dyn ReadOnlyApi>, interval: Duration) -> Self {
        let (view, _) = watch::channel(CounterView::default());
        Self {
            inner: Arc::new(PollerInner {
                api,
                interval,
                view,
            }),
        }
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> CounterView {
        self.inner.view.borrow().clone()
    }

    /// Receiver notified whenever a poll cycle changes the view.
    pub fn subscribe(&self) -> watch::Receiver<CounterView> {
        self.inner.view.subscribe()
    }

    /// Runs one poll cycle.
    pub async fn refresh(&self) -> RefreshReport {
        let api = self.inner.api.as_ref();
        let (counter, owner, paused) = tokio::join!(
            query(api, functions::GET_COUNTER, ClarityValue::expect_uint),
            query(api, functions::GET_OWNER, ClarityValue::expect_principal),
            query(api, functions::IS_PAUSED, ClarityValue::expect_bool),
        );

        let mut report = RefreshReport::default();
        self.inner.view.send_if_modified(|view| {
            let mut updated = false;
            match counter {
                Ok(counter) => {
                    view.counter = counter;
                    updated = true;
                }
                Err(err) => report.failures.push((functions::GET_COUNTER, err)),
            }
            match owner {
                Ok(owner) => {
                    view.owner = Some(owner);
                    updated = true;
                }
                Err(err) => report.failures.push((functions::GET_OWNER, err)),
            }
            match paused {
                Ok(paused) => {
                    view.paused = paused;
                    updated = true;
                }
                Err(err) => report.failures.push((functions::IS_PAUSED, err)),
            }
            if updated {
                view.last_refresh = Some(Instant::now());
            }
            updated
        });

        for (function, err) in &report.failures {
            log::debug!("{function} poll failed, keeping previous value: {err}");
        }
        report
    }

    /// Polls now and then on every interval until the handle is stopped or dropped.
    pub fn start(&self) -> PollHandle {
        let poller = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.inner.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                poller.refresh().await;
            }
        });
        log::debug!("polling every {:?}", self.inner.interval);
        PollHandle { task: Some(task) }
    }

    /// Schedules a single poll cycle after `delay`.
    pub fn refresh_after(&self, delay: Duration) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            poller.refresh().await;
        })
    }
}

async fn query<T>(
    api: &dyn ReadOnlyApi,
    function: &str,
    accessor: fn(&ClarityValue) -> Result<T, super::clarity::DecodeError>,
) -> Result<T, ApiError> {
    let value = api.call_read(function, &[]).await?;
    Ok(accessor(&value)?)
}

/// Owns the periodic poll task. Stopping or dropping the handle cancels it.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("polling stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::clarity::DecodeError;
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    pub const OWNER_HEX: &str = "0x0516a46ff88886c2ef9762d970b4d2c63678835bd39d";
    pub const OWNER_ADDRESS: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";

    pub fn uint_hex(value: u128) -> String {
        ClarityValue::UInt(value).encode_hex()
    }

    /// Serves canned hex results per function and counts calls.
    #[derive(Default)]
    pub struct FakeApi {
        results: Mutex<HashMap<&'static str, Option<String>>>,
        pub calls: AtomicUsize,
    }

    impl FakeApi {
        pub fn healthy(counter: u128, paused: bool) -> Self {
            let api = Self::default();
            api.set(functions::GET_COUNTER, Some(uint_hex(counter)));
            api.set(functions::GET_OWNER, Some(OWNER_HEX.into()));
            api.set(
                functions::IS_PAUSED,
                Some(if paused { "0x03" } else { "0x04" }.into()),
            );
            api
        }

        /// `None` makes the function fail as if the node were unreachable.
        pub fn set(&self, function: &'static str, result: Option<String>) {
            self.results.lock().unwrap().insert(function, result);
        }
    }

    #[async_trait]
    impl ReadOnlyApi for FakeApi {
        async fn call_read(
            &self,
            function: &str,
            _args: &[ClarityValue],
        ) -> Result<ClarityValue, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.results.lock().unwrap().get(function).cloned().flatten();
            match result {
                Some(hex) => Ok(ClarityValue::decode_hex(&hex)?),
                None => Err(ApiError::Rejected(format!("{function} unavailable"))),
            }
        }
    }

    #[tokio::test]
    async fn refresh_updates_every_field() {
        let poller = Poller::new(Arc::new(FakeApi::healthy(5, true)), Duration::from_secs(10));
        assert_eq!(poller.view(), CounterView::default());

        let report = poller.refresh().await;
        assert!(report.is_complete());

        let view = poller.view();
        assert_eq!(view.counter, 5);
        assert_eq!(view.owner.unwrap().to_string(), OWNER_ADDRESS);
        assert!(view.paused);
        assert!(view.last_refresh.is_some());
    }

    #[tokio::test]
    async fn failed_queries_keep_stale_values() {
        let api = Arc::new(FakeApi::healthy(5, false));
        let poller = Poller::new(api.clone(), Duration::from_secs(10));
        poller.refresh().await;

        api.set(functions::GET_COUNTER, None);
        api.set(functions::GET_OWNER, Some("0x05".into()));
        api.set(functions::IS_PAUSED, Some("0x03".into()));
        let report = poller.refresh().await;

        let failed: Vec<_> = report.failures.iter().map(|(f, _)| *f).collect();
        assert_eq!(failed, [functions::GET_COUNTER, functions::GET_OWNER]);
        assert!(matches!(
            report.failures[1].1,
            ApiError::Decode(DecodeError::Truncated { .. })
        ));

        let view = poller.view();
        assert_eq!(view.counter, 5);
        assert_eq!(view.owner.unwrap().to_string(), OWNER_ADDRESS);
        assert!(view.paused);
    }

    #[tokio::test]
    async fn wrong_type_is_a_failure() {
        let api = Arc::new(FakeApi::healthy(1, false));
        api.set(functions::IS_PAUSED, Some(uint_hex(1)));
        let poller = Poller::new(api, Duration::from_secs(10));

        let report = poller.refresh().await;
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].1,
            ApiError::Decode(DecodeError::UnexpectedType { .. })
        ));
        assert!(!poller.view().paused);
    }

    #[tokio::test]
    async fn total_failure_does_not_notify() {
        let api = Arc::new(FakeApi::default());
        let poller = Poller::new(api, Duration::from_secs(10));
        let rx = poller.subscribe();

        let report = poller.refresh().await;
        assert_eq!(report.failures.len(), 3);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(poller.view().last_refresh, None);
    }

    #[tokio::test(start_paused = true)]
    async fn start_polls_immediately_and_on_interval() {
        let api = Arc::new(FakeApi::healthy(1, false));
        let poller = Poller::new(api.clone(), Duration::from_secs(10));
        let mut rx = poller.subscribe();
        let started = Instant::now();

        let handle = poller.start();
        assert!(handle.is_running());

        rx.changed().await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);

        api.set(functions::GET_COUNTER, Some(uint_hex(2)));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().counter, 2);
        assert_eq!(api.calls.load(Ordering::SeqCst), 6);
        assert!(started.elapsed() >= Duration::from_secs(10));

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_handle_polls_no_more() {
        let api = Arc::new(FakeApi::healthy(1, false));
        let poller = Poller::new(api.clone(), Duration::from_secs(10));
        let mut rx = poller.subscribe();

        let handle = poller.start();
        rx.changed().await.unwrap();
        handle.stop();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_polls_no_more() {
        let api = Arc::new(FakeApi::healthy(1, false));
        let poller = Poller::new(api.clone(), Duration::from_secs(10));
        let mut rx = poller.subscribe();

        {
            let _handle = poller.start();
            rx.changed().await.unwrap();
        }

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_after_waits_for_delay() {
        let api = Arc::new(FakeApi::healthy(9, false));
        let poller = Poller::new(api.clone(), Duration::from_secs(10));

        let task = poller.refresh_after(Duration::from_secs(3));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);

        task.await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
        assert_eq!(poller.view().counter, 9);
    }
}
