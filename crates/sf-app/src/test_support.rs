//! Hand-written port fakes shared by the use case unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use sf_core::ports::{
    ClockPort, KeyValueStorePort, RemoteError, RemoteSettingsPort, SetupProgress,
    SetupProgressPort,
};
use sf_core::settings::Settings;

use crate::usecases::SettingsStore;

pub const FIXED_NOW_MS: i64 = 1_700_000_000_000;

pub fn settings(value: Value) -> Settings {
    serde_json::from_value(value).unwrap()
}

fn unavailable() -> RemoteError {
    RemoteError::Transport("connection refused".to_string())
}

pub struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        FIXED_NOW_MS
    }
}

/// Remote settings endpoint that merges writes into its state.
pub struct FakeRemote {
    state: Mutex<Settings>,
    puts: Mutex<Vec<Settings>>,
    get_count: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeRemote {
    pub fn new(initial: Settings) -> Self {
        Self {
            state: Mutex::new(initial),
            puts: Mutex::new(Vec::new()),
            get_count: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_state(&self, state: Settings) {
        *self.state.lock().unwrap() = state;
    }

    pub fn puts(&self) -> Vec<Settings> {
        self.puts.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteSettingsPort for FakeRemote {
    async fn get_settings(&self) -> Result<Settings, RemoteError> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.state.lock().unwrap().clone())
    }

    async fn put_settings(&self, partial: &Settings) -> Result<Settings, RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.puts.lock().unwrap().push(partial.clone());
        let mut state = self.state.lock().unwrap();
        state.merge(partial.clone());
        Ok(state.clone())
    }
}

/// Progress endpoint. Scripted reads are served first; `None` entries fail.
pub struct FakeProgress {
    status: Mutex<String>,
    scripted: Mutex<VecDeque<Option<String>>>,
    puts: Mutex<Vec<String>>,
    get_count: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeProgress {
    pub fn new(status: &str) -> Self {
        Self {
            status: Mutex::new(status.to_string()),
            scripted: Mutex::new(VecDeque::new()),
            puts: Mutex::new(Vec::new()),
            get_count: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn script_reads(&self, reads: &[Option<&str>]) {
        let mut scripted = self.scripted.lock().unwrap();
        scripted.extend(reads.iter().map(|r| r.map(str::to_string)));
    }

    pub fn puts(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SetupProgressPort for FakeProgress {
    async fn get_progress(&self) -> Result<SetupProgress, RemoteError> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.scripted.lock().unwrap().pop_front() {
            return next.map(SetupProgress::new).ok_or_else(unavailable);
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(SetupProgress::new(self.status.lock().unwrap().clone()))
    }

    async fn put_progress(&self, status: &str) -> Result<SetupProgress, RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.puts.lock().unwrap().push(status.to_string());
        *self.status.lock().unwrap() = status.to_string();
        Ok(SetupProgress::new(status))
    }
}

/// Remote pair whose calls only complete while the matching call on the
/// other port is in flight. Awaiting them one after the other never finishes.
#[derive(Default)]
pub struct Rendezvous {
    settings_side: Notify,
    progress_side: Notify,
}

impl Rendezvous {
    async fn settings_arrives(&self) {
        self.progress_side.notify_one();
        self.settings_side.notified().await;
    }

    async fn progress_arrives(&self) {
        self.settings_side.notify_one();
        self.progress_side.notified().await;
    }
}

pub struct JoinedRemote(pub Arc<Rendezvous>);

#[async_trait]
impl RemoteSettingsPort for JoinedRemote {
    async fn get_settings(&self) -> Result<Settings, RemoteError> {
        self.0.settings_arrives().await;
        Ok(settings(serde_json::json!({"networkTitle": "Foo"})))
    }

    async fn put_settings(&self, partial: &Settings) -> Result<Settings, RemoteError> {
        self.0.settings_arrives().await;
        Ok(partial.clone())
    }
}

pub struct JoinedProgress(pub Arc<Rendezvous>);

#[async_trait]
impl SetupProgressPort for JoinedProgress {
    async fn get_progress(&self) -> Result<SetupProgress, RemoteError> {
        self.0.progress_arrives().await;
        Ok(SetupProgress::new("Named"))
    }

    async fn put_progress(&self, status: &str) -> Result<SetupProgress, RemoteError> {
        self.0.progress_arrives().await;
        Ok(SetupProgress::new(status))
    }
}

#[derive(Default)]
pub struct MemoryKeyValue {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
}

impl MemoryKeyValue {
    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStorePort for MemoryKeyValue {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable");
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.put(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct Fixture {
    pub store: Arc<SettingsStore>,
    pub remote: Arc<FakeRemote>,
    pub progress: Arc<FakeProgress>,
    pub kv: Arc<MemoryKeyValue>,
}

/// Store backed by fakes whose remote holds `remote_settings` and `status`.
pub fn fixture(remote_settings: Value, status: &str) -> Fixture {
    let remote = Arc::new(FakeRemote::new(settings(remote_settings)));
    let progress = Arc::new(FakeProgress::new(status));
    let kv = Arc::new(MemoryKeyValue::default());
    let store = Arc::new(SettingsStore::new(
        remote.clone(),
        progress.clone(),
        kv.clone(),
        Arc::new(FixedClock),
    ));

    Fixture {
        store,
        remote,
        progress,
        kv,
    }
}
