//! In-memory backend for tests.
//!
//! This provides a [`Backend`] backed by a `HashMap`, with scripted transfer times so that
//! statistics computed from a run are deterministic. The backend is [`Clone`] so tests can hold a
//! handle for direct inspection while the runner borrows another.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;

use super::{Backend, BackendError, BackendResult, Download};

/// Transfer time reported once the scripted latencies are used up.
const DEFAULT_LATENCY: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct State {
    store: HashMap<(String, String), Bytes>,
    put_latencies: VecDeque<Duration>,
    get_latencies: VecDeque<Duration>,
    failing_keys: HashSet<String>,
    truncate_by: u64,
    deleted: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports these durations for the next uploads, in order.
    pub fn with_put_latencies(self, latencies: impl IntoIterator<Item = Duration>) -> Self {
        self.state.lock().unwrap().put_latencies.extend(latencies);
        self
    }

    /// Reports these durations for the next downloads, in order.
    pub fn with_get_latencies(self, latencies: impl IntoIterator<Item = Duration>) -> Self {
        self.state.lock().unwrap().get_latencies.extend(latencies);
        self
    }

    /// Makes every operation on `key` fail with a transport error.
    pub fn failing_on(self, key: &str) -> Self {
        self.state.lock().unwrap().failing_keys.insert(key.to_owned());
        self
    }

    /// Drops the last `bytes` of every object when it is read back.
    pub fn truncating_by(self, bytes: u64) -> Self {
        self.state.lock().unwrap().truncate_by = bytes;
        self
    }

    /// Returns a clone of the stored bytes, if present.
    pub fn get_stored(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let store_key = (bucket.to_owned(), key.to_owned());
        self.state.lock().unwrap().store.get(&store_key).cloned()
    }

    /// Returns `true` if the backend has no stored objects.
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().store.is_empty()
    }

    /// Keys passed to successful deletes, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }
}

fn check_failure(state: &State, key: &str) -> BackendResult<()> {
    if state.failing_keys.contains(key) {
        return Err(BackendError::Generic {
            context: format!("injected failure for `{key}`"),
            cause: Box::new(io::Error::from(io::ErrorKind::ConnectionReset)),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl Backend for InMemoryBackend {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn put_object(&self, bucket: &str, key: &str, payload: Bytes) -> BackendResult<Duration> {
        let mut state = self.state.lock().unwrap();
        check_failure(&state, key)?;

        state
            .store
            .insert((bucket.to_owned(), key.to_owned()), payload);
        Ok(state.put_latencies.pop_front().unwrap_or(DEFAULT_LATENCY))
    }

    async fn get_object(&self, bucket: &str, key: &str) -> BackendResult<Download> {
        let mut state = self.state.lock().unwrap();
        check_failure(&state, key)?;

        let store_key = (bucket.to_owned(), key.to_owned());
        let Some(payload) = state.store.get(&store_key) else {
            return Err(BackendError::NotFound {
                key: key.to_owned(),
            });
        };

        let bytes = (payload.len() as u64).saturating_sub(state.truncate_by);
        let elapsed = state.get_latencies.pop_front().unwrap_or(DEFAULT_LATENCY);
        Ok(Download { bytes, elapsed })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> BackendResult<()> {
        let mut state = self.state.lock().unwrap();
        check_failure(&state, key)?;

        state.store.remove(&(bucket.to_owned(), key.to_owned()));
        state.deleted.push(key.to_owned());
        Ok(())
    }
}
