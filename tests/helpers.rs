// tests/helpers.rs (a small test-only module)
use std::sync::{Arc, Mutex};

use serde_json::Value;

use touch_relay::relay::EventSink;

/// Recording sink double: keeps every emit so tests can assert on the
/// exact event sequence.
#[derive(Clone)]
pub struct MockSink {
    emitted: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            emitted: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().unwrap().clone()
    }
}

impl EventSink for MockSink {
    fn emit(&self, event: &str, payload: Value) {
        self.emitted
            .lock()
            .unwrap()
            .push((event.to_string(), payload));
    }
}
