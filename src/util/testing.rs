// src/util/testing.rs

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// Store double for exercising failure paths
///
/// Behaves like an in-memory map unless configured to fail.
///
/// # Examples
///
/// ```
/// use edgepad::application::KeyValueStore;
/// use edgepad::util::testing::MockStore;
///
/// let mock = MockStore::builder()
///     .with_entry("pad:abc", "<b>hi</b>")
///     .with_failing_reads_for("pad:broken")
///     .build();
///
/// assert_eq!(mock.get("pad:abc").unwrap().as_deref(), Some("<b>hi</b>"));
/// assert!(mock.get("pad:broken").is_err());
/// ```
pub struct MockStore {
    entries: Mutex<HashMap<String, String>>,
    failing_reads: HashSet<String>,
    fail_all_reads: bool,
    fail_writes: bool,
}

impl MockStore {
    pub fn builder() -> MockStoreBuilder {
        MockStoreBuilder::new()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Storage("mock lock poisoned".to_string()))
    }

    fn check_write(&self, key: &str) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Storage(format!("simulated write failure for {key}")));
        }
        Ok(())
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_all_reads || self.failing_reads.contains(key) {
            return Err(DomainError::Storage(format!("simulated read failure for {key}")));
        }
        Ok(self.entries()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.check_write(key)?;
        if value.is_empty() {
            return Err(DomainError::EmptyValue(key.to_string()));
        }
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.check_write(key)?;
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Builder for MockStore
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockStoreBuilder {
    entries: HashMap<String, String>,
    failing_reads: HashSet<String>,
    fail_all_reads: bool,
    fail_writes: bool,
}

impl MockStoreBuilder {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            failing_reads: HashSet::new(),
            fail_all_reads: false,
            fail_writes: false,
        }
    }

    /// Seed a value that `get` returns
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make `get` fail for one key
    pub fn with_failing_reads_for(mut self, key: &str) -> Self {
        self.failing_reads.insert(key.to_string());
        self
    }

    /// Make every `get` fail
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_all_reads = true;
        self
    }

    /// Make every `put` and `delete` fail
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn build(self) -> MockStore {
        MockStore {
            entries: Mutex::new(self.entries),
            failing_reads: self.failing_reads,
            fail_all_reads: self.fail_all_reads,
            fail_writes: self.fail_writes,
        }
    }
}

impl Default for MockStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "tower", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
