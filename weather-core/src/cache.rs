use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::model::WeatherReport;

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to test expiry without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: WeatherReport,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Key-value store of reports with per-entry expiry.
///
/// Expired entries read as absent. They are reaped when their key is read
/// and on every write, so keys that are never looked up again do not pile
/// up. Concurrent writers to the same key are last-write-wins.
#[derive(Debug)]
pub struct WeatherCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock }
    }

    pub fn read(&self, key: &str) -> Option<WeatherReport> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock: another writer may have refreshed it.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    /// A TTL that would overflow the calendar keeps the entry until the end of time.
    pub fn write(&self, key: impl Into<String>, value: WeatherReport, ttl: Duration) {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.entries.write();
        entries.retain(|_, e| !e.is_expired(now));
        entries.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Returns whether a live entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries.write().remove(key).is_some_and(|e| !e.is_expired(now))
    }

    /// Remove keys matching `pattern`: a trailing `*` matches any suffix
    /// (`weather:*`), otherwise the key must match exactly.
    /// Returns how many entries were removed.
    pub fn delete_matching(&self, pattern: &str) -> usize {
        let matches = |key: &str| match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        };

        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !matches(key));
        before - entries.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries.read().values().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}
