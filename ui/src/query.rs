//! Keyed cache for read operations against the backend.
//!
//! Every cached read is identified by a [`QueryKey`]: resource name,
//! operation kind, and a stable serialization of its parameters. Entries
//! hold the last-known data alongside the metadata the hooks need to
//! decide whether to refetch: staleness, age, and an in-flight request
//! sequence that guards against out-of-order responses.

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Data younger than this is served from cache without a refetch.
pub const FRESH_WINDOW_SECS: i64 = 5 * 60;

/// Entries untouched for this long are evicted entirely.
pub const CACHE_EVICT_SECS: i64 = 10 * 60;

/// Reads are retried at most this many times on retryable failures.
pub const READ_RETRY_LIMIT: u32 = 2;

pub const RETRY_DELAY_CAP_MS: u64 = 30_000;

/// Exponential backoff schedule for read retries, capped.
pub fn retry_delay_ms(attempt: u32) -> u64 {
    (1000u64 << attempt.min(10)).min(RETRY_DELAY_CAP_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    List,
    Detail,
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub op: QueryOp,
    pub params: String,
}

impl QueryKey {
    pub fn new(
        resource: &'static str,
        op: QueryOp,
        params: &impl Serialize,
    ) -> Self {
        Self {
            resource,
            op,
            params: stable_json(params),
        }
    }

    pub fn list(resource: &'static str, params: &impl Serialize) -> Self {
        Self::new(resource, QueryOp::List, params)
    }

    pub fn detail(resource: &'static str, params: &impl Serialize) -> Self {
        Self::new(resource, QueryOp::Detail, params)
    }

    pub fn stats(resource: &'static str, params: &impl Serialize) -> Self {
        Self::new(resource, QueryOp::Stats, params)
    }
}

/// Serialize parameters with all object keys sorted, so two deep-equal
/// parameter sets land in the same cache slot no matter the insertion
/// order of their fields.
pub fn stable_json(params: &impl Serialize) -> String {
    let value = serde_json::to_value(params).unwrap_or(Value::Null);
    sort_keys(value).to_string()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = serde_json::Map::new();
            for (key, child) in fields {
                sorted.insert(key, sort_keys(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    pub data: Option<Value>,
    pub error: Option<String>,
    pub fetched_at: Option<Timestamp>,
    pub last_active_at: Timestamp,
    pub is_stale: bool,
    pub in_flight: bool,
    /// Sequence of the most recently issued request for this key.
    pub issued_seq: u64,
    /// Sequence of the response currently reflected in `data`/`error`.
    pub applied_seq: u64,
}

impl QueryEntry {
    fn new(now: Timestamp) -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            last_active_at: now,
            is_stale: false,
            in_flight: false,
            issued_seq: 0,
            applied_seq: 0,
        }
    }
}

/// The one shared mutable resource of the data-access layer. Slots are
/// only written by a completed fetch for their own key (sequence-guarded)
/// or by explicit invalidation after a mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryEntry>,
}

impl QueryCache {
    pub fn entry(&self, key: &QueryKey) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    pub fn data(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key).and_then(|entry| entry.data.as_ref())
    }

    pub fn error(&self, key: &QueryKey) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|entry| entry.error.as_deref())
    }

    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.in_flight)
            .unwrap_or(false)
    }

    /// Record a subscription. Creates the entry on first touch.
    pub fn touch(&mut self, key: &QueryKey, now: Timestamp) {
        self.entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(now))
            .last_active_at = now;
    }

    /// Mark a new request issued for this key and return its sequence.
    pub fn begin_fetch(&mut self, key: &QueryKey, now: Timestamp) -> u64 {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(now));
        entry.issued_seq += 1;
        entry.in_flight = true;
        entry.error = None;
        entry.last_active_at = now;
        entry.issued_seq
    }

    pub fn issued_seq(&self, key: &QueryKey) -> u64 {
        self.entries
            .get(key)
            .map(|entry| entry.issued_seq)
            .unwrap_or(0)
    }

    /// Apply a completed fetch. Responses that are not the most recently
    /// issued request for the key are discarded, so a slow response can
    /// never overwrite a newer one. Returns whether the result was
    /// applied.
    pub fn complete_fetch(
        &mut self,
        key: &QueryKey,
        seq: u64,
        result: Result<Value, String>,
        now: Timestamp,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if seq != entry.issued_seq {
            return false;
        }
        entry.in_flight = false;
        entry.applied_seq = seq;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.fetched_at = Some(now);
                entry.is_stale = false;
                entry.error = None;
            }
            Err(message) => {
                // Previous data stays visible; the error rides alongside.
                entry.error = Some(message);
            }
        }
        true
    }

    /// Whether the cached data can be served without a refetch.
    pub fn is_fresh(&self, key: &QueryKey, now: Timestamp) -> bool {
        let Some(entry) = self.entries.get(key) else {
            return false;
        };
        if entry.data.is_none() || entry.is_stale {
            return false;
        }
        match entry.fetched_at {
            Some(fetched_at) => {
                now.as_second() - fetched_at.as_second() < FRESH_WINDOW_SECS
            }
            None => false,
        }
    }

    pub fn needs_fetch(&self, key: &QueryKey, now: Timestamp) -> bool {
        !self.is_loading(key) && !self.is_fresh(key, now)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.is_stale)
            .unwrap_or(false)
    }

    /// Invalidate after a mutation: every List and Stats entry of the
    /// resource goes stale, plus the one Detail entry when the mutated
    /// id is known.
    pub fn invalidate_resource(
        &mut self,
        resource: &str,
        detail_params: Option<&str>,
    ) {
        for (key, entry) in self.entries.iter_mut() {
            if key.resource != resource {
                continue;
            }
            let hit = match key.op {
                QueryOp::List | QueryOp::Stats => true,
                QueryOp::Detail => {
                    detail_params.is_some_and(|params| key.params == params)
                }
            };
            if hit {
                entry.is_stale = true;
            }
        }
    }

    /// Drop entries that have had no subscriber activity for the eviction
    /// window. In-flight entries are kept so their sequence guard stays
    /// intact.
    pub fn gc(&mut self, now: Timestamp) {
        self.entries.retain(|_, entry| {
            entry.in_flight
                || now.as_second() - entry.last_active_at.as_second()
                    < CACHE_EVICT_SECS
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn key_is_insertion_order_independent() {
        let mut forward = serde_json::Map::new();
        forward.insert("page".into(), json!(1));
        forward.insert("q".into(), json!("acme"));
        let mut backward = serde_json::Map::new();
        backward.insert("q".into(), json!("acme"));
        backward.insert("page".into(), json!(1));

        let a = QueryKey::list("customers", &Value::Object(forward));
        let b = QueryKey::list("customers", &Value::Object(backward));
        assert_eq!(a, b);
    }

    #[test]
    fn key_sorts_nested_objects() {
        let a = json!({"outer": {"b": 2, "a": 1}, "list": [{"y": 0, "x": 0}]});
        assert_eq!(
            stable_json(&a),
            r#"{"list":[{"x":0,"y":0}],"outer":{"a":1,"b":2}}"#
        );
    }

    #[test]
    fn out_of_order_response_is_discarded() {
        let mut cache = QueryCache::default();
        let key = QueryKey::list("vouchers", &json!({"q": "a"}));

        let first = cache.begin_fetch(&key, at(0));
        let second = cache.begin_fetch(&key, at(1));
        assert!(first < second);

        // The newer request resolves first.
        assert!(cache.complete_fetch(&key, second, Ok(json!([2])), at(2)));
        // The slow, older response must not overwrite it.
        assert!(!cache.complete_fetch(&key, first, Ok(json!([1])), at(3)));
        assert_eq!(cache.data(&key), Some(&json!([2])));
    }

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let mut cache = QueryCache::default();
        let key = QueryKey::detail("customers", &json!("id-1"));

        let seq = cache.begin_fetch(&key, at(0));
        cache.complete_fetch(&key, seq, Ok(json!({"name": "A"})), at(1));

        let seq = cache.begin_fetch(&key, at(2));
        cache.complete_fetch(&key, seq, Err("boom".into()), at(3));

        assert_eq!(cache.data(&key), Some(&json!({"name": "A"})));
        assert_eq!(cache.error(&key), Some("boom"));
    }

    #[test]
    fn mutation_invalidates_lists_and_matching_detail() {
        let mut cache = QueryCache::default();
        let list_a = QueryKey::list("customers", &json!({"page": 1}));
        let list_b = QueryKey::list("customers", &json!({"page": 2}));
        let stats = QueryKey::stats("customers", &json!("id-1"));
        let detail = QueryKey::detail("customers", &json!("id-1"));
        let other_detail = QueryKey::detail("customers", &json!("id-2"));
        let unrelated = QueryKey::list("vouchers", &json!({}));

        for key in [&list_a, &list_b, &stats, &detail, &other_detail, &unrelated]
        {
            let seq = cache.begin_fetch(key, at(0));
            cache.complete_fetch(key, seq, Ok(json!(null)), at(0));
        }

        cache.invalidate_resource(
            "customers",
            Some(&stable_json(&json!("id-1"))),
        );

        assert!(cache.is_stale(&list_a));
        assert!(cache.is_stale(&list_b));
        assert!(cache.is_stale(&stats));
        assert!(cache.is_stale(&detail));
        assert!(!cache.is_stale(&other_detail));
        assert!(!cache.is_stale(&unrelated));
    }

    #[test]
    fn freshness_window_is_five_minutes() {
        let mut cache = QueryCache::default();
        let key = QueryKey::list("logs", &json!({}));

        let seq = cache.begin_fetch(&key, at(0));
        cache.complete_fetch(&key, seq, Ok(json!([])), at(0));

        assert!(cache.is_fresh(&key, at(FRESH_WINDOW_SECS - 1)));
        assert!(!cache.is_fresh(&key, at(FRESH_WINDOW_SECS)));
        assert!(cache.needs_fetch(&key, at(FRESH_WINDOW_SECS)));
    }

    #[test]
    fn gc_evicts_inactive_entries_but_not_in_flight() {
        let mut cache = QueryCache::default();
        let idle = QueryKey::list("logs", &json!({"page": 1}));
        let busy = QueryKey::list("logs", &json!({"page": 2}));

        cache.touch(&idle, at(0));
        cache.begin_fetch(&busy, at(0));

        cache.gc(at(CACHE_EVICT_SECS + 1));
        assert!(cache.entry(&idle).is_none());
        assert!(cache.entry(&busy).is_some());
    }

    #[test]
    fn retry_delays_double_and_cap() {
        assert_eq!(retry_delay_ms(0), 1000);
        assert_eq!(retry_delay_ms(1), 2000);
        assert_eq!(retry_delay_ms(4), 16_000);
        assert_eq!(retry_delay_ms(5), 30_000);
        assert_eq!(retry_delay_ms(40), 30_000);
    }
}
