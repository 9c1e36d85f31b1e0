//! Process meter registry.
//!
//! `MeterRegistry` is the single owner of every metric in the process. It is
//! built once at startup and shared through `Arc`; nothing installs it as the
//! global `metrics` recorder. Code that wants the `metrics` macros scopes them
//! to the registry with [`metrics::with_local_recorder`].
//!
//! Each registration is mirrored into two places:
//!
//! - a readable atomic store (`metrics_util::registry::Registry`) that backs
//!   value reads and the `/actuator/metrics` endpoints
//! - a `PrometheusRecorder` that owns the scrape rendering
//!
//! Counters are exported to Prometheus with a `_total` suffix, so the
//! `hello_counter` meter scrapes as `hello_counter_total`. Two counters that
//! would share an export name (`x` and `x_total`) cannot coexist: the first
//! registration claims the name and later ones are ignored with a warning.

use metrics::{
    Counter, CounterFn, Gauge, GaugeFn, Histogram, HistogramFn, Key, KeyName, Label, Level,
    Metadata, Recorder, SharedString, Unit,
};
use metrics_exporter_prometheus::{PrometheusHandle, PrometheusRecorder};
use metrics_util::registry::{Registry, Storage};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Suffix appended to counter names in the Prometheus exposition.
const COUNTER_SUFFIX: &str = "_total";

// ============================================================================
// Storage
// ============================================================================

/// Monotonic counter storage.
#[derive(Clone, Default)]
pub struct CounterCell(Arc<AtomicU64>);

impl CounterCell {
    fn value(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}

impl CounterFn for CounterCell {
    fn increment(&self, value: u64) {
        self.0.fetch_add(value, Ordering::AcqRel);
    }

    fn absolute(&self, value: u64) {
        self.0.fetch_max(value, Ordering::AcqRel);
    }
}

/// Gauge storage; holds the bit pattern of an `f64`.
#[derive(Clone, Default)]
pub struct GaugeCell(Arc<AtomicU64>);

impl GaugeCell {
    fn value(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn update(&self, f: impl Fn(f64) -> f64) {
        // fetch_update only fails when the closure returns None
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(f(f64::from_bits(bits)).to_bits())
            });
    }
}

impl GaugeFn for GaugeCell {
    fn increment(&self, value: f64) {
        self.update(|current| current + value);
    }

    fn decrement(&self, value: f64) {
        self.update(|current| current - value);
    }

    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

#[derive(Default)]
struct DistributionStats {
    count: AtomicU64,
    total: AtomicU64,
    max: AtomicU64,
}

/// Distribution summary storage: count, total and max of recorded samples.
#[derive(Clone, Default)]
pub struct DistributionCell(Arc<DistributionStats>);

impl DistributionCell {
    fn count(&self) -> u64 {
        self.0.count.load(Ordering::Acquire)
    }

    fn total(&self) -> f64 {
        f64::from_bits(self.0.total.load(Ordering::Acquire))
    }

    fn max(&self) -> f64 {
        f64::from_bits(self.0.max.load(Ordering::Acquire))
    }
}

impl HistogramFn for DistributionCell {
    fn record(&self, value: f64) {
        let stats = &self.0;
        let _ = stats
            .total
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + value).to_bits())
            });
        let _ = stats
            .max
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (value > f64::from_bits(bits)).then(|| value.to_bits())
            });
        stats.count.fetch_add(1, Ordering::AcqRel);
    }
}

/// `metrics-util` storage producing the readable cells above.
pub struct MeterStorage;

impl Storage<Key> for MeterStorage {
    type Counter = CounterCell;
    type Gauge = GaugeCell;
    type Histogram = DistributionCell;

    fn counter(&self, _: &Key) -> Self::Counter {
        CounterCell::default()
    }

    fn gauge(&self, _: &Key) -> Self::Gauge {
        GaugeCell::default()
    }

    fn histogram(&self, _: &Key) -> Self::Histogram {
        DistributionCell::default()
    }
}

// ============================================================================
// Mirrored handles
// ============================================================================

struct MirroredCounter {
    local: CounterCell,
    exported: Counter,
}

impl CounterFn for MirroredCounter {
    fn increment(&self, value: u64) {
        self.local.increment(value);
        self.exported.increment(value);
    }

    fn absolute(&self, value: u64) {
        self.local.absolute(value);
        self.exported.absolute(value);
    }
}

struct MirroredGauge {
    local: GaugeCell,
    exported: Gauge,
}

impl GaugeFn for MirroredGauge {
    fn increment(&self, value: f64) {
        self.local.increment(value);
        self.exported.increment(value);
    }

    fn decrement(&self, value: f64) {
        self.local.decrement(value);
        self.exported.decrement(value);
    }

    fn set(&self, value: f64) {
        self.local.set(value);
        self.exported.set(value);
    }
}

struct MirroredHistogram {
    local: DistributionCell,
    exported: Histogram,
}

impl HistogramFn for MirroredHistogram {
    fn record(&self, value: f64) {
        self.local.record(value);
        self.exported.record(value);
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Kind of a registered meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterKind {
    Counter,
    Gauge,
    Distribution,
}

#[derive(Debug, Clone)]
struct MeterDescription {
    unit: Option<Unit>,
    text: SharedString,
}

/// A counter registered in a [`MeterRegistry`] that can also be read back.
#[derive(Clone)]
pub struct TrackedCounter {
    handle: Counter,
    reading: CounterCell,
}

impl TrackedCounter {
    /// Add one to the counter.
    pub fn increment(&self) {
        self.handle.increment(1);
    }

    /// Current cumulative count.
    pub fn count(&self) -> f64 {
        self.reading.value() as f64
    }
}

/// Statistic reported for a meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Statistic {
    Count,
    Value,
    Total,
    TotalTime,
    Max,
}

/// One statistic of a meter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub statistic: Statistic,
    pub value: f64,
}

/// Tag key together with every value seen across the matched meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableTag {
    pub tag: String,
    pub values: Vec<String>,
}

/// Aggregated view of all meters sharing a name, after tag filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub base_unit: Option<String>,
    pub measurements: Vec<Measurement>,
    pub available_tags: Vec<AvailableTag>,
}

/// Process-wide registry of meters.
pub struct MeterRegistry {
    meters: Registry<Key, MeterStorage>,
    descriptions: RwLock<HashMap<String, MeterDescription>>,
    // exported counter name -> local counter name that claimed it
    export_names: RwLock<HashMap<String, String>>,
    exporter: PrometheusRecorder,
    exporter_handle: PrometheusHandle,
}

impl MeterRegistry {
    /// Wrap a Prometheus recorder that has been built but not installed.
    pub fn new(exporter: PrometheusRecorder) -> Self {
        let exporter_handle = exporter.handle();
        Self {
            meters: Registry::new(MeterStorage),
            descriptions: RwLock::new(HashMap::new()),
            export_names: RwLock::new(HashMap::new()),
            exporter,
            exporter_handle,
        }
    }

    /// Describe and register a readable counter.
    ///
    /// Registering the same name again returns a handle onto the same storage.
    /// A name whose export name is already taken by another counter gets a
    /// detached handle that records nothing and always reads zero.
    pub fn counter(&self, name: &'static str, description: &'static str) -> TrackedCounter {
        if !self.claim_export_name(name) {
            return TrackedCounter {
                handle: Counter::noop(),
                reading: CounterCell::default(),
            };
        }

        self.describe_counter(
            KeyName::from_const_str(name),
            None,
            SharedString::const_str(description),
        );

        let key = Key::from_static_name(name);
        let metadata = Metadata::new(module_path!(), Level::INFO, Some(module_path!()));
        let handle = self.register_counter(&key, &metadata);
        let reading = self.meters.get_or_create_counter(&key, CounterCell::clone);

        TrackedCounter { handle, reading }
    }

    /// Names of all registered meters, sorted and de-duplicated.
    pub fn names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.meters.visit_counters(|key, _| {
            names.insert(key.name().to_string());
        });
        self.meters.visit_gauges(|key, _| {
            names.insert(key.name().to_string());
        });
        self.meters.visit_histograms(|key, _| {
            names.insert(key.name().to_string());
        });
        names.into_iter().collect()
    }

    /// Aggregate every meter named `name` whose labels contain all `filters`.
    ///
    /// Returns `None` when no meter matches.
    pub fn snapshot(&self, name: &str, filters: &[(String, String)]) -> Option<MeterSnapshot> {
        let selected = |key: &Key| key.name() == name && matches_filters(key, filters);

        let mut counters = Vec::new();
        let mut gauges = Vec::new();
        let mut distributions = Vec::new();

        self.meters.visit_counters(|key, cell| {
            if selected(key) {
                counters.push((key.clone(), cell.value()));
            }
        });
        self.meters.visit_gauges(|key, cell| {
            if selected(key) {
                gauges.push((key.clone(), cell.value()));
            }
        });
        self.meters.visit_histograms(|key, cell| {
            if selected(key) {
                distributions.push((key.clone(), cell.clone()));
            }
        });

        // A name shared across kinds reports the first kind only, tags included
        let (kind, keys): (MeterKind, Vec<Key>) = if !counters.is_empty() {
            (MeterKind::Counter, counters.iter().map(|(k, _)| k.clone()).collect())
        } else if !gauges.is_empty() {
            (MeterKind::Gauge, gauges.iter().map(|(k, _)| k.clone()).collect())
        } else if !distributions.is_empty() {
            (
                MeterKind::Distribution,
                distributions.iter().map(|(k, _)| k.clone()).collect(),
            )
        } else {
            return None;
        };

        let description = self.description(name);
        let unit = description.as_ref().and_then(|d| d.unit.clone());

        let measurements = match kind {
            MeterKind::Counter => vec![Measurement {
                statistic: Statistic::Count,
                value: counters.iter().map(|(_, v)| *v as f64).sum(),
            }],
            MeterKind::Gauge => vec![Measurement {
                statistic: Statistic::Value,
                value: gauges.iter().map(|(_, v)| v).sum(),
            }],
            MeterKind::Distribution => {
                let total_statistic = if unit == Some(Unit::Seconds) {
                    Statistic::TotalTime
                } else {
                    Statistic::Total
                };
                vec![
                    Measurement {
                        statistic: Statistic::Count,
                        value: distributions.iter().map(|(_, d)| d.count() as f64).sum(),
                    },
                    Measurement {
                        statistic: total_statistic,
                        value: distributions.iter().map(|(_, d)| d.total()).sum(),
                    },
                    Measurement {
                        statistic: Statistic::Max,
                        value: distributions
                            .iter()
                            .map(|(_, d)| d.max())
                            .fold(0.0, f64::max),
                    },
                ]
            }
        };

        Some(MeterSnapshot {
            name: name.to_string(),
            description: description.map(|d| (*d.text).to_owned()),
            base_unit: unit.map(|u| u.as_str().to_string()),
            measurements,
            available_tags: available_tags(&keys, filters),
        })
    }

    /// Render every meter in the Prometheus text exposition format.
    pub fn render_prometheus(&self) -> String {
        self.exporter_handle.render()
    }

    /// Drain pending histogram samples in the exporter.
    pub fn run_upkeep(&self) {
        self.exporter_handle.run_upkeep();
    }

    fn describe(&self, name: &str, unit: Option<Unit>, text: SharedString) {
        let mut descriptions = self
            .descriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        descriptions
            .entry(name.to_string())
            .or_insert(MeterDescription { unit, text });
    }

    /// Claim the export name of counter `name`.
    ///
    /// Returns false, with a warning, when another counter already owns it.
    fn claim_export_name(&self, name: &str) -> bool {
        let exported = exported_counter_name(name);
        let mut claims = self
            .export_names
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let owner = claims
            .entry(exported.clone())
            .or_insert_with(|| name.to_string());

        if owner == name {
            return true;
        }

        tracing::warn!(
            target: "hello.metrics",
            counter = name,
            exported = %exported,
            owner = %owner,
            "Counter export name already taken, registration ignored"
        );
        false
    }

    fn description(&self, name: &str) -> Option<MeterDescription> {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl Recorder for MeterRegistry {
    fn describe_counter(&self, key: KeyName, unit: Option<Unit>, description: SharedString) {
        if !self.claim_export_name(key.as_str()) {
            return;
        }
        self.describe(key.as_str(), unit.clone(), description.clone());
        self.exporter.describe_counter(
            KeyName::from(exported_counter_name(key.as_str())),
            unit,
            description,
        );
    }

    fn describe_gauge(&self, key: KeyName, unit: Option<Unit>, description: SharedString) {
        self.describe(key.as_str(), unit.clone(), description.clone());
        self.exporter.describe_gauge(key, unit, description);
    }

    fn describe_histogram(&self, key: KeyName, unit: Option<Unit>, description: SharedString) {
        self.describe(key.as_str(), unit.clone(), description.clone());
        self.exporter.describe_histogram(key, unit, description);
    }

    fn register_counter(&self, key: &Key, metadata: &Metadata<'_>) -> Counter {
        if !self.claim_export_name(key.name()) {
            return Counter::noop();
        }

        let exported_key = Key::from_parts(
            exported_counter_name(key.name()),
            key.labels().cloned().collect::<Vec<Label>>(),
        );
        let exported = self.exporter.register_counter(&exported_key, metadata);
        let local = self.meters.get_or_create_counter(key, CounterCell::clone);
        Counter::from_arc(Arc::new(MirroredCounter { local, exported }))
    }

    fn register_gauge(&self, key: &Key, metadata: &Metadata<'_>) -> Gauge {
        let exported = self.exporter.register_gauge(key, metadata);
        let local = self.meters.get_or_create_gauge(key, GaugeCell::clone);
        Gauge::from_arc(Arc::new(MirroredGauge { local, exported }))
    }

    fn register_histogram(&self, key: &Key, metadata: &Metadata<'_>) -> Histogram {
        let exported = self.exporter.register_histogram(key, metadata);
        let local = self.meters.get_or_create_histogram(key, DistributionCell::clone);
        Histogram::from_arc(Arc::new(MirroredHistogram { local, exported }))
    }
}

/// Prometheus name for a counter: `_total` appended unless already present.
fn exported_counter_name(name: &str) -> String {
    if name.ends_with(COUNTER_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, COUNTER_SUFFIX)
    }
}

fn matches_filters(key: &Key, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(tag, value)| {
        key.labels()
            .any(|label| label.key() == tag && label.value() == value)
    })
}

/// Tags of the matched meters, minus the ones already used as filters.
fn available_tags(keys: &[Key], filters: &[(String, String)]) -> Vec<AvailableTag> {
    let mut tags: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for key in keys {
        for label in key.labels() {
            if filters.iter().any(|(tag, _)| tag == label.key()) {
                continue;
            }
            tags.entry(label.key().to_string())
                .or_default()
                .insert(label.value().to_string());
        }
    }

    tags.into_iter()
        .map(|(tag, values)| AvailableTag {
            tag,
            values: values.into_iter().collect(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use metrics::{counter, describe_histogram, gauge, histogram};
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn registry() -> MeterRegistry {
        MeterRegistry::new(PrometheusBuilder::new().build_recorder())
    }

    fn filters(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exported_counter_name() {
        assert_eq!(exported_counter_name("hello_counter"), "hello_counter_total");
        assert_eq!(exported_counter_name("requests_total"), "requests_total");
    }

    #[test]
    fn test_tracked_counter_starts_at_zero_and_counts() {
        let registry = registry();
        let counter = registry.counter("hello_counter", "Access counter");

        assert_eq!(counter.count(), 0.0);
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2.0);
    }

    #[test]
    fn test_registering_twice_shares_storage() {
        let registry = registry();
        let first = registry.counter("hello_counter", "Access counter");
        let second = registry.counter("hello_counter", "Access counter");

        first.increment();
        assert_eq!(second.count(), 1.0);
        assert_eq!(registry.names(), vec!["hello_counter".to_string()]);
    }

    #[test]
    fn test_counter_rendered_with_total_suffix() {
        let registry = registry();
        let counter = registry.counter("hello_counter", "Access counter");
        counter.increment();
        counter.increment();
        counter.increment();

        let rendered = registry.render_prometheus();
        assert!(rendered.contains("# HELP hello_counter_total Access counter"));
        assert!(rendered.contains("# TYPE hello_counter_total counter"));
        assert!(rendered.contains("hello_counter_total 3"));
    }

    #[test]
    fn test_counter_snapshot() {
        let registry = registry();
        let counter = registry.counter("hello_counter", "Access counter");
        counter.increment();

        let snapshot = registry.snapshot("hello_counter", &[]).unwrap();
        assert_eq!(snapshot.name, "hello_counter");
        assert_eq!(snapshot.description.as_deref(), Some("Access counter"));
        assert_eq!(snapshot.base_unit, None);
        assert_eq!(
            snapshot.measurements,
            vec![Measurement {
                statistic: Statistic::Count,
                value: 1.0
            }]
        );
        assert!(snapshot.available_tags.is_empty());
    }

    #[test]
    fn test_unknown_meter_has_no_snapshot() {
        let registry = registry();
        registry.counter("hello_counter", "Access counter");
        assert!(registry.snapshot("nope", &[]).is_none());
    }

    #[test]
    fn test_macros_scoped_to_local_registry() {
        let registry = registry();

        metrics::with_local_recorder(&registry, || {
            counter!("jobs", "queue" => "a").increment(2);
            counter!("jobs", "queue" => "b").increment(3);
            gauge!("temperature").set(21.5);
        });

        let jobs = registry.snapshot("jobs", &[]).unwrap();
        assert_eq!(jobs.measurements[0].value, 5.0);
        assert_eq!(
            jobs.available_tags,
            vec![AvailableTag {
                tag: "queue".to_string(),
                values: vec!["a".to_string(), "b".to_string()],
            }]
        );

        let temperature = registry.snapshot("temperature", &[]).unwrap();
        assert_eq!(temperature.measurements[0].statistic, Statistic::Value);
        assert_eq!(temperature.measurements[0].value, 21.5);

        assert_eq!(
            registry.names(),
            vec!["jobs".to_string(), "temperature".to_string()]
        );
    }

    #[test]
    fn test_tag_filter_narrows_and_hides_used_tags() {
        let registry = registry();

        metrics::with_local_recorder(&registry, || {
            counter!("jobs", "queue" => "a", "region" => "eu").increment(2);
            counter!("jobs", "queue" => "b", "region" => "us").increment(3);
        });

        let snapshot = registry
            .snapshot("jobs", &filters(&[("queue", "b")]))
            .unwrap();
        assert_eq!(snapshot.measurements[0].value, 3.0);
        assert_eq!(
            snapshot.available_tags,
            vec![AvailableTag {
                tag: "region".to_string(),
                values: vec!["us".to_string()],
            }]
        );

        assert!(registry
            .snapshot("jobs", &filters(&[("queue", "c")]))
            .is_none());
    }

    #[test]
    fn test_distribution_snapshot_in_seconds() {
        let registry = registry();

        metrics::with_local_recorder(&registry, || {
            describe_histogram!("latency", Unit::Seconds, "Request latency");
            histogram!("latency").record(0.5);
            histogram!("latency").record(1.5);
            histogram!("latency").record(1.0);
        });

        let snapshot = registry.snapshot("latency", &[]).unwrap();
        assert_eq!(snapshot.base_unit.as_deref(), Some("seconds"));
        assert_eq!(
            snapshot.measurements,
            vec![
                Measurement {
                    statistic: Statistic::Count,
                    value: 3.0
                },
                Measurement {
                    statistic: Statistic::TotalTime,
                    value: 3.0
                },
                Measurement {
                    statistic: Statistic::Max,
                    value: 1.5
                },
            ]
        );
    }

    #[test]
    fn test_distribution_without_unit_reports_total() {
        let registry = registry();

        metrics::with_local_recorder(&registry, || {
            histogram!("payload_size").record(10.0);
        });

        let snapshot = registry.snapshot("payload_size", &[]).unwrap();
        assert_eq!(snapshot.measurements[1].statistic, Statistic::Total);
        assert_eq!(snapshot.measurements[1].value, 10.0);
    }

    #[test]
    fn test_snapshot_serializes_like_actuator() {
        let registry = registry();
        registry.counter("hello_counter", "Access counter").increment();

        let snapshot = registry.snapshot("hello_counter", &[]).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["name"], "hello_counter");
        assert_eq!(json["description"], "Access counter");
        assert!(json["baseUnit"].is_null());
        assert_eq!(json["measurements"][0]["statistic"], "COUNT");
        assert_eq!(json["measurements"][0]["value"], 1.0);
        assert_eq!(json["availableTags"], serde_json::json!([]));
    }

    #[test]
    fn test_name_shared_across_kinds_reports_one_kind() {
        let registry = registry();

        metrics::with_local_recorder(&registry, || {
            counter!("jobs", "queue" => "a").increment(4);
            gauge!("jobs", "host" => "worker-1").set(7.0);
        });

        let snapshot = registry.snapshot("jobs", &[]).unwrap();
        assert_eq!(
            snapshot.measurements,
            vec![Measurement {
                statistic: Statistic::Count,
                value: 4.0
            }]
        );
        assert_eq!(
            snapshot.available_tags,
            vec![AvailableTag {
                tag: "queue".to_string(),
                values: vec!["a".to_string()],
            }]
        );
    }

    #[test]
    fn test_colliding_export_name_is_rejected() {
        let registry = registry();
        let first = registry.counter("jobs", "Jobs run");
        let second = registry.counter("jobs_total", "Jobs run, again");

        first.increment();
        second.increment();
        second.increment();
        metrics::with_local_recorder(&registry, || {
            counter!("jobs_total").increment(10);
        });

        assert_eq!(first.count(), 1.0);
        assert_eq!(second.count(), 0.0);
        assert!(registry.snapshot("jobs_total", &[]).is_none());
        assert_eq!(registry.names(), vec!["jobs".to_string()]);

        let rendered = registry.render_prometheus();
        assert!(rendered.contains("jobs_total 1"));
        assert!(rendered.contains("# HELP jobs_total Jobs run\n"));
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let registry = Arc::new(registry());
        let counter = registry.counter("hello_counter", "Access counter");

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(counter.count(), 8000.0);
        assert!(registry
            .render_prometheus()
            .contains("hello_counter_total 8000"));
    }
}
