//! Metric value rendering and event shape tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use statsink_core::{Event, EventMetric, MetricKind, MetricValue, StatsError, STAT_TAG};

#[test]
fn counter_view_coerces_other_kinds_to_zero() {
    assert_eq!(MetricValue::counter_or_zero(None), 0);
    assert_eq!(MetricValue::counter_or_zero(Some(&MetricValue::Counter(5))), 5);
    assert_eq!(MetricValue::counter_or_zero(Some(&MetricValue::Gauge(9.5))), 0);
    assert_eq!(MetricValue::counter_or_zero(Some(&MetricValue::Timing(1.0))), 0);
}

#[test]
fn json_rendering_per_kind() {
    assert_eq!(MetricValue::Counter(3).to_json(), json!(3));
    assert_eq!(MetricValue::Gauge(42.5).to_json(), json!(42.5));
    assert_eq!(MetricValue::Timing(0.25).to_json(), json!("0.25s"));
    assert_eq!(MetricValue::Timing(2.0).to_json(), json!("2s"));
    assert_eq!(MetricValue::Gauge(f64::NAN).to_json(), json!(null));
}

#[test]
fn absolute_follows_kind() {
    assert_eq!(
        MetricValue::absolute(MetricKind::Timing, 1.5).kind(),
        MetricKind::Timing
    );
    assert_eq!(
        MetricValue::absolute(MetricKind::Counter, 4.9),
        MetricValue::Counter(4)
    );
}

#[test]
fn stat_event_serializes_without_empty_fields() {
    let ev = Event::stat("service.requests", EventMetric::Int(3), 2.0);
    assert_eq!(ev.tags, vec![STAT_TAG.to_string()]);

    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(
        v,
        json!({ "service": "service.requests", "metric": 3, "tags": ["stat"], "ttl": 2.0 })
    );
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(StatsError::NotTracked.code().as_str(), "NOT_TRACKED");
    assert_eq!(StatsError::TimedOut.code().as_str(), "TIMED_OUT");
    assert_eq!(StatsError::EmptyAddress.code().as_str(), "BAD_CONFIG");
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    assert_eq!(StatsError::Connect(io).code().as_str(), "SINK_UNAVAILABLE");
}
