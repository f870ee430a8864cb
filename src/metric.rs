use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("order_relay_statds")
        .with_description("Order relay webhook statistics")
        .with_unit("event")
        .build()
});

fn incr_statds(metric: &'static str, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

/// Counts the outcome of an inbound webhook (notified, auth_failed, ...).
pub fn incr_webhook_statds(outcome: &str) {
    incr_statds("webhook", outcome.into())
}

/// Counts a routed reply by action kind, or `unhandled` / `dispatch_failed`.
pub fn incr_action_statds(action: &str) {
    incr_statds("action", action.into())
}
