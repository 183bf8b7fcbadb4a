use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing::{Subscriber, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install the global tracing subscriber and describe the metrics folio emits.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(output_layer(logging.format))
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })?;

    info!(
        target = "folio::telemetry",
        level = %logging.level,
        format = ?logging.format,
        "logging initialised"
    );
    Ok(())
}

fn output_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    }
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "folio_api_cache_hit_total",
            Unit::Count,
            "Upstream responses served from the in-memory cache."
        );
        describe_counter!(
            "folio_api_cache_miss_total",
            Unit::Count,
            "Cache lookups that found no fresh entry."
        );
        describe_counter!(
            "folio_api_cache_expired_total",
            Unit::Count,
            "Cache entries evicted because they outlived the freshness window."
        );
        describe_counter!(
            "folio_api_retry_total",
            Unit::Count,
            "Upstream requests retried after a retryable failure."
        );
        describe_histogram!(
            "folio_api_request_ms",
            Unit::Milliseconds,
            "Latency of a single upstream request attempt in milliseconds."
        );
        describe_counter!(
            "folio_contact_submissions_total",
            Unit::Count,
            "Contact form submissions forwarded to the relay, labelled by outcome."
        );
    });
}
