use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
    Resource,
};
use opentelemetry_semantic_conventions::resource::SERVICE_VERSION;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{FishTTSError, Result};

const SERVICE_NAME: &str = "fish-tts";

fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attribute(KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .build()
}

fn init_tracer_provider(url: &str) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(url)
        .with_protocol(Protocol::HttpBinary)
        .build()
        .map_err(|err| FishTTSError::config(format!("Cannot build OTLP exporter: {}", err)))?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource())
        .with_batch_exporter(exporter)
        .build())
}

/// `RUST_LOG` wins over the configured filter.
fn env_filter(log_filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter))
        .map_err(|err| {
            FishTTSError::config(format!("Invalid log filter {:?}: {}", log_filter, err))
        })
}

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// the conversion result. Spans are also exported over OTLP/HTTP when
/// `otel_http_url` is set.
pub fn init_tracing_subscriber(
    log_filter: &str,
    otel_http_url: Option<&str>,
) -> Result<OtelGuard> {
    let registry = tracing_subscriber::registry()
        .with(env_filter(log_filter)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if let Some(url) = otel_http_url {
        let tracer_provider = init_tracer_provider(url)?;
        let tracer = tracer_provider.tracer(SERVICE_NAME);

        registry.with(OpenTelemetryLayer::new(tracer)).init();

        Ok(OtelGuard {
            tracer_provider: Some(tracer_provider),
        })
    } else {
        registry.init();

        Ok(OtelGuard {
            tracer_provider: None,
        })
    }
}

/// Flushes pending spans when dropped.
pub struct OtelGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(tracer_provider) = self.tracer_provider.take() {
            if let Err(err) = tracer_provider.shutdown() {
                eprintln!("Failed to flush traces: {}", err);
            }
        }
    }
}
