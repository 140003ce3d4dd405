use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_DIR: &str = "storage/logs";

/// Correlation id assigned to each request by [`logging_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Runs the request inside a `request` span and logs its outcome once:
/// `error` for 5xx, `warn` for 4xx, `info` otherwise.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = RequestId::generate();
    let span = info_span!(
        "request",
        request_id = %request_id.0,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(request_id);

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| match status {
        500..=599 => error!(status, latency_ms, "Server error"),
        400..=499 => warn!(status, latency_ms, "Client error"),
        _ => info!(status, latency_ms, "Request completed"),
    });

    response
}

/// Installs the global subscriber.
///
/// - console: compact, filtered by `RUST_LOG`, or `LOG_LEVEL` for this crate (default `info`)
/// - `storage/logs/avisgate.log`: errors only, rotated daily
/// - `storage/logs/avisgate.json`: structured info-level log, rotated daily
///
/// Falls back to console only when the log directory cannot be created.
pub fn init_tracing() {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "avisgate={lvl},avisgate_core={lvl},avisgate_auth={lvl},avisgate_observability={lvl},tower_http=warn,hyper=warn,sqlx=warn",
            lvl = log_level
        ))
    });

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        tracing_subscriber::registry().with(console_layer).init();
        warn!(error = %e, dir = LOG_DIR, "Log directory unavailable, console logging only");
        return;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "avisgate.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "avisgate.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .init();

    info!("Tracing initialized with console and file logging");
}
