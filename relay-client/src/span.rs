use reqwest::{StatusCode, Url};
use relay_retry::CallFailure;
use tracing::Span;

/// The `http.method` field added to every outbound span.
pub const HTTP_METHOD: &str = "http.method";
/// The `http.url` field added to every outbound span.
pub const HTTP_URL: &str = "http.url";
/// The `http.status_code` field, recorded once the remote party answers.
pub const HTTP_STATUS_CODE: &str = "http.status_code";
/// The `otel.kind` field added to every outbound span.
pub const OTEL_KIND: &str = "otel.kind";
/// The `error.message` field, recorded when an attempt fails.
pub const ERROR_MESSAGE: &str = "error.message";

/// Span wrapping a single outbound attempt.
pub(crate) fn outbound_span(url: &Url) -> Span {
    tracing::info_span!(
        "outbound_call",
        http.method = "POST",
        http.url = %url,
        otel.kind = "client",
        http.status_code = tracing::field::Empty,
        error.message = tracing::field::Empty,
    )
}

pub(crate) fn record_status(span: &Span, status: StatusCode) {
    span.record(HTTP_STATUS_CODE, status.as_u16());
}

pub(crate) fn record_failure(span: &Span, failure: &CallFailure) {
    let error_message = failure.to_string();
    span.record(ERROR_MESSAGE, error_message.as_str());
    if let Some(status) = failure.status() {
        record_status(span, status);
    }
}
