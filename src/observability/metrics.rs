//! Metrics collection and exposition.
//!
//! # Metrics
//! - `user_service_requests_total` (counter): requests by method, route, status
//! - `user_service_request_duration_seconds` (histogram): latency by method, route
//! - `user_service_store_errors_total` (counter): storage failures by operation

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within the tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "user_service_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "user_service_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a storage failure for an operation.
pub fn record_store_error(operation: &'static str) {
    ::metrics::counter!("user_service_store_errors_total", "operation" => operation).increment(1);
}

/// Route-level middleware that times every matched request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    record_request(&method, &route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    fn series<'a>(rendered: &'a str, name: &str) -> Vec<&'a str> {
        rendered
            .lines()
            .filter(|line| line.starts_with(&format!("{name}{{")))
            .collect()
    }

    #[tokio::test]
    async fn test_track_requests_labels_matched_route() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = ::metrics::set_default_local_recorder(&recorder);

        let app = Router::new()
            .route("/users/{id}", get(|| async { StatusCode::NOT_FOUND }))
            .route_layer(middleware::from_fn(track_requests));

        let request = axum::http::Request::get("/users/g-42").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let rendered = handle.render();
        let requests = series(&rendered, "user_service_requests_total");
        assert_eq!(requests.len(), 1, "{rendered}");
        assert!(requests[0].contains(r#"route="/users/{id}""#));
        assert!(requests[0].contains(r#"status="404""#));
        assert!(requests[0].contains(r#"method="GET""#));
        assert!(requests[0].ends_with(" 1"));

        assert!(rendered.contains("user_service_request_duration_seconds"));
    }

    #[test]
    fn test_store_errors_counted_by_operation() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            record_store_error("Error fetching users");
            record_store_error("Error fetching users");
            record_store_error("Error creating user");
        });

        let rendered = handle.render();
        let errors = series(&rendered, "user_service_store_errors_total");
        assert_eq!(errors.len(), 2, "{rendered}");
        assert!(errors
            .iter()
            .any(|line| line.contains(r#"operation="Error fetching users""#) && line.ends_with(" 2")));
        assert!(errors
            .iter()
            .any(|line| line.contains(r#"operation="Error creating user""#) && line.ends_with(" 1")));
    }
}
