use axum::extract::{MatchedPath, Request};
use axum::{middleware::Next, response::Response};
use metrics::{counter, histogram};
use std::time::Instant;

/// Label used for requests that matched no route, so probes for arbitrary
/// paths cannot grow the label set.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Count and time every request, labelled by method, route template and status.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = route_label(&req);

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status().as_u16().to_string();

    let labels = [("method", method), ("path", path), ("status", status)];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    response
}

fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_route_label_uses_route_template() {
        let app = Router::new()
            .route(
                "/items/:id",
                get(|req: Request| async move { route_label(&req) }),
            )
            .layer(from_fn(metrics_middleware));

        let response = app
            .oneshot(HttpRequest::builder().uri("/items/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"/items/:id");
    }

    #[test]
    fn test_route_label_without_match() {
        let req = HttpRequest::builder().uri("/nowhere").body(Body::empty()).unwrap();
        assert_eq!(route_label(&req), UNMATCHED_PATH);
    }
}
