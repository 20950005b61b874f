//! Feed routes: one GET/OPTIONS pair per content type with an enabled feed.

use axum::{
    Extension, Router,
    extract::{Query, State, rejection::QueryRejection},
    handler::Handler,
    http::StatusCode,
    response::Json,
    routing::get,
};
use restfeed_core::error::Error;
use restfeed_core::request::FeedRequest;
use restfeed_core::schema::Document;
use restfeed_feed::{FeedService, FeedUrls};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::SharedState;

/// Content type served by a route.
#[derive(Debug, Clone)]
pub struct FeedRoute {
    pub content_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// Error body shared by every route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorData {
    pub status: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            code: code.into(),
            message: message.into(),
            data: ErrorData {
                status: status.as_u16(),
            },
        }),
    )
}

/// Map a domain error onto its HTTP response.
pub fn api_error(err: &Error) -> ApiError {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Feed request failed");
    } else {
        debug!(error = %err, code = err.code(), "Feed request rejected");
    }
    error_response(status, err.code(), err.to_string())
}

/// Path the router mounts a feed at, below the REST root's own path.
pub fn route_path(rest_url: &str, namespace: &str, base: &str) -> String {
    let prefix = url::Url::parse(rest_url)
        .map(|u| u.path().trim_matches('/').to_string())
        .unwrap_or_default();
    let route = FeedUrls::route_path(namespace, base);
    if prefix.is_empty() {
        format!("/{route}")
    } else {
        format!("/{prefix}/{route}")
    }
}

/// Register a route for every content type with an enabled feed.
pub fn feed_router(feed: &FeedService) -> Router<SharedState> {
    let mut router = Router::new();
    for ct in feed.feed_types() {
        let path = route_path(
            &feed.site().rest_url,
            feed.urls().namespace(),
            FeedUrls::resolve_base(ct),
        );
        info!(content_type = %ct.name, path = %path, "Registering feed route");
        router = router.route(
            &path,
            get(get_feed.layer(crate::cors_layer()))
                .options(describe_feed)
                .layer(Extension(FeedRoute {
                    content_type: ct.name.clone(),
                })),
        );
    }
    router
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    debug!(error = %rejection, "Unparseable query string");
    error_response(
        StatusCode::BAD_REQUEST,
        "rest_invalid_param",
        format!("Invalid parameter(s): {}", rejection.body_text()),
    )
}

fn parse_page(raw: Option<&str>) -> Result<Option<u64>, ApiError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(page) if page >= 1 => Ok(Some(page)),
        _ => {
            debug!(page = raw, "Invalid page parameter");
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "rest_invalid_param",
                "Invalid parameter(s): page must be an integer of at least 1.",
            ))
        }
    }
}

/// GET: the feed document.
async fn get_feed(
    State(state): State<SharedState>,
    Extension(route): Extension<FeedRoute>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<Json<Document>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let request = FeedRequest {
        page: parse_page(query.page.as_deref())?,
    };
    let doc = state
        .feed
        .get_feed(&route.content_type, &request)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(doc))
}

/// OPTIONS: route description with the active schema.
async fn describe_feed(
    State(state): State<SharedState>,
    Extension(route): Extension<FeedRoute>,
) -> Result<Json<Value>, ApiError> {
    let ct = state
        .feed
        .enabled_type(&route.content_type)
        .map_err(|e| api_error(&Error::from(e)))?;
    let schema = state.feed.get_schema(ct, &FeedRequest::default());
    Ok(Json(json!({
        "namespace": state.feed.urls().namespace(),
        "methods": ["GET"],
        "schema": schema.to_json(),
    })))
}

/// Fallback for paths without a route.
pub async fn no_route() -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        "rest_no_route",
        "No route was found matching the URL and request method.",
    )
}
