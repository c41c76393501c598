//! Response composition.
//!
//! # Responsibilities
//! - Materialize the JSON bodies for the usage-info, blocked, and error
//!   outcomes
//! - Inject the fixed CORS header set on every response, whatever the
//!   outcome
//! - Carry the upstream content-type through when present
//!
//! # Design Decisions
//! - Relayed bodies stay streamed; only the small JSON outcome bodies are
//!   materialized
//! - `Access-Control-Allow-Headers` echoes the inbound request's value
//!   for preflight symmetry, falling back to a curated default list
//! - hyper emits canonical reason phrases only, so the upstream status
//!   text is not put on the wire

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::json;

use crate::proxy::forward::UpstreamResponse;

/// Methods advertised to browsers.
pub const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";

/// Default allow-list when the caller did not request specific headers.
pub const DEFAULT_ALLOW_HEADERS: &str = "Accept, Authorization, Cache-Control, Content-Type, DNT, If-Modified-Since, Keep-Alive, Origin, User-Agent, X-Requested-With, Token, x-access-token";

/// An outcome materialized up to, but not including, CORS injection.
pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Body,
}

fn json_reply(status: StatusCode, body: serde_json::Value) -> Reply {
    Reply {
        status,
        content_type: Some(HeaderValue::from_static("application/json")),
        body: Body::from(body.to_string()),
    }
}

/// Fixed usage payload; 400 for a malformed call, 200 for a bare root
/// visit or preflight.
pub fn usage_info(invalid: bool) -> Reply {
    let status = if invalid {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    json_reply(
        status,
        json!({
            "code": if invalid { 400 } else { 0 },
            "usage": "Host/{URL}",
            "source": env!("CARGO_PKG_REPOSITORY"),
        }),
    )
}

/// 403 naming the matched blocklist keywords.
pub fn blocked(keywords: &[String]) -> Reply {
    json_reply(
        StatusCode::FORBIDDEN,
        json!({
            "code": 403,
            "msg": format!(
                "The keyword: {} was blocklisted by the operator of this proxy.",
                keywords.join(" , ")
            ),
        }),
    )
}

/// 500 with a stringified diagnostic.
pub fn error(diagnostic: &str) -> Reply {
    json_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "code": -1,
            "msg": diagnostic,
        }),
    )
}

/// Relay the upstream status and streamed body verbatim.
pub fn relay(upstream: UpstreamResponse) -> Reply {
    Reply {
        status: upstream.status,
        content_type: upstream.content_type,
        body: upstream.body,
    }
}

/// Finalize a reply: inject the CORS set and optional content-type.
pub fn compose(requested_allow_headers: Option<&HeaderValue>, reply: Reply) -> Response {
    let mut response = Response::new(reply.body);
    *response.status_mut() = reply.status;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        requested_allow_headers
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOW_HEADERS)),
    );
    if let Some(content_type) = reply.content_type {
        headers.insert(header::CONTENT_TYPE, content_type);
    }

    response
}
