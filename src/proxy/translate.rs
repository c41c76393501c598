//! Inbound-to-outbound request translation.
//!
//! # Responsibilities
//! - Strip transport-managed headers the outbound client must recompute
//! - Choose the outbound body representation from the inbound content type
//! - Validate JSON payloads by round-tripping through the parser
//!
//! # Design Decisions
//! - Body dispatch is an explicit ordered match (json -> text -> form ->
//!   binary) so a content type containing several trigger substrings
//!   resolves deterministically (`multipart/form-data` hits `form`)
//! - GET and HEAD never carry a body; no method/content-type combination
//!   is an error on its own
//! - Form bodies are re-encoded by the outbound client with a fresh
//!   content-type/boundary, never forwarded with the original header

use axum::http::{header, HeaderMap, Method};
use bytes::Bytes;
use thiserror::Error;

/// Errors raised while building the outbound specification.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] multer::Error),
}

/// Everything the forwarder needs to execute the outbound request.
#[derive(Debug)]
pub struct OutboundSpec {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: OutboundBody,
}

/// Outbound body representation, chosen per the content-type table.
#[derive(Debug)]
pub enum OutboundBody {
    Empty,
    /// Parsed and re-serialized JSON.
    Json(serde_json::Value),
    /// Raw text payload.
    Text(String),
    /// Urlencoded form pairs, re-encoded by the client.
    Form(Vec<(String, String)>),
    /// Multipart fields, rebuilt with a fresh boundary.
    Multipart(Vec<FormPart>),
    /// Opaque passthrough.
    Binary(Bytes),
}

/// One field of a multipart form.
#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Whether this method forwards an inbound body at all.
pub fn method_carries_body(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Build the outbound specification from the inbound request parts.
pub async fn translate(
    method: &Method,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<OutboundSpec, TranslateError> {
    let mut outbound = HeaderMap::new();
    for (name, value) in headers {
        if name == header::CONTENT_LENGTH || name == header::CONTENT_TYPE || name == header::HOST {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }

    let body = encode_body(method, headers, body).await?;

    Ok(OutboundSpec {
        method: method.clone(),
        headers: outbound,
        body,
    })
}

async fn encode_body(
    method: &Method,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<OutboundBody, TranslateError> {
    if !method_carries_body(method) {
        return Ok(OutboundBody::Empty);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.contains("application/json") {
        Ok(OutboundBody::Json(serde_json::from_slice(&body)?))
    } else if content_type.contains("application/text") || content_type.contains("text/html") {
        Ok(OutboundBody::Text(String::from_utf8_lossy(&body).into_owned()))
    } else if content_type.contains("form") {
        if content_type.contains("multipart") {
            parse_multipart(&content_type, body).await
        } else {
            let pairs = url::form_urlencoded::parse(&body).into_owned().collect();
            Ok(OutboundBody::Form(pairs))
        }
    } else {
        Ok(OutboundBody::Binary(body))
    }
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<OutboundBody, TranslateError> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(|m| m.to_string());
        let data = field.bytes().await?;
        parts.push(FormPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    Ok(OutboundBody::Multipart(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("host", HeaderValue::from_static("proxy.local"));
        map.insert("content-length", HeaderValue::from_static("42"));
        map.insert("authorization", HeaderValue::from_static("Bearer token"));
        map.insert("x-custom", HeaderValue::from_static("kept"));
        if let Some(ct) = content_type {
            map.insert("content-type", HeaderValue::from_str(ct).unwrap());
        }
        map
    }

    #[tokio::test]
    async fn test_transport_headers_stripped() {
        let spec = translate(&Method::POST, &headers(Some("application/json")), Bytes::from("{}"))
            .await
            .unwrap();
        assert!(spec.headers.get("host").is_none());
        assert!(spec.headers.get("content-length").is_none());
        assert!(spec.headers.get("content-type").is_none());
        assert_eq!(spec.headers.get("authorization").unwrap(), "Bearer token");
        assert_eq!(spec.headers.get("x-custom").unwrap(), "kept");
    }

    #[tokio::test]
    async fn test_get_and_head_never_carry_body() {
        for method in [Method::GET, Method::HEAD] {
            let spec = translate(&method, &headers(Some("application/json")), Bytes::from("ignored"))
                .await
                .unwrap();
            assert!(matches!(spec.body, OutboundBody::Empty));
        }
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let payload = br#"{"b": 2, "a": [1, null]}"#;
        let spec = translate(
            &Method::POST,
            &headers(Some("application/json; charset=utf-8")),
            Bytes::from_static(payload),
        )
        .await
        .unwrap();
        match spec.body {
            OutboundBody::Json(value) => {
                let reparsed: serde_json::Value = serde_json::from_slice(payload).unwrap();
                assert_eq!(value, reparsed);
            }
            other => panic!("expected Json body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let result = translate(
            &Method::POST,
            &headers(Some("application/json")),
            Bytes::from_static(b"{not json"),
        )
        .await;
        assert!(matches!(result, Err(TranslateError::Json(_))));
    }

    #[tokio::test]
    async fn test_text_variants() {
        for ct in ["application/text", "text/html; charset=utf-8"] {
            let spec = translate(&Method::PUT, &headers(Some(ct)), Bytes::from_static(b"<p>hi</p>"))
                .await
                .unwrap();
            match spec.body {
                OutboundBody::Text(text) => assert_eq!(text, "<p>hi</p>"),
                other => panic!("expected Text body, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_urlencoded_form_parsed_into_pairs() {
        let spec = translate(
            &Method::POST,
            &headers(Some("application/x-www-form-urlencoded")),
            Bytes::from_static(b"a=1&b=two%20words"),
        )
        .await
        .unwrap();
        match spec.body {
            OutboundBody::Form(pairs) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0], ("a".to_string(), "1".to_string()));
                assert_eq!(pairs[1], ("b".to_string(), "two words".to_string()));
            }
            other => panic!("expected Form body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multipart_matches_form_before_binary() {
        let body = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"field1\"\r\n\r\n",
            "value1\r\n",
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"file1\"; filename=\"a.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "file contents\r\n",
            "--XBOUND--\r\n"
        );
        let spec = translate(
            &Method::POST,
            &headers(Some("multipart/form-data; boundary=XBOUND")),
            Bytes::from_static(body.as_bytes()),
        )
        .await
        .unwrap();
        match spec.body {
            OutboundBody::Multipart(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].name, "field1");
                assert_eq!(parts[0].data.as_ref(), b"value1");
                assert_eq!(parts[1].file_name.as_deref(), Some("a.txt"));
                assert_eq!(parts[1].content_type.as_deref(), Some("text/plain"));
            }
            other => panic!("expected Multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_or_missing_content_type_is_binary() {
        for ct in [Some("application/octet-stream"), None] {
            let spec = translate(&Method::DELETE, &headers(ct), Bytes::from_static(b"\x00\x01"))
                .await
                .unwrap();
            match spec.body {
                OutboundBody::Binary(data) => assert_eq!(data.as_ref(), b"\x00\x01"),
                other => panic!("expected Binary body, got {:?}", other),
            }
        }
    }
}
