//! Plain-text response bodies shared by the history and create endpoints.

use std::collections::BTreeMap;
use std::fmt::Write;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::api::constants::TEXT_PLAIN;
use crate::storage::Record;

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `code: <code>` header followed by one block per record.
pub fn records_body(code: &str, records: &[Record]) -> String {
    let mut body = format!("code: {}\n\n\n", code);
    for record in records {
        let expires = record
            .expires_at
            .as_ref()
            .map(format_instant)
            .unwrap_or_else(|| "never".to_string());
        let _ = write!(
            body,
            "url: {}\ncreatedAt: {}\nexpiresAt: {}\n\n",
            record.url,
            format_instant(&record.created_at),
            expires
        );
    }
    body
}

/// One `code -> url` line per currently valid code, sorted by code.
pub fn list_body(links: &BTreeMap<String, String>) -> String {
    links
        .iter()
        .fold(String::new(), |mut body, (code, url)| {
            let _ = writeln!(body, "{} -> {}", code, url);
            body
        })
}

pub fn text(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", TEXT_PLAIN))
        .body(body.into())
}

#[inline]
pub fn not_found() -> HttpResponse {
    text(StatusCode::NOT_FOUND, "404 Not Found")
}

#[inline]
pub fn bad_request(reason: &str) -> HttpResponse {
    text(StatusCode::BAD_REQUEST, format!("400 Bad Request: {}", reason))
}

#[inline]
pub fn internal_error() -> HttpResponse {
    text(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}

/// Minimal HTML escaping for attribute and text positions.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
