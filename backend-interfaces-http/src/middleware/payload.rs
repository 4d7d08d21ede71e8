use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::{header, HeaderMap};
use flate2::read::GzDecoder;
use serde_json::Value;

use backend_domain::TransactionTable;

pub const NO_DATA_MESSAGE: &str = "no file or transactions provided";

/// Parses a `{"transactions": ...}` body, gunzipping it first when flagged.
pub fn parse_json_transactions(headers: &HeaderMap, body: &[u8]) -> Result<TransactionTable> {
    let content = maybe_gunzip(headers, body)?;
    if content.trim().is_empty() {
        return Err(anyhow!(NO_DATA_MESSAGE));
    }
    let payload: Value =
        serde_json::from_str(&content).map_err(|err| anyhow!("invalid JSON body: {}", err))?;
    let transactions = payload
        .get("transactions")
        .ok_or_else(|| anyhow!(NO_DATA_MESSAGE))?;
    Ok(TransactionTable::from_json(transactions)?)
}

pub fn parse_csv_upload(body: &[u8]) -> Result<TransactionTable> {
    Ok(TransactionTable::from_csv_reader(body)?)
}

pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get(header::CONTENT_ENCODING) {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}
