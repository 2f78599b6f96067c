use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use super::error::ClientError;
use crate::web::Error;

pub fn log_request(
    uuid: &str,
    req_method: &Method,
    uri: &Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_status_and_error: Option<&(StatusCode, ClientError)>,
) {
    if let Some(web_error) = web_error {
        error!(req_id = uuid, error = ?web_error, "SERVER ERROR");
    }

    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        uuid,
        req_method: req_method.as_str(),
        uri: uri.to_string(),
        status_code: client_status_and_error
            .map(|(sc, _)| sc.as_u16())
            .unwrap_or(status_code.as_u16()),
        client_error_type: client_status_and_error.map(|(_, ce)| ce.as_ref()),
        web_error_type: web_error.map(|we| we.as_ref()),
        web_error_detail: web_error.map(|we| we.to_string()),
    };

    debug!("LOGLINE: {}", json!(logline));
}

#[derive(Serialize)]
struct LogLine<'a> {
    timestamp: String,
    uuid: &'a str,

    req_method: &'a str,
    uri: String,
    status_code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    client_error_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_detail: Option<String>,
}
