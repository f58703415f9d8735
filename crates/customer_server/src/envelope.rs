//! Uniform `{message, data}` JSON body used by every response.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;

pub const MSG_SUCCESS: &str = "SUCCESS";
pub const MSG_MARSHAL_ERROR: &str = "Error marshalling data";

const MARSHAL_ERROR_BODY: &str = r#"{"message":"Error marshalling data"}"#;

/// Response body; `data` is omitted from the JSON when `None`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Status code plus envelope, rendered as `application/json`.
#[derive(Debug)]
pub struct Reply<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> Reply<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status,
            envelope: Envelope {
                message: message.into(),
                data,
            },
        }
    }

    /// 200 `SUCCESS` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, MSG_SUCCESS, Some(data))
    }
}

impl Reply<()> {
    /// Message-only reply.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.envelope) {
            Ok(bytes) => json_response(self.status, Body::from(bytes)),
            Err(err) => {
                error!("event=envelope_encode module=http status=error error={err}");
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Body::from(MARSHAL_ERROR_BODY),
                )
            }
        }
    }
}

fn json_response(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[test]
    fn test_message_only_envelope_omits_data() {
        let envelope = Envelope::<()> {
            message: "SUCCESS".to_string(),
            data: None,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"message":"SUCCESS"}"#);
    }

    #[test]
    fn test_envelope_with_list_data() {
        let envelope = Envelope {
            message: "SUCCESS".to_string(),
            data: Some(vec![1, 2]),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"message": "SUCCESS", "data": [1, 2]}));
    }

    #[test]
    fn test_reply_sets_status_and_content_type() {
        let response = Reply::message(StatusCode::CREATED, MSG_SUCCESS).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_encode_failure_becomes_internal_error() {
        let response = Reply::ok(Unencodable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
