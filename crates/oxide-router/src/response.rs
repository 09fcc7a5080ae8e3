//! HTTP response type.

use std::collections::HashMap;

use serde::Serialize;

const JSON: &str = "application/json";

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    /// Creates a new response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 response with JSON content.
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Self {
        Self::json_status(200, data)
    }

    /// Creates a response with JSON content and the given status.
    ///
    /// Falls back to a plain 500 if `data` cannot be serialized.
    pub fn json_status<T: Serialize + ?Sized>(status: u16, data: &T) -> Self {
        serde_json::to_vec(data).map_or_else(
            |_| Self::new(500).body("Internal Server Error"),
            |body| Self::new(status).header("Content-Type", JSON).body(body),
        )
    }

    /// Creates a `{"error": message}` response.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json_status(status, &ErrorBody { error: message })
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self::error(400, message)
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::error(404, "not found")
    }

    /// Creates a 405 Method Not Allowed response.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::error(405, "method not allowed")
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body is not valid JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_json() {
        let res = Response::json(&json!({"name": "test"}));
        assert_eq!(res.status, 200);
        assert_eq!(res.headers.get("Content-Type"), Some(&JSON.to_string()));
        assert_eq!(res.json_body().unwrap(), json!({"name": "test"}));
    }

    #[test]
    fn test_response_error() {
        let res = Response::error(404, "table 'x' does not exist");
        assert_eq!(res.status, 404);
        assert_eq!(
            res.json_body().unwrap(),
            json!({"error": "table 'x' does not exist"})
        );
    }

    #[test]
    fn test_response_builder() {
        let res = Response::new(204).header("X-Custom", "value").body("Hello");

        assert_eq!(res.status, 204);
        assert_eq!(res.headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(res.body, b"Hello");
    }
}
