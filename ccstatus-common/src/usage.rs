//! Client for the OAuth usage endpoint.

use crate::errors::UsageError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Beta header value the usage endpoint requires.
pub const ANTHROPIC_BETA: &str = "oauth-2025-04-20";
/// Timeout for the rendering path.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the `doctor` connectivity probe.
pub const DOCTOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Utilization for one rolling window.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsageWindow {
    #[serde(default)]
    pub utilization: f64,
    /// RFC 3339 timestamp; absent or null when the window has not started.
    #[serde(default)]
    pub resets_at: Option<String>,
}

impl UsageWindow {
    /// Utilization truncated toward zero.
    pub fn percent(&self) -> i64 {
        self.utilization.trunc() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /api/oauth/usage`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsageResponse {
    #[serde(default)]
    pub five_hour: UsageWindow,
    #[serde(default)]
    pub seven_day: UsageWindow,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl UsageResponse {
    /// Turn an in-band `error` object into an error.
    pub fn into_result(self) -> Result<Self, UsageError> {
        match self.error {
            Some(err) => Err(UsageError::Api(err.message)),
            None => Ok(self),
        }
    }
}

/// Blocking client for one endpoint with a fixed timeout.
#[derive(Debug, Clone)]
pub struct UsageClient {
    api_url: String,
    timeout: Duration,
}

impl UsageClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_url: api_url.into(),
            timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch current usage. Exactly one request, no retries.
    pub fn fetch(&self, token: &str) -> Result<UsageResponse, UsageError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        debug!(url = %self.api_url, timeout_secs = self.timeout.as_secs(), "fetching usage");
        let mut response = agent
            .get(&self.api_url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .header("anthropic-beta", ANTHROPIC_BETA)
            .call()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            debug!(status, "usage endpoint returned an error status");
            return Err(UsageError::Status(status));
        }

        let usage: UsageResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| UsageError::Decode(e.to_string()))?;
        usage.into_result()
    }

    fn map_transport_error(&self, err: ureq::Error) -> UsageError {
        match err {
            ureq::Error::Timeout(_) => UsageError::Timeout(self.timeout),
            ureq::Error::StatusCode(code) => UsageError::Status(code),
            other => UsageError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response and hand back the raw request.
    fn serve_once(status_line: &str, body: &str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/oauth/usage", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_decode_full_response() {
        let usage: UsageResponse = serde_json::from_str(
            r#"{
                "five_hour": {"utilization": 42.9, "resets_at": "2025-01-15T15:45:00Z"},
                "seven_day": {"utilization": 7.0, "resets_at": null},
                "seven_day_opus": {"utilization": 0}
            }"#,
        )
        .unwrap();
        assert_eq!(usage.five_hour.percent(), 42);
        assert_eq!(usage.seven_day.percent(), 7);
        assert_eq!(usage.seven_day.resets_at, None);
        assert!(usage.into_result().is_ok());
    }

    #[test]
    fn test_in_band_error_becomes_api_error() {
        let usage: UsageResponse =
            serde_json::from_str(r#"{"error": {"message": "token expired"}}"#).unwrap();
        match usage.into_result() {
            Err(UsageError::Api(msg)) => assert_eq!(msg, "token expired"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_sends_auth_headers() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"five_hour":{"utilization":12.5},"seven_day":{"utilization":80.1}}"#,
        );

        let usage = UsageClient::new(url, Duration::from_secs(5))
            .fetch("tok-abc")
            .unwrap();
        let request = server.join().unwrap().to_ascii_lowercase();

        assert_eq!(usage.five_hour.percent(), 12);
        assert_eq!(usage.seven_day.percent(), 80);
        assert!(request.starts_with("get /api/oauth/usage"), "{request}");
        assert!(request.contains("authorization: bearer tok-abc"), "{request}");
        assert!(request.contains("anthropic-beta: oauth-2025-04-20"), "{request}");
    }

    #[test]
    fn test_fetch_maps_status_codes() {
        let (url, server) = serve_once("401 Unauthorized", r#"{"error":{"message":"bad"}}"#);
        let err = UsageClient::new(url, Duration::from_secs(5))
            .fetch("tok")
            .unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, UsageError::Status(401)), "{err:?}");
    }

    #[test]
    fn test_fetch_rejects_non_json() {
        let (url, server) = serve_once("200 OK", "<html>oops</html>");
        let err = UsageClient::new(url, Duration::from_secs(5))
            .fetch("tok")
            .unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, UsageError::Decode(_)), "{err:?}");
    }

    #[test]
    fn test_fetch_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/usage", listener.local_addr().unwrap());
        drop(listener);

        let err = UsageClient::new(url, Duration::from_secs(2))
            .fetch("tok")
            .unwrap_err();
        assert!(
            matches!(err, UsageError::Network(_) | UsageError::Timeout(_)),
            "{err:?}"
        );
    }
}
