use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::WeatherError;

/// A single GET against a JSON endpoint, returning the raw response body.
///
/// Implementations must map every HTTP-level failure (connect error, timeout,
/// non-2xx status) to [`WeatherError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, WeatherError>;
}

/// [`Transport`] backed by a `reqwest` client with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, WeatherError> {
        debug!(url, ?query, "sending request");

        let res = self.http.get(url).query(query).send().await.map_err(|e| {
            warn!(url, error = %e, "request failed");
            WeatherError::from(e)
        })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(url, %status, "non-success status");
            return Err(WeatherError::transport(format!(
                "HTTP error from API: {status}: {}",
                truncate_body(&body)
            )));
        }

        debug!(url, %status, bytes = body.len(), "response received");
        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

/// In-memory [`Transport`] for tests, also available to dependent crates
/// through the `testing` feature.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Recorded request: endpoint plus query pairs.
    #[derive(Debug, Clone)]
    pub struct Call {
        pub url: String,
        pub query: Vec<(String, String)>,
    }

    impl Call {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
        }
    }

    /// Replays canned responses in order and records every call.
    #[derive(Debug, Clone, Default)]
    pub struct FakeTransport {
        responses: Arc<Mutex<VecDeque<Result<String, WeatherError>>>>,
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, body: impl Into<String>) -> Self {
            self.responses.lock().unwrap().push_back(Ok(body.into()));
            self
        }

        pub fn fail(self, err: WeatherError) -> Self {
            self.responses.lock().unwrap().push_back(Err(err));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, WeatherError> {
            self.calls.lock().unwrap().push(Call {
                url: url.to_string(),
                query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            });

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(WeatherError::transport("no canned response left")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::{TcpListener, TcpStream},
        thread,
    };

    use super::*;

    /// Serves one connection on a local port with `handle`, returning the base URL.
    fn serve_once(handle: impl FnOnce(TcpStream) + Send + 'static) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                handle(stream);
            }
        });
        format!("http://{addr}/v1/forecast")
    }

    fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
    }

    #[tokio::test]
    async fn server_error_status_is_transport() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            let _ = stream.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  Content-Length: 4\r\nConnection: close\r\n\r\noops",
            );
        });
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();

        let err = transport.get(&url, &[("latitude", "1".into())]).await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport { .. }), "{err:?}");
        let msg = err.to_string();
        assert!(msg.contains("500"), "{msg}");
        assert!(msg.contains("oops"), "{msg}");
    }

    #[tokio::test]
    async fn success_returns_body() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                  Content-Length: 2\r\nConnection: close\r\n\r\n{}",
            );
        });
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();

        let body = transport.get(&url, &[]).await.expect("200 response");
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            thread::sleep(Duration::from_secs(3));
        });
        let transport = HttpTransport::new(Duration::from_millis(300)).unwrap();

        let err = transport.get(&url, &[]).await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport { .. }), "{err:?}");
        assert!(err.to_string().contains("timed out"), "{err}");
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
            listener.local_addr().expect("local addr").port()
        };
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();

        let err = transport
            .get(&format!("http://127.0.0.1:{port}/v1/search"), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Transport { .. }), "{err:?}");
        assert!(err.to_string().contains("internet connection"), "{err}");
    }

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(HttpTransport::new(Duration::from_secs(3)).is_ok());
    }
}
