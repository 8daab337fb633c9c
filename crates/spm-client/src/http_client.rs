//! reqwest implementation of [`CompileService`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::client::CompileService;
use crate::error::ServiceError;
use crate::types::VariableSelection;

const COMPILE_PATH: &str = "/compile/";
const OPTIONS_PATH: &str = "/compile/options";

/// Compile service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpCompileService {
    client: Client,
    base_url: String,
}

impl HttpCompileService {
    /// Create a client for the service at `base_url`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Validate `base_url` as an absolute http(s) URL and strip trailing slashes
fn normalize_base_url(base_url: &str) -> Result<String, ServiceError> {
    let trimmed = base_url.trim();
    let invalid = || ServiceError::InvalidUrl(base_url.to_string());

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Turn a non-success response into [`ServiceError::Status`]
async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or_default().to_string();
    let body = response.text().await.unwrap_or_default();
    log::warn!("Compile service answered {} {}", status.as_u16(), reason);
    Err(ServiceError::Status {
        status: status.as_u16(),
        reason,
        body,
    })
}

#[async_trait]
impl CompileService for HttpCompileService {
    async fn compile(&self, selection: &VariableSelection) -> Result<String, ServiceError> {
        let url = self.endpoint(COMPILE_PATH);
        log::info!(
            "POST {} ({} inputs, {} outputs)",
            url,
            selection.inputs.len(),
            selection.outputs.len()
        );

        let response = self.client.post(&url).json(selection).send().await?;
        let source = ensure_success(response).await?.text().await?;

        log::debug!("Received {} bytes of model source", source.len());
        Ok(source)
    }

    async fn options(&self) -> Result<VariableSelection, ServiceError> {
        let url = self.endpoint(OPTIONS_PATH);
        log::info!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let options: VariableSelection = ensure_success(response).await?.json().await?;

        log::debug!(
            "Service offers {} inputs and {} outputs",
            options.inputs.len(),
            options.outputs.len()
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Read one HTTP/1.1 request: headers plus a `Content-Length` body
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8(raw).unwrap()
    }

    /// Answer a single request on a local port with `response`.
    ///
    /// Returns the base URL and a handle yielding the raw request.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (base_url, handle)
    }

    fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        )
    }

    fn selection() -> VariableSelection {
        VariableSelection::new(
            vec!["Current function [A]".to_string()],
            vec!["Voltage [V]".to_string()],
        )
    }

    fn request_body(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_compile_posts_selection_and_returns_source() {
        let source = "in = [a]\na { 1 }\n";
        let (base_url, server) =
            serve_once(http_response("200 OK", "text/plain", source)).await;
        let service = HttpCompileService::new(&base_url, Duration::from_secs(5)).unwrap();

        let answer = service.compile(&selection()).await.unwrap();
        assert_eq!(answer, source);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /compile/ HTTP/1.1\r\n"), "{}", request);
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert_eq!(
            request_body(&request),
            serde_json::json!({
                "inputs": ["Current function [A]"],
                "outputs": ["Voltage [V]"],
            })
        );
    }

    #[tokio::test]
    async fn test_compile_error_status_keeps_reason_and_body() {
        let (base_url, server) = serve_once(http_response(
            "500 Internal Server Error",
            "text/plain",
            "unknown variable 'Voltage [V]'",
        ))
        .await;
        let service = HttpCompileService::new(&base_url, Duration::from_secs(5)).unwrap();

        let err = service.compile(&selection()).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.status(), Some(500));
        match err {
            ServiceError::Status {
                status,
                reason,
                body,
            } => {
                assert_eq!(status, 500);
                assert_eq!(reason, "Internal Server Error");
                assert_eq!(body, "unknown variable 'Voltage [V]'");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_options_fetches_variable_names() {
        let body = r#"{"inputs": ["Current function [A]"], "outputs": ["Voltage [V]", "Time [s]"]}"#;
        let (base_url, server) =
            serve_once(http_response("200 OK", "application/json", body)).await;
        let service = HttpCompileService::new(&base_url, Duration::from_secs(5)).unwrap();

        let options = service.options().await.unwrap();
        assert_eq!(options.inputs, vec!["Current function [A]"]);
        assert_eq!(options.outputs, vec!["Voltage [V]", "Time [s]"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /compile/options HTTP/1.1\r\n"), "{}", request);
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://example.com//").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_base_url(" http://localhost:8000 ").unwrap(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        // parses as scheme "localhost"
        for url in ["localhost:8000", "ftp://example.com", "file:///tmp/model"] {
            let err = normalize_base_url(url).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidUrl(_)), "{}", url);
        }
    }

    #[test]
    fn test_normalize_rejects_unparseable_urls() {
        for url in ["", "not a url", "http://"] {
            assert!(normalize_base_url(url).is_err(), "{:?}", url);
        }
    }

    #[test]
    fn test_normalize_scheme_is_case_insensitive() {
        assert_eq!(
            normalize_base_url("HTTPS://Example.com/api/").unwrap(),
            "HTTPS://Example.com/api"
        );
    }

    #[test]
    fn test_endpoints() {
        let service =
            HttpCompileService::new("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(service.base_url(), "https://example.com");
        assert_eq!(service.endpoint(COMPILE_PATH), "https://example.com/compile/");
        assert_eq!(
            service.endpoint(OPTIONS_PATH),
            "https://example.com/compile/options"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let service =
            HttpCompileService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = service.options().await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
