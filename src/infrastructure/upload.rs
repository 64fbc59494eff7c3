//! HTTP client for the remote deblurring endpoint.
//!
//! One request shape: `POST <base>/upload` with the image as the single
//! `file` field of a multipart body. A 2xx answer carries the result
//! locator as plain text; any other status is reported with a fixed
//! message, and transport failures surface their own text. Uploads run
//! on a worker thread and report back over a channel so the event loop
//! never blocks on the network.

use crate::domain::{SelectedFile, UploadError};
use reqwest::blocking::{multipart, Client};
use std::sync::mpsc::Sender;
use std::thread;

/// A finished upload, tagged with the request token it belongs to.
#[derive(Debug)]
pub struct UploadOutcome {
    pub token: u64,
    pub result: Result<String, UploadError>,
}

#[derive(Debug, Clone)]
pub struct UploadClient {
    base: String,
    client: Client,
}

impl UploadClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Sends the file to the processing endpoint and returns the result
    /// locator exactly as the response body text.
    pub fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let part = multipart::Part::bytes(bytes).file_name(name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base))
            .multipart(form)
            .send()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError::ProcessingFailed);
        }

        response
            .text()
            .map_err(|e| UploadError::Transport(e.to_string()))
    }

    /// Runs the upload on a worker thread; the completion arrives on
    /// `tx` tagged with `token`.
    pub fn spawn_upload(&self, file: SelectedFile, token: u64, tx: Sender<UploadOutcome>) {
        let client = self.clone();
        thread::spawn(move || {
            let result = client.upload(&file.name, file.bytes);
            // The receiver may be gone if the app is shutting down
            let _ = tx.send(UploadOutcome { token, result });
        });
    }

    /// Resolves a result locator against the server base. The endpoint
    /// usually answers with a server-relative path.
    pub fn resolve(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else if locator.starts_with('/') {
            format!("{}{}", self.base, locator)
        } else {
            format!("{}/{}", self.base, locator)
        }
    }

    /// Fetches the produced image and writes it under `filename` in the
    /// working directory.
    pub fn save_result(&self, locator: &str, filename: &str) -> Result<String, String> {
        let response = self
            .client
            .get(self.resolve(locator))
            .send()
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!(
                "Download failed: HTTP {}",
                response.status().as_u16()
            ));
        }

        let bytes = response.bytes().map_err(|e| e.to_string())?;
        match std::fs::write(filename, &bytes) {
            Ok(_) => Ok(filename.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// One-shot HTTP stub on a loopback port. Drains the full request
    /// (so the client can finish writing the multipart body) before
    /// answering with the canned status and body.
    fn stub_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match stream.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request_complete(&request) {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                let response = format!(
                    "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn request_complete(request: &[u8]) -> bool {
        let Some(header_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&request[..header_end]);
        let content_length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_upload_success_returns_body_verbatim() {
        let base = stub_server("HTTP/1.1 200 OK", "/out/123.png");
        let client = UploadClient::new(&base);

        let result = client.upload("cat.png", vec![1, 2, 3]).unwrap();
        assert_eq!(result, "/out/123.png");
    }

    #[test]
    fn test_upload_non_success_status_is_processing_failure() {
        let base = stub_server("HTTP/1.1 500 Internal Server Error", "boom");
        let client = UploadClient::new(&base);

        let err = client.upload("cat.png", vec![1]).unwrap_err();
        assert_eq!(err, UploadError::ProcessingFailed);
        assert_eq!(err.to_string(), "Image processing failed.");
    }

    #[test]
    fn test_upload_transport_failure_carries_its_own_message() {
        // Grab a free port and release it so nothing is listening
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = UploadClient::new(&format!("http://127.0.0.1:{}", port));

        match client.upload("cat.png", vec![1]) {
            Err(UploadError::Transport(message)) => assert!(!message.is_empty()),
            other => panic!("expected a transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_spawn_upload_reports_over_channel() {
        let base = stub_server("HTTP/1.1 200 OK", "/out/7.png");
        let client = UploadClient::new(&base);
        let (tx, rx) = mpsc::channel();

        let file = SelectedFile {
            name: "cat.png".to_string(),
            bytes: vec![1, 2, 3],
            preview: crate::domain::PreviewRef {
                id: 1,
                locator: "preview://1/cat.png".to_string(),
            },
        };
        client.spawn_upload(file, 42, tx);

        let outcome = rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .unwrap();
        assert_eq!(outcome.token, 42);
        assert_eq!(outcome.result.unwrap(), "/out/7.png");
    }

    #[test]
    fn test_resolve_locators() {
        let client = UploadClient::new("http://localhost:5000/");
        assert_eq!(
            client.resolve("/out/1.png"),
            "http://localhost:5000/out/1.png"
        );
        assert_eq!(
            client.resolve("out/1.png"),
            "http://localhost:5000/out/1.png"
        );
        assert_eq!(
            client.resolve("http://cdn.example/out.png"),
            "http://cdn.example/out.png"
        );
    }

    #[test]
    fn test_save_result_writes_file() {
        let base = stub_server("HTTP/1.1 200 OK", "PNGDATA");
        let client = UploadClient::new(&base);

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("enhanced_image.png");
        let target = target.to_str().unwrap();

        let written = client.save_result("/out/123.png", target).unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(target).unwrap(), b"PNGDATA");
    }
}
