//! Common test utilities for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Loopback HTTP server that answers every request with the same response
pub struct CannedServer {
    pub base_url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Request lines received so far, e.g. `GET /v1/users/1?access_token=t HTTP/1.1`
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

/// Starts a server that replies with `status` and `body`
pub async fn serve(status: u16, body: &'static str) -> CannedServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let request_lines = Arc::new(Mutex::new(Vec::new()));

    let recorded = request_lines.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let recorded = recorded.clone();
            tokio::spawn(async move {
                respond(stream, status, body, recorded).await;
            });
        }
    });

    CannedServer {
        base_url: format!("http://{addr}/v1"),
        request_lines,
    }
}

/// Starts a server that accepts connections but never answers
pub async fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{addr}/v1")
}

/// Returns a base URL on a port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

async fn respond(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    recorded: Arc<Mutex<Vec<String>>>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head);
    if let Some(line) = head.lines().next() {
        recorded.lock().unwrap().push(line.to_string());
    }

    let response = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
