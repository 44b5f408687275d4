//! Minimal HTTP/1.1 server serving canned responses for integration tests.
//!
//! Each route is matched on the request path (query stripped): `/` matches
//! exactly, any other pattern matches as a prefix. Every request is recorded
//! so tests can assert on the exact target and headers curl sent.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Canned {
    /// Status line after the protocol, e.g. "200 OK".
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub set_cookie: Option<&'static str>,
    /// Sleep before answering (simulates a hung upstream).
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn json(body: &str) -> Self {
        Self {
            status: "200 OK",
            content_type: Some("application/json; charset=utf-8"),
            body: body.as_bytes().to_vec(),
            set_cookie: None,
            delay: None,
        }
    }

    pub fn status(status: &'static str, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            body: body.as_bytes().to_vec(),
            set_cookie: None,
            delay: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct ResultServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ResultServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Vec<(&'static str, Canned)>) -> ResultServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &routes, &recorded));
        }
    });
    ResultServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

/// A base URL nothing listens on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(
    mut stream: TcpStream,
    routes: &[(&'static str, Canned)],
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let Ok(text) = std::str::from_utf8(&raw) else {
        return;
    };
    let request = parse_request(text);
    let path = request.target.split('?').next().unwrap_or("").to_string();
    recorded.lock().unwrap().push(request);

    let Some((_, canned)) = routes
        .iter()
        .find(|(pattern, _)| path == *pattern || (*pattern != "/" && path.starts_with(pattern)))
    else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    };

    if let Some(delay) = canned.delay {
        thread::sleep(delay);
    }
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        canned.status,
        canned.body.len()
    );
    if let Some(ct) = canned.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(cookie) = canned.set_cookie {
        head.push_str(&format!("Set-Cookie: {}\r\n", cookie));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&canned.body);
}

fn parse_request(text: &str) -> RecordedRequest {
    let mut lines = text.split("\r\n");
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let target = first.next().unwrap_or("").to_string();
    let headers = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();
    RecordedRequest {
        method,
        target,
        headers,
    }
}
