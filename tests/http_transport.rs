//! End-to-end tests driving the real `UreqTransport` against a local
//! mock HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rstest::{fixture, rstest};

use tglogger::{TgError, TgLogger, TransportError};

#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn read_headers(reader: &mut BufReader<TcpStream>) -> (Vec<(String, String)>, usize) {
    let mut headers = Vec::new();
    let mut content_length = 0usize;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim().to_string();
        if key == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.push((key, value));
    }

    (headers, content_length)
}

fn read_http_request(stream: &mut TcpStream) -> CapturedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let parts: Vec<&str> = request_line.trim().split(' ').collect();
    let method = parts.first().unwrap_or(&"").to_string();
    let path = parts.get(1).unwrap_or(&"").to_string();

    let (headers, content_length) = read_headers(&mut reader);
    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).expect("read body");
    }

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

/// Serve one request, answering with `status` and `response_body`.
fn spawn_mock_server(
    listener: TcpListener,
    status: u16,
    response_body: &'static str,
) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let captured = read_http_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            status,
            status_text(status),
            response_body.len(),
            response_body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = tx.send(captured);
    });

    (addr, rx)
}

#[fixture]
fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

fn build_logger(addr: SocketAddr) -> TgLogger {
    let mut logger = TgLogger::new("TESTTOKEN", 42);
    logger
        .set_base_url(format!("http://{addr}"))
        .set_timeout(Duration::from_secs(5));
    logger
}

#[rstest]
fn posts_multipart_to_the_bot_method_path(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_mock_server(tcp_listener, 200, r#"{"ok":true}"#);
    let mut logger = build_logger(addr);

    let rendered = logger.info("wired up", &[]).expect("delivery");

    let captured = rx.recv_timeout(Duration::from_secs(5)).expect("request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/botTESTTOKEN/sendMessage");

    let content_type = captured.header("content-type").expect("content-type");
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("multipart content type");

    let length: usize = captured
        .header("content-length")
        .expect("content-length")
        .parse()
        .expect("numeric length");
    assert_eq!(length, captured.body.len());

    let body = String::from_utf8(captured.body.clone()).expect("utf-8 body");
    assert!(body.starts_with(&format!("--{boundary}\r\n")));
    assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    assert!(body.contains("Content-Disposition: form-data; name=\"text\""));
    assert!(body.contains(&rendered));
    assert!(body.contains("name=\"parse_mode\"\r\n\r\nMarkdown\r\n"));
    assert!(body.contains("name=\"disable_web_page_preview\"\r\n\r\ntrue\r\n"));
    assert!(body.contains("name=\"chat_id\"\r\n\r\n42\r\n"));
}

#[rstest]
fn non_2xx_status_maps_to_transport_error(tcp_listener: TcpListener) {
    let (addr, _rx) = spawn_mock_server(tcp_listener, 500, "gateway exploded");
    let mut logger = build_logger(addr);

    match logger.info("hello", &[]) {
        Err(TgError::Transport(TransportError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "gateway exploded");
        }
        other => panic!("expected transport status error, got {other:?}"),
    }
}

#[rstest]
fn api_rejection_over_real_http(tcp_listener: TcpListener) {
    let (addr, _rx) = spawn_mock_server(
        tcp_listener,
        200,
        r#"{"ok":false,"error_code":429,"description":"Too Many Requests"}"#,
    );
    let mut logger = build_logger(addr);

    match logger.info("hello", &[]) {
        Err(TgError::Api { description, code }) => {
            assert_eq!(description, "Too Many Requests");
            assert_eq!(code, Some(429));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[rstest]
fn unanswered_request_fails_within_the_timeout(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    thread::spawn(move || {
        let Ok((mut stream, _)) = tcp_listener.accept() else {
            return;
        };
        let _ = read_http_request(&mut stream);
        // Hold the connection open without ever replying.
        thread::sleep(Duration::from_secs(3));
    });

    let mut logger = build_logger(addr);
    logger.set_timeout(Duration::from_millis(100));

    assert!(matches!(
        logger.info("hello", &[]),
        Err(TgError::Transport(_))
    ));
}
