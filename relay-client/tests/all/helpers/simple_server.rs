use std::fmt;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::anyhow;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Raw TCP server answering each connection with the next scripted response,
/// then closing it. Lets tests produce malformed or truncated HTTP answers.
pub struct SimpleServer {
    listener: TcpListener,
    port: u16,
    host: String,
    raw_http_responses: Vec<String>,
    connections: Arc<AtomicUsize>,
}

/// Request-Line = Method SP Request-URI SP HTTP-Version CRLF
struct Request<'a> {
    method: &'a str,
    uri: &'a str,
    http_version: &'a str,
}

impl<'a> fmt::Display for Request<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.http_version)
    }
}

impl SimpleServer {
    pub async fn new(
        host: &str,
        port: Option<u16>,
        raw_http_responses: Vec<String>,
    ) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!("{}:{}", host, port.unwrap_or(0))).await?;

        let port = listener.local_addr()?.port();

        Ok(Self {
            listener,
            port,
            host: host.to_string(),
            raw_http_responses,
            connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Number of connections accepted so far.
    pub fn connections(&self) -> Arc<AtomicUsize> {
        self.connections.clone()
    }

    pub async fn start(self) {
        let mut responses = self.raw_http_responses.into_iter();
        loop {
            let stream = match self.listener.accept().await {
                Ok((stream, _)) => stream,
                Err(e) => {
                    println!("Connection failed: {}", e);
                    continue;
                }
            };
            self.connections.fetch_add(1, Ordering::SeqCst);

            let Some(raw_http_response) = responses.next() else {
                println!("No scripted response left, closing connection");
                continue;
            };
            if let Err(e) = Self::handle_connection(stream, raw_http_response).await {
                println!("Error handling connection: {}", e);
            }
        }
    }

    async fn handle_connection(
        mut stream: TcpStream,
        raw_http_response: String,
    ) -> Result<(), anyhow::Error> {
        // 1024 bytes is enough for a toy HTTP server
        let mut buffer = [0; 1024];

        let n = stream.read(&mut buffer).await?;

        let request = String::from_utf8_lossy(&buffer[..n]);
        let request_line = request.lines().next().unwrap_or_default();

        let request = Self::parse_request_line(request_line)?;
        println!("Request: {}", request);

        stream.write_all(raw_http_response.as_bytes()).await?;
        stream.flush().await?;

        Ok(())
    }

    fn parse_request_line(request: &str) -> Result<Request<'_>, anyhow::Error> {
        let mut parts = request.split_whitespace();

        let method = parts.next().ok_or_else(|| anyhow!("Method not specified"))?;

        let uri = parts.next().ok_or_else(|| anyhow!("URI not specified"))?;

        let http_version = parts
            .next()
            .ok_or_else(|| anyhow!("HTTP version not specified"))?;

        Ok(Request {
            method,
            uri,
            http_version,
        })
    }
}
