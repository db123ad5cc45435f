//! Canned-response HTTP server for lookup tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use tiny_http::{Header, Response, Server};

#[derive(Clone)]
pub struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: r#"{"message":"stub"}"#.to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Serves each request URL (path plus query string) from a fixed table.
/// Unknown URLs get a 404.
pub struct StubServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&str, Reply)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let url = format!("http://{}", server.server_addr().to_ip().unwrap());
        let routes: HashMap<String, Reply> = routes
            .into_iter()
            .map(|(path, reply)| (path.to_string(), reply))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let mut head = format!("{} {}", request.method(), request.url());
                for header in request.headers() {
                    head.push('\n');
                    head.push_str(&header.to_string());
                }
                log.lock().unwrap().push(head);

                let reply = routes
                    .get(request.url())
                    .cloned()
                    .unwrap_or_else(|| Reply::status(404));
                let mut response = Response::from_data(reply.body.into_bytes())
                    .with_status_code(reply.status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                    );
                for (name, value) in &reply.headers {
                    response = response
                        .with_header(Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap());
                }
                if let Err(err) = request.respond(response) {
                    eprintln!("stub server: failed to respond: {err}");
                }
            }
        });

        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request line and headers of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
