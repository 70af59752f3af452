//! courier 的测试夹具：本地 HTTP 服务、示例响应类型

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use courier::url::Url;
use serde::Deserialize;
use tiny_http::{Header, Response, Server};

mod macros;

pub use macros::*;

#[derive(Debug, Deserialize, PartialEq)]
pub struct HttpBinGet {
    pub url: String,
    pub args: serde_json::Value,
}

/// 服务端看到的请求
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    /// 路径加查询串，如 `/get?q=rust`
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 处理函数返回的响应
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<&'static str>,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into().into_bytes(),
            content_type: Some("application/json"),
        }
    }

    pub fn bytes(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body,
            content_type: None,
        }
    }
}

/// 基于 tiny_http 的本地服务，逐个处理请求直到被 drop
pub struct TestServer {
    server: Arc<Server>,
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind test server"));
        let addr = server.server_addr().to_ip().expect("test server has an ip address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker_server = Arc::clone(&server);
        let worker_requests = Arc::clone(&requests);
        let handle = std::thread::spawn(move || {
            for request in worker_server.incoming_requests() {
                let recorded = RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.to_string(), h.value.to_string()))
                        .collect(),
                };
                worker_requests.lock().expect("requests lock").push(recorded.clone());

                let reply = handler(&recorded);
                let mut response = Response::from_data(reply.body).with_status_code(reply.status);
                if let Some(ct) = reply.content_type {
                    if let Ok(header) = Header::from_bytes("Content-Type", ct) {
                        response = response.with_header(header);
                    }
                }
                let _ = request.respond(response);
            }
        });

        Self {
            server,
            addr,
            requests,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).expect("valid test url")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// 编码一张纯色 PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// 一个已经关闭的本地端口，连接会被拒绝
pub fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("valid url")
}
