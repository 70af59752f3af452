//! 内存中的 Transport 实现
//!
//! 按 URL 返回预置的状态码和响应体，并记录收到的每个请求描述符，
//! 用于在没有网络的情况下测试请求与执行函数。

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use reqwest::StatusCode;

use crate::error::Result;
use crate::request::RequestDescriptor;
use crate::transport::{RawResponse, Transport};

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, (StatusCode, Bytes)>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为 URL 预置响应。key 可以是带查询参数的完整 URL，也可以只是不带查询的 URL
    pub fn respond(&self, url: &str, status: StatusCode, body: impl Into<Bytes>) -> &Self {
        lock(&self.routes).insert(url.to_string(), (status, body.into()));
        self
    }

    pub fn respond_json(&self, url: &str, body: &str) -> &Self {
        self.respond(url, StatusCode::OK, Bytes::copy_from_slice(body.as_bytes()))
    }

    /// 已收到的请求，按到达顺序
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        lock(&self.requests).clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        lock(&self.requests).push(descriptor.clone());

        let full = descriptor.full_url();
        let routes = lock(&self.routes);
        let hit = routes
            .get(full.as_str())
            .or_else(|| routes.get(descriptor.url().as_str()));

        let (status, body) = match hit {
            Some((status, body)) => (*status, body.clone()),
            None => (StatusCode::NOT_FOUND, Bytes::from_static(b"no mock route")),
        };
        Ok(RawResponse { status, url: full, body })
    }
}

// 测试桩里不关心锁中毒
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn matches_full_url_then_bare_url() {
        let mock = MockTransport::new();
        mock.respond("https://x/a?k=v", StatusCode::OK, "exact")
            .respond("https://x/b", StatusCode::ACCEPTED, "bare");

        let exact = RequestDescriptor::get(Url::parse("https://x/a").unwrap()).query("k", "v");
        let bare = RequestDescriptor::get(Url::parse("https://x/b").unwrap()).query("k", "v");
        let missing = RequestDescriptor::get(Url::parse("https://x/c").unwrap());

        let r = mock.send(&exact).await.unwrap();
        assert_eq!((r.status, &r.body[..]), (StatusCode::OK, &b"exact"[..]));

        let r = mock.send(&bare).await.unwrap();
        assert_eq!(r.status, StatusCode::ACCEPTED);
        assert_eq!(r.url.as_str(), "https://x/b?k=v");

        let r = mock.send(&missing).await.unwrap();
        assert_eq!(r.status, StatusCode::NOT_FOUND);

        assert_eq!(mock.requests(), vec![exact, bare, missing]);
    }
}
