//! 请求契约：如何构造请求、如何解码响应

use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::error::DecodeError;

/// 完整描述一次 HTTP 调用的请求描述符
///
/// 构造完成后只读；查询参数与请求头按插入顺序保留。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn patch(url: Url) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn head(url: Url) -> Self {
        Self::new(Method::HEAD, url)
    }

    /// 追加一个查询参数
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// 追加一个请求头，同名时后者覆盖前者
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 单次请求超时，覆盖客户端级别的超时
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// 拼上查询参数后的完整 URL
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }
}

/// 可执行的请求契约
///
/// 实现者决定请求长什么样以及响应体如何变成 `Response`。
/// [`crate::execute_with`] 只依赖这两个能力，因此同一个执行函数可以服务任意多种请求。
///
/// ```ignore
/// struct ImageRequest { url: Url }
///
/// impl ApiRequest for ImageRequest {
///     type Response = image::DynamicImage;
///
///     fn descriptor(&self) -> RequestDescriptor {
///         RequestDescriptor::get(self.url.clone())
///     }
///
///     fn decode(&self, body: &[u8]) -> Result<Self::Response, DecodeError> {
///         ImageDecoder::decode(body)
///     }
/// }
/// ```
pub trait ApiRequest {
    type Response;

    /// 生成请求描述符。不允许失败：可能失败的输入应在构造实现者时就校验完毕
    fn descriptor(&self) -> RequestDescriptor;

    /// 将完整的响应体解码为 `Response`。纯函数，不做 I/O
    fn decode(&self, body: &[u8]) -> Result<Self::Response, DecodeError>;
}

impl<R: ApiRequest + ?Sized> ApiRequest for &R {
    type Response = R::Response;

    fn descriptor(&self) -> RequestDescriptor {
        (**self).descriptor()
    }

    fn decode(&self, body: &[u8]) -> Result<Self::Response, DecodeError> {
        (**self).decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_appends_query_in_order() {
        let url = Url::parse("https://api.example.com/items").unwrap();
        let desc = RequestDescriptor::get(url)
            .query("date", "2023-01-20")
            .query("api_key", "DEMO KEY");

        assert_eq!(
            desc.full_url().as_str(),
            "https://api.example.com/items?date=2023-01-20&api_key=DEMO+KEY"
        );
        assert_eq!(desc.url().as_str(), "https://api.example.com/items");
    }

    #[test]
    fn full_url_without_query_is_unchanged() {
        let url = Url::parse("https://x/y.jpg").unwrap();
        let desc = RequestDescriptor::get(url.clone());
        assert_eq!(desc.full_url(), url);
        assert_eq!(desc.method(), &Method::GET);
        assert!(desc.request_timeout().is_none());
    }

    #[test]
    fn full_url_keeps_existing_query() {
        let url = Url::parse("https://x/search?q=rust").unwrap();
        let desc = RequestDescriptor::get(url).query("page", "2");
        assert_eq!(desc.full_url().as_str(), "https://x/search?q=rust&page=2");
    }

    #[test]
    fn builder_records_headers_and_timeout() {
        let url = Url::parse("https://x/").unwrap();
        let desc = RequestDescriptor::new(Method::POST, url)
            .header("accept", "application/json")
            .timeout(Duration::from_millis(1500));

        assert_eq!(desc.method(), &Method::POST);
        assert_eq!(desc.headers(), &[("accept".to_string(), "application/json".to_string())]);
        assert_eq!(desc.request_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn verb_constructors_pick_the_method() {
        let url = Url::parse("https://x/").unwrap();
        let cases = [
            (RequestDescriptor::get(url.clone()), Method::GET),
            (RequestDescriptor::post(url.clone()), Method::POST),
            (RequestDescriptor::put(url.clone()), Method::PUT),
            (RequestDescriptor::delete(url.clone()), Method::DELETE),
            (RequestDescriptor::patch(url.clone()), Method::PATCH),
            (RequestDescriptor::head(url.clone()), Method::HEAD),
        ];
        for (desc, method) in cases {
            assert_eq!(desc.method(), &method);
            assert_eq!(desc.url(), &url);
        }
    }
}
