use derive_builder::Builder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::request::{ApiRequest, RequestDescriptor};
use crate::transport::{RawResponse, Transport};

const DEFAULT_TIMEOUT_SECS: u64 = 6; // 默认请求超时，单位秒
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 6; // 默认连接超时，单位秒
const DEFAULT_READ_TIMEOUT_SECS: u64 = 6; // 默认读取超时，单位秒
// 默认 User-Agent 头 courier-client/<version>
const DEFAULT_USER_AGENT: &str = concat!("courier-client/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Builder)]
pub struct HttpClientOption {
    #[builder(default = "Duration::from_secs(DEFAULT_TIMEOUT_SECS)")]
    pub timeout: Duration,              // 请求整体超时
    #[builder(default = "default_headers()")]
    pub headers: Vec<(String, String)>, // 额外基础请求头
    #[builder(default = "Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS)")]
    pub read_timeout: Duration,         // 读取超时
    #[builder(default = "Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)")]
    pub connect_timeout: Duration,      // 连接超时
}

impl HttpClientOption {
    pub fn builder() -> HttpClientOptionBuilder {
        HttpClientOptionBuilder::default()
    }
}

impl From<HttpClientOptionBuilderError> for Error {
    fn from(e: HttpClientOptionBuilderError) -> Self {
        Error::InvalidArgument(format!("Build HttpClientOption failed: {}", e))
    }
}

impl Default for HttpClientOption {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: default_headers(),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
    ]
}

/// 兼容非 ASCII 的值（如中文）：优先 from_str，失败则回退到原始字节
fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes())?;
    let value = HeaderValue::from_str(value)
        .or_else(|_| HeaderValue::from_bytes(value.as_bytes()))?;
    Ok((name, value))
}

fn build_client(
    headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client> {
    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()?;

    Ok(client)
}

/// HTTP 客户端封装，基于 reqwest 实现
pub struct HttpClient {
    inner: Client,
    option: Option<HttpClientOption>, // from_reqwest 包装的客户端没有对应配置
}

impl HttpClient {
    /// 创建一个新的 HttpClient 实例
    pub fn new(option: HttpClientOption) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (header, value) in &option.headers {
            let (name, value) = header_pair(header, value)?;
            headers.insert(name, value);
        }

        let inner = build_client(
            headers,
            option.timeout,
            option.connect_timeout,
            option.read_timeout,
        )?;

        Ok(Self {
            inner,
            option: Some(option),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(HttpClientOption::default())
    }

    /// 包装外部构造的 reqwest 客户端，超时与默认头以该客户端自身为准
    pub fn from_reqwest(inner: Client) -> Self {
        Self { inner, option: None }
    }

    pub fn client(&self) -> &Client {
        &self.inner
    }

    /// 构造时使用的配置；`from_reqwest` 得到的实例返回 `None`
    pub fn options(&self) -> Option<&HttpClientOption> {
        self.option.as_ref()
    }

    /// 执行一个请求并返回解码后的结果
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        crate::execute::execute_with(self, request).await
    }
}

impl Transport for HttpClient {
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(descriptor.method().clone(), descriptor.url().clone());

        if !descriptor.query_pairs().is_empty() {
            req = req.query(descriptor.query_pairs());
        }

        // 请求级 headers 覆盖客户端默认值
        let mut headers = HeaderMap::new();
        for (name, value) in descriptor.headers() {
            let (name, value) = header_pair(name, value)?;
            headers.insert(name, value);
        }
        if !headers.is_empty() {
            req = req.headers(headers);
        }

        if let Some(timeout) = descriptor.request_timeout() {
            req = req.timeout(timeout);
        }

        // reqwest 的错误会带上完整 URL，换成不含查询串的版本
        let redact = |e: reqwest::Error| e.with_url(descriptor.url().clone());

        let resp = req.send().await.map_err(redact)?;
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.bytes().await.map_err(redact)?;

        Ok(RawResponse { status, url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_option_matches_builder_defaults() {
        let built = HttpClientOption::builder().build().unwrap();
        let default = HttpClientOption::default();

        assert_eq!(built.timeout, default.timeout);
        assert_eq!(built.connect_timeout, default.connect_timeout);
        assert_eq!(built.read_timeout, default.read_timeout);
        assert_eq!(built.headers, default.headers);
        assert_eq!(default.headers[0].0, "User-Agent");
        assert!(default.headers[0].1.starts_with("courier-client/"));
    }

    #[test]
    fn builder_overrides() {
        let option = HttpClientOption::builder()
            .timeout(Duration::from_millis(1500))
            .headers(vec![("x-trace-id".to_string(), "abc".to_string())])
            .build()
            .unwrap();

        assert_eq!(option.timeout, Duration::from_millis(1500));
        assert_eq!(option.headers.len(), 1);
        assert_eq!(option.read_timeout, Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS));
    }

    #[test]
    fn options_reflect_how_the_client_was_built() {
        let option = HttpClientOption::builder()
            .timeout(Duration::from_millis(2500))
            .build()
            .unwrap();
        let built = HttpClient::new(option).unwrap();
        assert_eq!(built.options().map(|o| o.timeout), Some(Duration::from_millis(2500)));

        let wrapped = HttpClient::from_reqwest(Client::new());
        assert!(wrapped.options().is_none());
    }

    #[test]
    fn builder_error_converts_to_config_error() {
        let err: Error = HttpClientOptionBuilderError::ValidationError("bad".into()).into();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn invalid_header_fails_at_construction() {
        let option = HttpClientOption::builder()
            .headers(vec![("bad header".to_string(), "v".to_string())])
            .build()
            .unwrap();

        let err = HttpClient::new(option).err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn non_ascii_header_value_is_accepted() {
        let option = HttpClientOption::builder()
            .headers(vec![("x-name".to_string(), "中文".to_string())])
            .build()
            .unwrap();

        assert!(HttpClient::new(option).is_ok());
    }
}
