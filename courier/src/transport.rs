use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

use crate::request::RequestDescriptor;

/// 传输层返回的原始响应，读取完毕后立即交给解码
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub url: Url,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, url: Url, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            url,
            body: body.into(),
        }
    }
}

/// 传输层抽象
///
/// 只有网络调用本身失败时才返回错误；任何状态码都算一次完成的传输。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, descriptor: &RequestDescriptor) -> crate::error::Result<RawResponse>;
}
