use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::HttpClient;
use crate::error::{body_snippet, Error, Result};
use crate::request::ApiRequest;
use crate::transport::Transport;

/// 通用执行函数：构造描述符、发送、校验状态码、交给请求自身解码
///
/// 只有状态码恰好为 200 时才会调用 `decode`；其余状态一律返回 [`Error::RequestFailed`]。
/// 解码错误不做任何包装之外的转换。
pub async fn execute_with<T, R>(transport: &T, request: &R) -> Result<R::Response>
where
    T: Transport,
    R: ApiRequest,
{
    let descriptor = request.descriptor();
    tracing::debug!(method = %descriptor.method(), url = %descriptor.url(), "sending request");

    let raw = transport.send(&descriptor).await?;

    // 查询串里可能带着凭据，日志和错误里只留到 path
    let url = without_query(&raw.url);

    if raw.status != StatusCode::OK {
        tracing::warn!(status = %raw.status, %url, "request failed");
        return Err(Error::RequestFailed {
            url: url.to_string(),
            status: raw.status,
            body_snippet: body_snippet(&raw.body),
        });
    }

    tracing::debug!(%url, bytes = raw.body.len(), "decoding response");
    let decoded = request.decode(&raw.body)?;
    Ok(decoded)
}

/// 使用一次性的默认客户端执行请求
pub async fn execute<R: ApiRequest>(request: R) -> Result<R::Response> {
    let client = HttpClient::new_default()?;
    execute_with(&client, &request).await
}

/// 可取消的执行
///
/// token 被取消时丢弃进行中的传输 future，返回 [`Error::Cancelled`]，不会产生部分结果。
pub async fn execute_cancellable<T, R>(
    transport: &T,
    request: &R,
    cancel: &CancellationToken,
) -> Result<R::Response>
where
    T: Transport,
    R: ApiRequest,
{
    if cancel.is_cancelled() {
        return Err(cancelled(request));
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("request cancelled");
            Err(cancelled(request))
        }
        result = execute_with(transport, request) => result,
    }
}

fn without_query(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn cancelled<R: ApiRequest>(request: &R) -> Error {
    Error::Cancelled {
        url: request.descriptor().url().to_string(),
    }
}
