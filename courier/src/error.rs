use reqwest::StatusCode;
use thiserror::Error;

/// 错误消息中响应体片段的最大字符数
pub const BODY_SNIPPET_LIMIT: usize = 256;

/// 定义错误类型
#[derive(Debug, Error)]
pub enum Error {
    // 传输层/超时/DNS 等，直接透传 reqwest::Error 的错误
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // 请求在传输完成前被取消
    #[error("Request cancelled before completion for URL: {url}")]
    Cancelled { url: String },

    // 非 200 状态码 附带 URL、状态码和响应体片段
    #[error("Request failed: {status} for URL: {url}\nResponse body (truncated): {body_snippet}")]
    RequestFailed {
        url: String,
        status: StatusCode,
        body_snippet: String,
    },

    // 解码错误原样透传
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// 响应体解码错误，由 `ApiRequest::decode` 产生
#[derive(Debug, Error)]
pub enum DecodeError {
    // JSON 解析错误，附带源错误以及响应体片段
    #[error("Failed to parse JSON body\nSource error: {source}\nResponse body (truncated): {body_snippet}")]
    Json {
        #[source]
        source: serde_json::Error,
        body_snippet: String,
    },

    // 无法识别的图片数据
    #[error("Invalid image data: {0}")]
    Image(#[from] image::ImageError),

    #[error("Response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    // 自定义解码器的错误
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// 粗粒度错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 网络调用未能完成（连接、超时、取消）
    Transport,
    /// 传输完成但状态码不是 200
    RequestFailed,
    /// 响应体无法解码为期望的类型
    Decode,
    /// 客户端或请求构造阶段的配置错误
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::Cancelled { .. } => ErrorKind::Transport,
            Error::RequestFailed { .. } => ErrorKind::RequestFailed,
            Error::Decode(_) => ErrorKind::Decode,
            Error::InvalidHeaderName(_)
            | Error::InvalidHeaderValue(_)
            | Error::InvalidArgument(_) => {
                ErrorKind::Config
            }
        }
    }

    /// 非 200 响应的状态码
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl DecodeError {
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        DecodeError::Other(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 截取响应体的前 N 个字符用于错误消息 避免过长导致日志臃肿
pub fn snippet(s: &str, limit: usize) -> String {
    const ELLIPSIS: &str = "…";
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        let mut out = s.chars().take(limit).collect::<String>();
        out.push_str(ELLIPSIS);
        out
    }
}

/// 对任意字节做有损 UTF-8 转换后截取
pub fn body_snippet(body: &[u8]) -> String {
    snippet(&String::from_utf8_lossy(body), BODY_SNIPPET_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_text() {
        assert_eq!(snippet("hello", 10), "hello");
        assert_eq!(snippet("hello", 5), "hello");
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        assert_eq!(snippet("你好世界", 2), "你好…");
        assert_eq!(snippet("abcdef", 3), "abc…");
    }

    #[test]
    fn body_snippet_is_lossy() {
        let out = body_snippet(&[0x66, 0x6f, 0xff, 0x6f]);
        assert!(out.starts_with("fo"));
        assert!(out.ends_with('o'));
    }

    #[test]
    fn kind_classifies_variants() {
        let failed = Error::RequestFailed {
            url: "https://example.com/".into(),
            status: StatusCode::NOT_FOUND,
            body_snippet: String::new(),
        };
        assert_eq!(failed.kind(), ErrorKind::RequestFailed);
        assert_eq!(failed.status(), Some(StatusCode::NOT_FOUND));

        let cancelled = Error::Cancelled { url: "https://example.com/".into() };
        assert_eq!(cancelled.kind(), ErrorKind::Transport);

        let decode = Error::from(DecodeError::other("boom"));
        assert_eq!(decode.kind(), ErrorKind::Decode);
        assert_eq!(decode.to_string(), "boom");

        assert_eq!(Error::InvalidArgument("x".into()).kind(), ErrorKind::Config);
    }
}
