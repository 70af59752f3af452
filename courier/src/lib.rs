//! courier：类型化的 HTTP 请求
//!
//! 一个请求类型实现 [`ApiRequest`]，描述“如何构造请求”和“如何解码响应”；
//! [`execute`] / [`execute_with`] 负责发送并返回该请求自己的 `Response` 类型。
//!
//! ```ignore
//! use courier::{api_request, execute};
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct HttpBinGet {
//!     url: String,
//! }
//!
//! #[api_request(get = "https://httpbin.org/get", response = HttpBinGet)]
//! struct Search {
//!     #[query("q")]
//!     keyword: String,
//! }
//!
//! let out = execute(Search { keyword: "rust".into() }).await?;
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod execute;
pub mod mock;
pub mod request;
pub mod transport;

pub use client::{HttpClient, HttpClientOption, HttpClientOptionBuilder};
pub use courier_macros::api_request;
pub use error::{DecodeError, Error, ErrorKind, Result};
pub use execute::{execute, execute_cancellable, execute_with};
pub use request::{ApiRequest, RequestDescriptor};
pub use transport::{RawResponse, Transport};

// 供宏展开代码使用
pub use reqwest;
pub use url;
