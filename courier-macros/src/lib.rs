use proc_macro::TokenStream;

mod expand;
mod http;
mod parser;
mod util;

/// 为结构体生成 `courier::ApiRequest` 实现
///
/// 结构体级：`get|post|put|delete|patch|head` 之一（`= "url"` 或裸写并配合 `#[url]` 字段）、
/// `response = T`、可选的 `decode = "json|image|bytes|text"`、`headers(k = "v")`、`timeout = ms`。
/// 字段级：`#[url]`、`#[query]` / `#[query("name")]`、`#[header]` / `#[header("Name")]`。
///
/// ```ignore
/// #[api_request(get = "https://api.nasa.gov/planetary/apod", response = PhotoInfo, decode = "json")]
/// pub struct PhotoInfoRequest {
///     #[query]
///     pub date: NaiveDate,
///     #[query]
///     pub api_key: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_request(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand_api_request(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
