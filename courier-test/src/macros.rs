use bytes::Bytes;
use courier::api_request;
use courier::url::Url;

#[api_request(
    get = "https://httpbin.org/get",
    response = crate::HttpBinGet,
    decode = "json",
    headers(accept = "application/json", user_agent = "courier-test"),
    timeout = 13000,
)]
#[derive(Clone, Debug)]
pub struct Search {
    #[query("q")]
    pub keyword: String,
    #[query]
    pub page: u32,
    #[query]
    pub lang: Option<String>,
    #[query("tag")]
    pub tags: Vec<String>,
    #[header("X-Trace-Id")]
    pub trace: String,
    #[header]
    pub x_tenant: Option<String>,
    // 不参与请求
    pub note: &'static str,
}

#[api_request(get, response = String, decode = "text")]
pub struct FetchText {
    #[url]
    pub url: Url,
}

#[api_request(get, response = Bytes, decode = "bytes")]
pub struct FetchBytes {
    #[url]
    pub url: Url,
    #[query]
    pub range: Option<u64>,
}

#[api_request(get, response = image::DynamicImage, decode = "image")]
pub struct FetchImage {
    #[url]
    pub url: Url,
}

#[api_request(delete = "https://httpbin.org/anything/status", response = serde_json::Value)]
pub struct Ping;

#[api_request(get, response = T)]
pub struct FetchJson<T>
where
    T: serde::de::DeserializeOwned,
{
    #[url]
    pub url: Url,
    pub _marker: std::marker::PhantomData<T>,
}
