use proc_macro2::{Span, TokenStream};
use syn::parse::Parser as _;
use syn::spanned::Spanned;
use syn::{LitInt, LitStr};

use crate::http::{DecodeKind, Verb};
use crate::util::header_name_from_ident;

/// 结构体级 `#[api_request(...)]` 属性
pub struct RequestAttributes {
    pub verb: Verb,
    pub verb_span: Span,
    pub url: Option<LitStr>, // 字面量 URL，已在展开期校验
    pub response: syn::Type,
    pub decode: DecodeKind,
    pub headers: Vec<(String, String)>,
    pub timeout_ms: Option<u64>,
}

impl RequestAttributes {
    pub fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut verb: Option<(Verb, Span)> = None;
        let mut url: Option<LitStr> = None;
        let mut response: Option<syn::Type> = None;
        let mut decode = DecodeKind::default();
        let mut headers = Vec::new();
        let mut timeout_ms = None;

        let parser = syn::meta::parser(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            // get = "https://..." 或裸写 get（URL 来自 #[url] 字段）
            if let Some(v) = Verb::from_key(&key) {
                if verb.is_some() {
                    return Err(meta.error("HTTP method specified more than once"));
                }
                if meta.input.peek(syn::Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    check_url(&lit)?;
                    url = Some(lit);
                }
                verb = Some((v, meta.path.span()));
                return Ok(());
            }

            match key.as_str() {
                "response" => response = Some(meta.value()?.parse()?),
                "decode" => {
                    let lit: LitStr = meta.value()?.parse()?;
                    decode = DecodeKind::from_key(&lit.value()).ok_or_else(|| {
                        let msg = format!(
                            "unknown decode kind `{}`, expected json, image, bytes or text",
                            lit.value()
                        );
                        syn::Error::new(lit.span(), msg)
                    })?;
                }
                // headers(accept = "application/json", user_agent = "x")
                "headers" => meta.parse_nested_meta(|h| {
                    let name = h
                        .path
                        .get_ident()
                        .ok_or_else(|| h.error("expected a header name"))?;
                    let name = header_name_from_ident(name);
                    let value: LitStr = h.value()?.parse()?;
                    headers.push((name, value.value()));
                    Ok(())
                })?,
                "timeout" => {
                    let lit: LitInt = meta.value()?.parse()?;
                    timeout_ms = Some(lit.base10_parse::<u64>()?);
                }
                _ => {
                    return Err(meta.error(format!(
                        "unsupported #[api_request] key, expected one of: {}, {}",
                        Verb::KEYS,
                        "response, decode, headers, timeout"
                    )))
                }
            }
            Ok(())
        });
        parser.parse2(attr)?;

        let (verb, verb_span) = verb.ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "missing HTTP method, e.g. #[api_request(get = \"https://...\", response = T)]",
            )
        })?;
        let response = response.ok_or_else(|| {
            syn::Error::new(Span::call_site(), "missing `response = Type` in #[api_request(...)]")
        })?;

        Ok(Self {
            verb,
            verb_span,
            url,
            response,
            decode,
            headers,
            timeout_ms,
        })
    }
}

// 生成代码里的 Url::parse 因此不会失败
fn check_url(lit: &LitStr) -> syn::Result<()> {
    match url::Url::parse(&lit.value()) {
        Ok(_) => Ok(()),
        Err(e) => Err(syn::Error::new(
            lit.span(),
            format!("invalid url `{}`: {}", lit.value(), e),
        )),
    }
}
