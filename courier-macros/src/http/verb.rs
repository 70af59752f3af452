use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// `#[api_request]` 认可的 HTTP 动词，每个对应一个 `RequestDescriptor` 构造函数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl Verb {
    pub const KEYS: &'static str = "get, post, put, delete, patch, head";

    pub fn from_key(key: &str) -> Option<Self> {
        let verb = match key {
            "get" => Verb::Get,
            "post" => Verb::Post,
            "put" => Verb::Put,
            "delete" => Verb::Delete,
            "patch" => Verb::Patch,
            "head" => Verb::Head,
            _ => return None,
        };
        Some(verb)
    }

    fn key(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
            Verb::Patch => "patch",
            Verb::Head => "head",
        }
    }

    /// `::courier::RequestDescriptor::<verb>(url)`
    pub fn descriptor_for(self, url: TokenStream) -> TokenStream {
        let ctor = format_ident!("{}", self.key());
        quote! { ::courier::RequestDescriptor::#ctor(#url) }
    }
}
