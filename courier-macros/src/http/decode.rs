use proc_macro2::TokenStream;
use quote::quote;

/// `decode = "..."` 的取值，缺省为 json
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeKind {
    #[default]
    Json,
    Image,
    Bytes,
    Text,
}

impl DecodeKind {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "json" => Some(DecodeKind::Json),
            "image" => Some(DecodeKind::Image),
            "bytes" => Some(DecodeKind::Bytes),
            "text" => Some(DecodeKind::Text),
            _ => None,
        }
    }

    pub fn decoder(self) -> TokenStream {
        match self {
            DecodeKind::Json => quote! { ::courier::codec::JsonDecoder },
            DecodeKind::Image => quote! { ::courier::codec::ImageDecoder },
            DecodeKind::Bytes => quote! { ::courier::codec::BytesDecoder },
            DecodeKind::Text => quote! { ::courier::codec::TextDecoder },
        }
    }
}
