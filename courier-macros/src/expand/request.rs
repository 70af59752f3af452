use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct};

use crate::expand::descriptor::{DescriptorCtx, DescriptorExpander};
use crate::parser::{is_field_attr, FieldMeta, RequestAttributes};

/// 原样输出结构体（去掉字段标注），并追加 `impl ::courier::ApiRequest`
pub fn expand_api_request(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let attributes = RequestAttributes::parse(attr)?;
    let mut item_struct: ItemStruct = syn::parse2(item)?;

    // 先收集再剥离，否则编译器会报未知属性
    let fields = FieldMeta::collect(&item_struct)?;
    if let Fields::Named(named) = &mut item_struct.fields {
        for field in &mut named.named {
            field.attrs.retain(|a| !is_field_attr(a));
        }
    }

    let descriptor_body = DescriptorExpander::new(DescriptorCtx {
        struct_ident: item_struct.ident.clone(),
        verb: attributes.verb,
        verb_span: attributes.verb_span,
        url: attributes.url,
        static_headers: attributes.headers,
        timeout_ms: attributes.timeout_ms,
        fields,
    })
    .validate()?
    .stage_init()
    .stage_apply_static_headers()
    .stage_apply_field_headers()
    .stage_apply_query()
    .stage_apply_timeout()
    .finish();

    let ident = &item_struct.ident;
    let (impl_generics, ty_generics, where_clause) = item_struct.generics.split_for_impl();
    let response = &attributes.response;
    let decoder = attributes.decode.decoder();

    Ok(quote! {
        #item_struct

        impl #impl_generics ::courier::ApiRequest for #ident #ty_generics #where_clause {
            type Response = #response;

            fn descriptor(&self) -> ::courier::RequestDescriptor #descriptor_body

            fn decode(
                &self,
                body: &[u8],
            ) -> ::core::result::Result<Self::Response, ::courier::DecodeError> {
                <#decoder as ::courier::codec::Decoder<Self::Response>>::decode(body)
            }
        }
    })
}
