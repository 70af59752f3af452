use crate::http::Verb;
use crate::parser::{Cardinality, FieldKind, FieldMeta};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::LitStr;

/// 生成 `descriptor()` 方法体所需的上下文
pub struct DescriptorCtx {
    pub struct_ident: syn::Ident,
    pub verb: Verb,
    pub verb_span: Span,
    pub url: Option<LitStr>,
    pub static_headers: Vec<(String, String)>, // 来自 #[api_request(headers(...))]
    pub timeout_ms: Option<u64>,
    pub fields: Vec<FieldMeta>,
}

pub struct DescriptorExpander {
    ctx: DescriptorCtx,
    body: TokenStream, // 方法体代码
}

impl DescriptorExpander {
    pub fn new(ctx: DescriptorCtx) -> Self {
        Self {
            ctx,
            body: TokenStream::new(),
        }
    }

    pub fn validate(self) -> syn::Result<Self> {
        let url_fields = self
            .ctx
            .fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Url))
            .map(|f| f.ident.span())
            .collect::<Vec<Span>>();

        match (&self.ctx.url, url_fields.as_slice()) {
            (Some(lit), [field, ..]) => {
                let mut err = syn::Error::new(
                    *field,
                    "#[url] field conflicts with the url given in #[api_request(...)]",
                );
                err.combine(syn::Error::new(lit.span(), "url given here"));
                return Err(err);
            }
            (None, []) => {
                return Err(syn::Error::new(
                    self.ctx.verb_span,
                    format!(
                        "`{}` has no url: write `get = \"https://...\"` or mark a field with #[url]",
                        self.ctx.struct_ident
                    ),
                ));
            }
            (None, [_, second, ..]) => {
                return Err(syn::Error::new(*second, "only one field may be marked #[url]"));
            }
            _ => {}
        }

        for f in &self.ctx.fields {
            match (&f.kind, f.cardinality) {
                (FieldKind::Url, Cardinality::Single) => {}
                (FieldKind::Url, _) => {
                    let msg = "#[url] field must be a plain `Url`";
                    return Err(syn::Error::new(f.ident.span(), msg));
                }
                (FieldKind::Header { .. }, Cardinality::Many) => {
                    let msg = "#[header] does not support Vec<_>; join the values into one string";
                    return Err(syn::Error::new(f.ident.span(), msg));
                }
                _ => {}
            }
        }
        Ok(self)
    }

    pub fn stage_init(mut self) -> Self {
        let url_stmt = if let Some(lit) = &self.ctx.url {
            // 字面量已在展开期校验过
            quote! {
                let __url = ::courier::url::Url::parse(#lit)
                    .expect("url validated by #[api_request(...)]");
            }
        } else {
            let field = self
                .ctx
                .fields
                .iter()
                .find(|f| matches!(f.kind, FieldKind::Url))
                .map(|f| f.ident.clone());
            quote! {
                let __url = ::core::clone::Clone::clone(&self.#field);
            }
        };

        let init = self.ctx.verb.descriptor_for(quote! { __url });
        self.body.extend(quote! {
            #url_stmt
            #[allow(unused_mut)]
            let mut __desc = #init;
        });
        self
    }

    pub fn stage_apply_static_headers(mut self) -> Self {
        for (k, v) in &self.ctx.static_headers {
            let k_lit = LitStr::new(k, Span::call_site());
            let v_lit = LitStr::new(v, Span::call_site());
            self.body
                .extend(quote! { __desc = __desc.header(#k_lit, #v_lit); });
        }
        self
    }

    pub fn stage_apply_field_headers(mut self) -> Self {
        for f in &self.ctx.fields {
            if let FieldKind::Header { name } = &f.kind {
                let ident = &f.ident;
                let key = LitStr::new(name, f.ident.span());
                let stmt = match f.cardinality {
                    Cardinality::Option => quote! {
                        if let ::core::option::Option::Some(__v) = &self.#ident {
                            __desc = __desc.header(#key, ::std::string::ToString::to_string(__v));
                        }
                    },
                    _ => quote! {
                        __desc = __desc.header(#key, ::std::string::ToString::to_string(&self.#ident));
                    },
                };
                self.body.extend(stmt);
            }
        }
        self
    }

    pub fn stage_apply_query(mut self) -> Self {
        for f in &self.ctx.fields {
            if let FieldKind::Query { key } = &f.kind {
                let ident = &f.ident;
                // 未显式命名 => 使用字段名
                let key_lit = key.clone().unwrap_or_else(|| {
                    LitStr::new(ident.to_string().trim_start_matches("r#"), ident.span())
                });
                let stmt = match f.cardinality {
                    Cardinality::Single => quote! {
                        __desc = __desc.query(#key_lit, ::std::string::ToString::to_string(&self.#ident));
                    },
                    Cardinality::Option => quote! {
                        if let ::core::option::Option::Some(__v) = &self.#ident {
                            __desc = __desc.query(#key_lit, ::std::string::ToString::to_string(__v));
                        }
                    },
                    Cardinality::Many => quote! {
                        for __v in &self.#ident {
                            __desc = __desc.query(#key_lit, ::std::string::ToString::to_string(__v));
                        }
                    },
                };
                self.body.extend(stmt);
            }
        }
        self
    }

    pub fn stage_apply_timeout(mut self) -> Self {
        if let Some(ms) = self.ctx.timeout_ms {
            self.body.extend(quote! {
                __desc = __desc.timeout(::std::time::Duration::from_millis(#ms));
            });
        }
        self
    }

    pub fn finish(self) -> TokenStream {
        let body = self.body;
        quote! {{
            #body
            __desc
        }}
    }
}
