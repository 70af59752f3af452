use syn::{Attribute, Fields, ItemStruct, LitStr, Meta};

use crate::util::{first_generic_arg, header_name_from_ident, outer_ident};

/// 字段在请求里扮演的角色
#[derive(Clone)]
pub enum FieldKind {
    Url,
    Query { key: Option<LitStr> },
    Header { name: String },
    Other,
}

/// Single 原样写入，Option 为 None 时跳过，Many 逐个写入同名参数
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Option,
    Many,
}

#[derive(Clone)]
pub struct FieldMeta {
    pub ident: syn::Ident,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
}

impl FieldMeta {
    /// 收集所有具名字段；单元结构体没有字段，元组结构体报错
    pub fn collect(item: &ItemStruct) -> syn::Result<Vec<FieldMeta>> {
        let named = match &item.fields {
            Fields::Named(named) => named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &item.ident,
                    "#[api_request] requires a struct with named fields",
                ))
            }
        };

        named
            .named
            .iter()
            .filter_map(|field| field.ident.clone().map(|ident| (ident, field)))
            .map(|(ident, field)| {
                Ok(FieldMeta {
                    kind: kind_of(&ident, &field.attrs)?,
                    cardinality: cardinality_of(&field.ty),
                    ident,
                })
            })
            .collect()
    }
}

fn kind_of(ident: &syn::Ident, attrs: &[Attribute]) -> syn::Result<FieldKind> {
    let mut kind = FieldKind::Other;
    for attr in attrs.iter().filter(|a| is_field_attr(a)) {
        if !matches!(kind, FieldKind::Other) {
            return Err(syn::Error::new_spanned(
                attr,
                "a field can carry only one of #[url], #[query], #[header]",
            ));
        }
        let bare = matches!(attr.meta, Meta::Path(_));
        kind = if attr.path().is_ident("url") {
            FieldKind::Url
        } else if attr.path().is_ident("query") {
            // #[query] 用字段名，#[query("q")] 显式命名
            let key = if bare { None } else { Some(attr.parse_args::<LitStr>()?) };
            FieldKind::Query { key }
        } else {
            let name = if bare {
                header_name_from_ident(ident)
            } else {
                attr.parse_args::<LitStr>()?.value()
            };
            FieldKind::Header { name }
        };
    }
    Ok(kind)
}

fn cardinality_of(ty: &syn::Type) -> Cardinality {
    if first_generic_arg(ty).is_none() {
        return Cardinality::Single;
    }
    match outer_ident(ty).as_deref() {
        Some("Option") => Cardinality::Option,
        Some("Vec") => Cardinality::Many,
        _ => Cardinality::Single,
    }
}

/// 宏自己的字段标注，展开前要从结构体上剥离
pub fn is_field_attr(attr: &Attribute) -> bool {
    ["url", "query", "header"]
        .iter()
        .any(|name| attr.path().is_ident(name))
}
