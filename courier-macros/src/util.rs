use syn::Type;

// 取泛型内层类型（Option<T>/Vec<T>）
pub fn first_generic_arg(ty: &Type) -> Option<&Type> {
    if let Type::Path(tp) = ty {
        if let Some(seg) = tp.path.segments.last() {
            if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(t) = arg {
                        return Some(t);
                    }
                }
            }
        }
    }
    None
}

// 类型最外层的名字，如 `std::option::Option<T>` -> "Option"
pub fn outer_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => {
            tp.path.segments.last().map(|seg| seg.ident.to_string())
        }
        _ => None,
    }
}

// 字段名 -> 请求头名：`_` 转 `-` 并转小写
pub fn header_name_from_ident(ident: &syn::Ident) -> String {
    ident.to_string().trim_start_matches("r#").replace('_', "-").to_ascii_lowercase()
}
