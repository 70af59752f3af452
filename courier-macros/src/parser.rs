// 结构体级属性与字段标注的解析

mod fields;
mod request;

pub use fields::{is_field_attr, Cardinality, FieldKind, FieldMeta};
pub use request::RequestAttributes;
