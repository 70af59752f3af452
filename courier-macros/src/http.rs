//! 请求动词与响应解码方式，分别落到 `RequestDescriptor` 构造函数和 `courier::codec` 解码器

mod decode;
mod verb;

pub use decode::DecodeKind;
pub use verb::Verb;
