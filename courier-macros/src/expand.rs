// request 生成整个 impl，descriptor 只负责 descriptor() 的方法体

mod descriptor;
mod request;

pub use request::expand_api_request;
