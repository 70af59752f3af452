//! NASA 每日天文图（APOD）
//!
//! 两步请求：先取图片元信息（[`PhotoInfoRequest`]），再用元信息里的 `url`
//! 取图片本身（[`ImageRequest`]）。两步都走 `courier` 的同一个执行函数。

pub mod photo;
pub mod picture;
pub mod pipeline;

pub use photo::{PhotoInfo, PhotoInfoRequest, DEMO_API_KEY};
pub use picture::ImageRequest;
pub use pipeline::{fetch_daily_image, DailyImage};
