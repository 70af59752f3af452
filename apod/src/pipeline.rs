use courier::{execute_with, Transport};
use image::DynamicImage;

use crate::photo::{PhotoInfo, PhotoInfoRequest};
use crate::picture::ImageRequest;

/// 一次完整抓取的结果
#[derive(Debug)]
pub struct DailyImage {
    pub info: PhotoInfo,
    pub image: DynamicImage,
}

/// 先取元信息，再用其中的 `url` 原样构造图片请求
///
/// 任一步失败立即返回该错误，不重试，也不返回部分结果。
pub async fn fetch_daily_image<T: Transport>(
    transport: &T,
    request: &PhotoInfoRequest,
) -> courier::Result<DailyImage> {
    let info = execute_with(transport, request).await?;
    tracing::info!(title = %info.title, url = %info.url, "photo info received");

    let image = execute_with(transport, &ImageRequest::from(&info)).await?;
    tracing::info!(width = image.width(), height = image.height(), "image decoded");

    Ok(DailyImage { info, image })
}
