use courier::codec::{Decoder, ImageDecoder};
use courier::{ApiRequest, DecodeError, RequestDescriptor};
use image::DynamicImage;
use url::Url;

use crate::photo::PhotoInfo;

/// 按元信息给出的地址下载图片并解码
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    url: Url,
}

impl ImageRequest {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl From<&PhotoInfo> for ImageRequest {
    fn from(info: &PhotoInfo) -> Self {
        Self::new(info.url.clone())
    }
}

impl ApiRequest for ImageRequest {
    type Response = DynamicImage;

    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::get(self.url.clone())
    }

    fn decode(&self, body: &[u8]) -> Result<DynamicImage, DecodeError> {
        ImageDecoder::decode(body)
    }
}
