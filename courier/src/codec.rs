//! 返回体解码策略

use bytes::Bytes;
use image::DynamicImage;
use serde::de::DeserializeOwned;

use crate::error::{body_snippet, DecodeError};

pub trait Decoder<T> {
    fn decode(body: &[u8]) -> Result<T, DecodeError>;
}

/// JSON 解码，适用于任意 `DeserializeOwned`
pub struct JsonDecoder;

/// 图片解码，按内容嗅探格式
pub struct ImageDecoder;

/// 原样返回字节
pub struct BytesDecoder;

/// UTF-8 文本
pub struct TextDecoder;

impl<T: DeserializeOwned> Decoder<T> for JsonDecoder {
    fn decode(body: &[u8]) -> Result<T, DecodeError> {
        serde_json::from_slice(body).map_err(|source| DecodeError::Json {
            source,
            body_snippet: body_snippet(body),
        })
    }
}

impl Decoder<DynamicImage> for ImageDecoder {
    fn decode(body: &[u8]) -> Result<DynamicImage, DecodeError> {
        Ok(image::load_from_memory(body)?)
    }
}

impl Decoder<Bytes> for BytesDecoder {
    fn decode(body: &[u8]) -> Result<Bytes, DecodeError> {
        Ok(Bytes::copy_from_slice(body))
    }
}

impl Decoder<Vec<u8>> for BytesDecoder {
    fn decode(body: &[u8]) -> Result<Vec<u8>, DecodeError> {
        Ok(body.to_vec())
    }
}

impl Decoder<String> for TextDecoder {
    fn decode(body: &[u8]) -> Result<String, DecodeError> {
        Ok(std::str::from_utf8(body)?.to_owned())
    }
}
