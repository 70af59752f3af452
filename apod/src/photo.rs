use chrono::{Local, NaiveDate};
use courier::api_request;
use serde::{Deserialize, Serialize};
use url::Url;

/// api.nasa.gov 提供的演示 key，有严格的频率限制
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// 图片元信息
///
/// 线上字段 `explanation` 对应这里的 `description`。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub title: String,
    #[serde(rename = "explanation")]
    pub description: String,
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// 查询某一天的图片元信息，`date` 与 `api_key` 总会出现在查询串里
#[api_request(
    get = "https://api.nasa.gov/planetary/apod",
    response = PhotoInfo,
    decode = "json",
    headers(accept = "application/json"),
)]
#[derive(Clone, Debug)]
pub struct PhotoInfoRequest {
    #[query]
    pub date: NaiveDate,
    #[query]
    pub api_key: String,
}

impl PhotoInfoRequest {
    /// 日期取本地当天
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            date: Local::now().date_naive(),
            api_key: api_key.into(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

impl Default for PhotoInfoRequest {
    fn default() -> Self {
        Self::new(DEMO_API_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier::{ApiRequest, DecodeError};

    const FULL: &[u8] =
        br#"{"title":"T","explanation":"D","url":"https://x/y.jpg","copyright":"C"}"#;

    fn jan_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 20).unwrap()
    }

    #[test]
    fn descriptor_targets_apod_with_date_and_key() {
        let req = PhotoInfoRequest::new("DEMO_KEY").with_date(jan_20());
        let desc = req.descriptor();

        assert_eq!(desc.url().as_str(), "https://api.nasa.gov/planetary/apod");
        assert_eq!(
            desc.full_url().as_str(),
            "https://api.nasa.gov/planetary/apod?date=2023-01-20&api_key=DEMO_KEY"
        );
        assert_eq!(
            desc.headers(),
            &[("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn default_request_always_sends_a_date() {
        let req = PhotoInfoRequest::new("SECRET123");
        let desc = req.descriptor();

        assert_eq!(
            desc.query_pairs(),
            &[
                ("date".to_string(), req.date.format("%Y-%m-%d").to_string()),
                ("api_key".to_string(), "SECRET123".to_string()),
            ]
        );
        assert_eq!(PhotoInfoRequest::default().api_key, DEMO_API_KEY);
    }

    #[test]
    fn decodes_full_payload_with_renamed_description() {
        let info = PhotoInfoRequest::default().decode(FULL).unwrap();
        assert_eq!(
            info,
            PhotoInfo {
                title: "T".into(),
                description: "D".into(),
                url: Url::parse("https://x/y.jpg").unwrap(),
                copyright: Some("C".into()),
            }
        );
    }

    #[test]
    fn copyright_is_optional() {
        let body = br#"{"title":"T","explanation":"D","url":"https://x/y.jpg"}"#;
        let info = PhotoInfoRequest::default().decode(body).unwrap();
        assert_eq!(info.copyright, None);
        assert_eq!(info.url.as_str(), "https://x/y.jpg");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body =
            br#"{"title":"T","explanation":"D","url":"https://x/y.jpg","media_type":"image"}"#;
        assert!(PhotoInfoRequest::default().decode(body).is_ok());
    }

    #[test]
    fn missing_url_is_decode_error() {
        let body = br#"{"title":"T","explanation":"D"}"#;
        let err = PhotoInfoRequest::default().decode(body).unwrap_err();
        assert!(matches!(err, DecodeError::Json { .. }));
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn description_field_name_is_not_accepted_on_the_wire() {
        let body = br#"{"title":"T","description":"D","url":"https://x/y.jpg"}"#;
        assert!(PhotoInfoRequest::default().decode(body).is_err());
    }

    #[test]
    fn invalid_url_is_decode_error() {
        let body = br#"{"title":"T","explanation":"D","url":"not a url"}"#;
        assert!(matches!(
            PhotoInfoRequest::default().decode(body),
            Err(DecodeError::Json { .. })
        ));
    }

    #[test]
    fn decode_is_repeatable() {
        let req = PhotoInfoRequest::default();
        assert_eq!(req.decode(FULL).unwrap(), req.decode(FULL).unwrap());

        let bad = b"{";
        assert_eq!(
            req.decode(bad).unwrap_err().to_string(),
            req.decode(bad).unwrap_err().to_string()
        );
    }

    #[test]
    fn serializes_with_wire_names() {
        let info = PhotoInfoRequest::default().decode(FULL).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["explanation"], "D");
        assert!(value.get("description").is_none());
    }
}
