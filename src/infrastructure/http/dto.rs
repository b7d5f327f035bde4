//! Data Transfer Objects
//!
//! 线格式：扁平 JSON 对象，字段名 camelCase，日期为 YYYY-MM-DD。
//! 解析时字段名忽略大小写（兼容 .NET 序列化器产生的 PascalCase）

use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

use crate::application::ports::{CustomerDraft, CustomerRecord};

/// 文本字段长度上限（字符数）
const MAX_NAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 100;

// ============================================================================
// Customer DTOs
// ============================================================================

/// 客户响应体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
    pub is_active: bool,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(c: CustomerRecord) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            date_of_birth: c.date_of_birth,
            city: c.city,
            country: c.country,
            is_active: c.is_active,
        }
    }
}

/// 客户请求体（新增 / 修改共用）
///
/// id 与 isActive 可缺省：新增时二者一律被仓储忽略；
/// 修改时 isActive 缺省为 true（与原始数据模型的默认值一致）
#[derive(Debug, Clone)]
pub struct CustomerPayload {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
    pub is_active: bool,
}

impl CustomerPayload {
    /// 丢弃 id / isActive，转为新增输入
    pub fn into_draft(self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            city: self.city,
            country: self.country,
        }
    }

    /// 以指定 id 转为完整记录（用于 update 的整体覆盖）
    pub fn into_record(self, id: i32) -> CustomerRecord {
        CustomerRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            city: self.city,
            country: self.country,
            is_active: self.is_active,
        }
    }

    /// 传输层字段校验，返回第一条违规信息
    ///
    /// 仓储不做任何格式校验，必须在调用仓储之前拦截
    pub fn validate(&self) -> Result<(), String> {
        require_text("firstName", &self.first_name, MAX_NAME_LEN)?;
        require_text("lastName", &self.last_name, MAX_NAME_LEN)?;
        require_text("email", &self.email, MAX_EMAIL_LEN)?;
        require_text("city", &self.city, MAX_NAME_LEN)?;
        require_text("country", &self.country, MAX_NAME_LEN)?;

        if !is_valid_email(&self.email) {
            return Err("The email field is not a valid e-mail address".to_string());
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("The {} field is required", field));
    }
    if value.chars().count() > max_len {
        return Err(format!(
            "The {} field must be a string with a maximum length of {}",
            field, max_len
        ));
    }
    Ok(())
}

/// 与原始实现的 EmailAddress 校验等价：
/// 恰好一个 @，且两侧均非空
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(3, '@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

impl<'de> Deserialize<'de> for CustomerPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = CustomerPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a customer object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id = None;
                let mut first_name = None;
                let mut last_name = None;
                let mut email = None;
                let mut date_of_birth = None;
                let mut city = None;
                let mut country = None;
                let mut is_active = None;

                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("id") {
                        id = map.next_value()?;
                    } else if key.eq_ignore_ascii_case("firstName") {
                        first_name = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("lastName") {
                        last_name = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("email") {
                        email = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("dateOfBirth") {
                        date_of_birth = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("city") {
                        city = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("country") {
                        country = Some(map.next_value()?);
                    } else if key.eq_ignore_ascii_case("isActive") {
                        is_active = Some(map.next_value()?);
                    } else {
                        // 未知字段一律忽略
                        let _ = map.next_value::<IgnoredAny>()?;
                    }
                }

                Ok(CustomerPayload {
                    id,
                    first_name: first_name.ok_or_else(|| de::Error::missing_field("firstName"))?,
                    last_name: last_name.ok_or_else(|| de::Error::missing_field("lastName"))?,
                    email: email.ok_or_else(|| de::Error::missing_field("email"))?,
                    date_of_birth: date_of_birth
                        .ok_or_else(|| de::Error::missing_field("dateOfBirth"))?,
                    city: city.ok_or_else(|| de::Error::missing_field("city"))?,
                    country: country.ok_or_else(|| de::Error::missing_field("country"))?,
                    is_active: is_active.unwrap_or(true),
                })
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CustomerPayload {
        serde_json::from_value(serde_json::json!({
            "firstName": "Test",
            "lastName": "User",
            "email": "test.user@demo.com",
            "dateOfBirth": "1995-01-01",
            "city": "Demo City",
            "country": "Demo Country"
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_camel_case_payload() {
        let payload = valid_payload();
        assert_eq!(payload.first_name, "Test");
        assert_eq!(
            payload.date_of_birth,
            NaiveDate::from_ymd_opt(1995, 1, 1).unwrap()
        );
        assert_eq!(payload.id, None);
        // isActive 缺省为 true
        assert!(payload.is_active);
    }

    #[test]
    fn test_parse_is_case_insensitive_on_field_names() {
        // .NET 客户端发送 PascalCase
        let payload: CustomerPayload = serde_json::from_value(serde_json::json!({
            "Id": 7,
            "FirstName": "Test",
            "LastName": "User",
            "Email": "test.user@demo.com",
            "DateOfBirth": "1995-01-01",
            "City": "Demo City",
            "Country": "Demo Country",
            "IsActive": false
        }))
        .unwrap();

        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.last_name, "User");
        assert!(!payload.is_active);
    }

    #[test]
    fn test_parse_rejects_missing_required_field() {
        let result: Result<CustomerPayload, _> = serde_json::from_value(serde_json::json!({
            "firstName": "Test",
            "lastName": "User",
            "email": "test.user@demo.com",
            "dateOfBirth": "1995-01-01",
            "city": "Demo City"
        }));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("country"), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_accepts_valid_payload() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_overlong_fields() {
        let mut payload = valid_payload();
        payload.first_name = String::new();
        assert!(payload.validate().is_err());

        let mut payload = valid_payload();
        payload.city = "x".repeat(51);
        assert!(payload.validate().is_err());

        let mut payload = valid_payload();
        payload.email = format!("{}@demo.com", "x".repeat(100));
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        for bad in ["no-at-sign", "@demo.com", "user@", "a@b@c.com"] {
            let mut payload = valid_payload();
            payload.email = bad.to_string();
            assert!(payload.validate().is_err(), "accepted: {}", bad);
        }
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let record = valid_payload().into_record(11);
        let json = serde_json::to_value(CustomerResponse::from(record)).unwrap();

        assert_eq!(json["id"], 11);
        assert_eq!(json["firstName"], "Test");
        assert_eq!(json["dateOfBirth"], "1995-01-01");
        assert_eq!(json["isActive"], true);
    }
}
