//! 查询参数与请求体的反序列化辅助函数
//!
//! 查询字符串中的数字都以字符串形式到达，`#[serde(flatten)]` 之后也是如此。

use serde::de::{Error, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

struct I64Visitor;

impl<'de> Visitor<'de> for I64Visitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if value <= i64::MAX as u64 {
            Ok(value as i64)
        } else {
            Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        value
            .trim()
            .parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }
}

struct OptionalI64Visitor;

impl<'de> Visitor<'de> for OptionalI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional integer or a string containing an integer")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OptionalI64Visitor)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        I64Visitor.visit_u64(value).map(Some)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        // 空字符串视为未提供
        if value.trim().is_empty() {
            return Ok(None);
        }
        I64Visitor.visit_str(value).map(Some)
    }
}

/// 字符串或整数 -> i64
pub fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(I64Visitor)
}

/// 可选的字符串或整数 -> Option<i64>，配合 `#[serde(default)]` 使用
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalI64Visitor)
}

/// 区分"字段缺失"与"显式 null"，配合 `Option<Option<T>>` 和 `#[serde(default)]` 使用
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        id: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        teacher: Option<Option<i64>>,
    }

    #[test]
    fn test_optional_i64_variants() {
        let f: Filter = serde_json::from_str(r#"{"id":"12"}"#).unwrap();
        assert_eq!(f.id, Some(12));
        let f: Filter = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(f.id, Some(7));
        let f: Filter = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert_eq!(f.id, None);
        let f: Filter = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert_eq!(f.id, None);
        let f: Filter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.id, None);
        assert!(serde_json::from_str::<Filter>(r#"{"id":"abc"}"#).is_err());
    }

    #[test]
    fn test_deserialize_some_distinguishes_null() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.teacher, None);
        let p: Patch = serde_json::from_str(r#"{"teacher":null}"#).unwrap();
        assert_eq!(p.teacher, Some(None));
        let p: Patch = serde_json::from_str(r#"{"teacher":3}"#).unwrap();
        assert_eq!(p.teacher, Some(Some(3)));
    }
}
