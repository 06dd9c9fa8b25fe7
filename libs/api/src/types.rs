use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Binary payload
// ════════════════════════════════════════════════════════════════

/// Бинарные данные, сериализуемые в JSON как base64-строка.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Base64Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Base64Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for Base64Bytes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.0);
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Base64Bytes {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(s.as_bytes())
            .map(Base64Bytes)
            .map_err(|e| serde::de::Error::custom(format!("invalid base64: {e}")))
    }
}

// ════════════════════════════════════════════════════════════════
//  Message attributes
// ════════════════════════════════════════════════════════════════

/// Типизированное значение атрибута сообщения.
///
/// Формат JSON совпадает с тем, что пишут другие клиенты SQS: ключи
/// в PascalCase, отсутствующие значения как `null`. String и Number
/// приходят в `StringValue`, Binary в `BinaryValue` (base64).
/// List-поля зарезервированы провайдером и на практике пусты.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttribute {
    pub data_type: String,
    #[serde(default)]
    pub binary_list_values: Option<Vec<Base64Bytes>>,
    #[serde(default)]
    pub binary_value: Option<Base64Bytes>,
    #[serde(default)]
    pub string_list_values: Option<Vec<String>>,
    #[serde(default)]
    pub string_value: Option<String>,
}

// ════════════════════════════════════════════════════════════════
//  RawMessage
// ════════════════════════════════════════════════════════════════

/// Сообщение в том виде, в каком его вернул провайдер очереди.
///
/// Все поля опциональны: провайдер обещает их наличие, но проверка
/// контракта — задача `RecordBuilder`, а не клиента.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub message_id: Option<String>,
    pub receipt_handle: Option<String>,
    pub body: Option<String>,
    pub md5_of_body: Option<String>,
    pub message_attributes: Option<BTreeMap<String, MessageAttribute>>,
}

// ════════════════════════════════════════════════════════════════
//  Record
// ════════════════════════════════════════════════════════════════

/// Каноническая запись, одна строка в выходном NDJSON-файле.
///
/// Строится один раз на каждую доставку сообщения и больше не меняется.
/// Повторная доставка того же `message_id` даёт новую запись с новым
/// `receipt_handle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Тело сообщения, как есть.
    pub body: String,
    /// MD5 тела, как его сообщил провайдер (локально не пересчитывается).
    #[serde(rename = "md5_of_body")]
    pub body_checksum: String,
    #[serde(rename = "message_id")]
    pub id: String,
    /// Одноразовый токен этой доставки (нужен для удаления сообщения).
    #[serde(rename = "receipt_handle")]
    pub receipt_token: String,
    /// Есть только когда атрибуты запрашиваются.
    #[serde(
        rename = "message_attributes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attributes: Option<BTreeMap<String, MessageAttribute>>,
}

impl Record {
    /// Одна строка NDJSON: JSON-объект без переводов строк плюс `\n`.
    pub fn to_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}
