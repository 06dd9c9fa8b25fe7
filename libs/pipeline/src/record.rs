use dump_api::{RawMessage, Record};

use crate::error::BuildError;

/// Сборка канонической `Record` из сырого сообщения провайдера.
///
/// Один и тот же builder обслуживает оба режима: с атрибутами и без.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    include_attributes: bool,
}

impl RecordBuilder {
    pub fn new(include_attributes: bool) -> Self {
        Self { include_attributes }
    }

    pub fn include_attributes(&self) -> bool {
        self.include_attributes
    }

    pub fn build(&self, raw: RawMessage) -> Result<Record, BuildError> {
        let id = raw.message_id.ok_or_else(|| BuildError::MissingField {
            field: "message_id",
            message_id: "<unknown>".into(),
        })?;
        if id.is_empty() {
            return Err(BuildError::EmptyField { field: "message_id", message_id: "<unknown>".into() });
        }

        let receipt_token = required(raw.receipt_handle, "receipt_handle", &id)?;
        if receipt_token.is_empty() {
            return Err(BuildError::EmptyField { field: "receipt_handle", message_id: id });
        }
        let body = required(raw.body, "body", &id)?;
        let body_checksum = required(raw.md5_of_body, "md5_of_body", &id)?;

        let attributes = if self.include_attributes {
            Some(raw.message_attributes.unwrap_or_default())
        } else {
            None
        };

        Ok(Record { body, body_checksum, id, receipt_token, attributes })
    }
}

fn required(value: Option<String>, field: &'static str, id: &str) -> Result<String, BuildError> {
    value.ok_or_else(|| BuildError::MissingField { field, message_id: id.to_string() })
}
