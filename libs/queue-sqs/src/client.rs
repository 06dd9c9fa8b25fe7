use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use aws_sdk_sqs::config::retry::RetryConfig;
use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_sqs::primitives::Blob;
use aws_sdk_sqs::types::{Message, MessageAttributeValue};
use aws_sdk_sqs::Client;

use dump_api::{Base64Bytes, MessageAttribute, ProviderError, QueueClient, RawMessage};

use crate::config::SqsSettings;
use crate::error::receive_error;

// ════════════════════════════════════════════════════════════════
//  SqsQueue
// ════════════════════════════════════════════════════════════════

/// `QueueClient` поверх ReceiveMessage. Сообщения не удаляются:
/// после visibility timeout они будут доставлены снова.
pub struct SqsQueue {
    client: Client,
    queue_url: String,
    max_messages: i32,
    wait_time_seconds: i32,
    include_attributes: bool,
}

impl SqsQueue {
    pub fn new(settings: &SqsSettings) -> Result<Self, ProviderError> {
        settings.validate().map_err(ProviderError::config)?;

        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            settings.session_token.clone(),
            None,
            "sqs-dump",
        );
        // Повторы делает PollLoop по своей RetryPolicy, у SDK они выключены.
        let mut builder = aws_sdk_sqs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());
        if let Some(ref endpoint) = settings.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::info!(
            region = %settings.region,
            queue = %settings.queue_url,
            endpoint = settings.endpoint_url.as_deref().unwrap_or("default"),
            max_messages = settings.max_messages,
            wait_time_seconds = settings.wait_time_seconds,
            "sqs client configured"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            queue_url: settings.queue_url.clone(),
            max_messages: settings.max_messages,
            wait_time_seconds: settings.wait_time_seconds,
            include_attributes: settings.include_attributes,
        })
    }

    async fn receive(&self) -> Result<Vec<RawMessage>, ProviderError> {
        let mut req = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(self.max_messages)
            .wait_time_seconds(self.wait_time_seconds);
        if self.include_attributes {
            req = req.message_attribute_names("All");
        }

        let output = req.send().await.map_err(receive_error)?;
        Ok(output.messages().iter().map(convert_message).collect())
    }
}

impl QueueClient for SqsQueue {
    fn fetch_batch(&self) -> Pin<Box<dyn Future<Output = Result<Vec<RawMessage>, ProviderError>> + Send + '_>> {
        Box::pin(self.receive())
    }

    fn address(&self) -> &str {
        &self.queue_url
    }
}

// ════════════════════════════════════════════════════════════════
//  SDK → RawMessage
// ════════════════════════════════════════════════════════════════

/// Перенести поля сообщения SDK как есть, без проверки обязательности.
pub fn convert_message(message: &Message) -> RawMessage {
    RawMessage {
        message_id: message.message_id().map(str::to_string),
        receipt_handle: message.receipt_handle().map(str::to_string),
        body: message.body().map(str::to_string),
        md5_of_body: message.md5_of_body().map(str::to_string),
        message_attributes: message.message_attributes().map(|attrs| {
            attrs
                .iter()
                .map(|(name, value)| (name.clone(), convert_attribute(value)))
                .collect::<BTreeMap<_, _>>()
        }),
    }
}

pub fn convert_attribute(value: &MessageAttributeValue) -> MessageAttribute {
    let blob = |b: &Blob| Base64Bytes::from(b.clone().into_inner());
    MessageAttribute {
        data_type: value.data_type().to_string(),
        binary_list_values: non_empty(value.binary_list_values()).map(|list| list.iter().map(blob).collect()),
        binary_value: value.binary_value().map(blob),
        string_list_values: non_empty(value.string_list_values()).map(<[String]>::to_vec),
        string_value: value.string_value().map(str::to_string),
    }
}

/// SDK отдаёт отсутствующий список как пустой срез.
fn non_empty<T>(list: &[T]) -> Option<&[T]> {
    if list.is_empty() { None } else { Some(list) }
}
