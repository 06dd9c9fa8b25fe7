// ════════════════════════════════════════════════════════════════
//  Configuration
// ════════════════════════════════════════════════════════════════

/// Верхняя граница `MaxNumberOfMessages` в ReceiveMessage.
pub const MAX_BATCH: i32 = 10;
/// Верхняя граница `WaitTimeSeconds` (long polling).
pub const MAX_WAIT_SECONDS: i32 = 20;

#[derive(Clone)]
pub struct SqsSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub queue_url: String,
    /// Свой endpoint (LocalStack, ElasticMQ).
    pub endpoint_url: Option<String>,
    pub max_messages: i32,
    pub wait_time_seconds: i32,
    pub include_attributes: bool,
}

impl SqsSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_BATCH).contains(&self.max_messages) {
            return Err(format!("max messages must be within 1..={MAX_BATCH}, got {}", self.max_messages));
        }
        if !(0..=MAX_WAIT_SECONDS).contains(&self.wait_time_seconds) {
            return Err(format!(
                "wait time must be within 0..={MAX_WAIT_SECONDS} seconds, got {}",
                self.wait_time_seconds
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SqsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("queue_url", &self.queue_url)
            .field("endpoint_url", &self.endpoint_url)
            .field("max_messages", &self.max_messages)
            .field("wait_time_seconds", &self.wait_time_seconds)
            .field("include_attributes", &self.include_attributes)
            .finish()
    }
}
