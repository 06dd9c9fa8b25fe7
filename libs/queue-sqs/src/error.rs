use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;

use dump_api::{ErrorKind, ProviderError};

const TRANSIENT_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "RequestThrottled",
    "KmsThrottled",
    "ServiceUnavailable",
    "InternalError",
    "InternalFailure",
];

const AUTH_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
    "InvalidSecurity",
    "ExpiredToken",
];

const MISSING_QUEUE_CODES: &[&str] = &["AWS.SimpleQueueService.NonExistentQueue", "QueueDoesNotExist"];

/// Классификация ответа сервиса по коду ошибки и HTTP-статусу.
///
/// Код важнее статуса: `AccessDenied` приходит с 400/403 и никогда не
/// становится transient. Неизвестные коды — permanent.
pub fn classify_service_error(code: Option<&str>, status: Option<u16>) -> ErrorKind {
    if let Some(code) = code {
        if TRANSIENT_CODES.contains(&code) {
            return ErrorKind::Io;
        }
        if AUTH_CODES.contains(&code) {
            return ErrorKind::Auth;
        }
        if MISSING_QUEUE_CODES.contains(&code) {
            return ErrorKind::Config;
        }
    }
    match status {
        Some(429) => ErrorKind::Io,
        Some(s) if (500..600).contains(&s) => ErrorKind::Io,
        Some(401) | Some(403) => ErrorKind::Auth,
        _ => ErrorKind::Logic,
    }
}

pub(crate) fn receive_error(err: SdkError<ReceiveMessageError>) -> ProviderError {
    let kind = match &err {
        SdkError::ConstructionFailure(_) => ErrorKind::Config,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => ErrorKind::Io,
        SdkError::ServiceError(service) => {
            let status = service.raw().status().as_u16();
            classify_service_error(service.err().code(), Some(status))
        }
        _ => ErrorKind::Logic,
    };
    ProviderError::with_kind(kind, format!("receive message: {}", DisplayErrorContext(&err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_and_server_errors_are_transient() {
        assert_eq!(classify_service_error(Some("RequestThrottled"), Some(400)), ErrorKind::Io);
        assert_eq!(classify_service_error(Some("KmsThrottled"), Some(400)), ErrorKind::Io);
        assert_eq!(classify_service_error(Some("InternalError"), Some(500)), ErrorKind::Io);
        assert_eq!(classify_service_error(None, Some(503)), ErrorKind::Io);
        assert_eq!(classify_service_error(None, Some(429)), ErrorKind::Io);
    }

    #[test]
    fn credential_failures_are_permanent() {
        assert_eq!(classify_service_error(Some("InvalidClientTokenId"), Some(403)), ErrorKind::Auth);
        assert_eq!(classify_service_error(Some("SignatureDoesNotMatch"), Some(403)), ErrorKind::Auth);
        assert_eq!(classify_service_error(Some("AccessDenied"), Some(500)), ErrorKind::Auth);
        assert_eq!(classify_service_error(None, Some(403)), ErrorKind::Auth);
    }

    #[test]
    fn missing_queue_is_a_config_error() {
        assert_eq!(
            classify_service_error(Some("AWS.SimpleQueueService.NonExistentQueue"), Some(400)),
            ErrorKind::Config
        );
        assert_eq!(classify_service_error(Some("QueueDoesNotExist"), Some(400)), ErrorKind::Config);
    }

    #[test]
    fn unknown_client_errors_are_permanent() {
        assert_eq!(classify_service_error(Some("InvalidParameterValue"), Some(400)), ErrorKind::Logic);
        assert_eq!(classify_service_error(None, None), ErrorKind::Logic);
        assert!(!classify_service_error(Some("OverLimit"), Some(400)).is_transient());
    }

    // ── SdkError → ProviderError ──

    use aws_sdk_sqs::config::http::HttpResponse;
    use aws_sdk_sqs::error::ErrorMetadata;
    use aws_smithy_runtime_api::client::result::ConnectorError;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn service_error(code: Option<&str>, status: u16) -> SdkError<ReceiveMessageError> {
        let mut meta = ErrorMetadata::builder().message("rejected");
        if let Some(code) = code {
            meta = meta.code(code);
        }
        SdkError::service_error(ReceiveMessageError::generic(meta.build()), response(status))
    }

    #[test]
    fn construction_failure_is_a_config_error() {
        let err = receive_error(SdkError::construction_failure("queue url is not set"));
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().starts_with("receive message:"));
    }

    #[test]
    fn transport_failures_are_transient() {
        let timeout = receive_error(SdkError::timeout_error("operation timed out"));
        assert_eq!(timeout.kind(), ErrorKind::Io);

        let dispatch = receive_error(SdkError::dispatch_failure(ConnectorError::io("connection refused".into())));
        assert_eq!(dispatch.kind(), ErrorKind::Io);

        let response = receive_error(SdkError::response_error("truncated body", response(200)));
        assert_eq!(response.kind(), ErrorKind::Io);
        assert!(response.is_transient());
    }

    #[test]
    fn service_errors_use_code_then_status() {
        assert_eq!(receive_error(service_error(Some("RequestThrottled"), 400)).kind(), ErrorKind::Io);
        assert_eq!(receive_error(service_error(Some("QueueDoesNotExist"), 400)).kind(), ErrorKind::Config);
        assert_eq!(receive_error(service_error(Some("AccessDenied"), 503)).kind(), ErrorKind::Auth);
        assert_eq!(receive_error(service_error(None, 502)).kind(), ErrorKind::Io);
        assert_eq!(receive_error(service_error(None, 403)).kind(), ErrorKind::Auth);
        assert_eq!(receive_error(service_error(Some("InvalidParameterValue"), 400)).kind(), ErrorKind::Logic);
    }

    #[test]
    fn message_carries_service_code() {
        let err = receive_error(service_error(Some("QueueDoesNotExist"), 400));
        assert!(err.to_string().contains("QueueDoesNotExist"), "{err}");
    }
}
