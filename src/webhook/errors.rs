use derive_more::{Display, Error};
use ntex::{http, web};

/// Failures that end an inbound webhook request.
///
/// Rejected mutations and unknown actions are not listed here: replies from
/// WhatsApp are always acknowledged, see [`super::shopify::router::MutationResult`].
#[derive(Debug, Display, Error)]
pub enum WebhookError {
    #[display("Invalid HMAC signature")]
    AuthenticationFailure,
    #[display("Invalid JSON: {_0}")]
    MalformedPayload(#[error(not(source))] String),
    #[display("WhatsApp send failed: {_0}")]
    NotifyFailure(#[error(not(source))] String),
    #[display("Webhook verification failed")]
    HandshakeForbidden,
    #[display("Internal error: {_0}")]
    Internal(#[error(not(source))] String),
}

impl WebhookError {
    /// Metric label of the request outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            WebhookError::AuthenticationFailure => "auth_failed",
            WebhookError::MalformedPayload(_) => "malformed",
            WebhookError::NotifyFailure(_) => "notify_failed",
            WebhookError::HandshakeForbidden => "handshake_forbidden",
            WebhookError::Internal(_) => "internal",
        }
    }
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        match self {
            WebhookError::NotifyFailure(_) | WebhookError::Internal(_) => {
                logfire::error!("webhook failed: {error}", error = self.to_string());
            }
            _ => {
                logfire::warn!("webhook rejected: {error}", error = self.to_string());
            }
        }

        web::HttpResponse::build(self.status_code()).json(&serde_json::json!({
            "error": self.to_string()
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::AuthenticationFailure => http::StatusCode::UNAUTHORIZED,
            WebhookError::MalformedPayload(_) => http::StatusCode::BAD_REQUEST,
            WebhookError::NotifyFailure(_) => http::StatusCode::BAD_GATEWAY,
            WebhookError::HandshakeForbidden => http::StatusCode::FORBIDDEN,
            WebhookError::Internal(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::error::WebResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WebhookError::AuthenticationFailure.status_code(),
            http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::MalformedPayload("eof".into()).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::NotifyFailure("timeout".into()).status_code(),
            http::StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            WebhookError::HandshakeForbidden.status_code(),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            WebhookError::Internal("boom".into()).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(WebhookError::HandshakeForbidden.outcome(), "handshake_forbidden");
        assert_eq!(WebhookError::AuthenticationFailure.outcome(), "auth_failed");
        assert_eq!(WebhookError::NotifyFailure("x".into()).outcome(), "notify_failed");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            WebhookError::AuthenticationFailure.to_string(),
            "Invalid HMAC signature"
        );
        assert_eq!(
            WebhookError::MalformedPayload("expected value".into()).to_string(),
            "Invalid JSON: expected value"
        );
    }
}
