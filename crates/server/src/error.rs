use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use nusantara_common::NusantaraError;
use nusantara_story::GenerationError;

use crate::types::ErrorResponse;

/// Error returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Common(#[from] NusantaraError),
}

impl ApiError {
    /// Raw model output worth showing next to the error
    fn details(&self) -> Option<String> {
        match self {
            Self::Generation(e) => e.raw_response().map(str::to_string),
            Self::Common(_) => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Generation(e) => e.status_code(),
            Self::Common(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_story::RecoveryError;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, u16)> = vec![
            (GenerationError::Validation("title".into()).into(), 400),
            (GenerationError::ProviderRefusal { reason: "SAFETY".into() }.into(), 422),
            (
                GenerationError::MalformedResponse {
                    source: RecoveryError::NotAnObject,
                    raw: "[]".into(),
                }
                .into(),
                502,
            ),
            (GenerationError::ProviderTransport(NusantaraError::network("down")).into(), 503),
            (NusantaraError::pdf("font").into(), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code().as_u16(), expected, "{}", error);
        }
    }

    #[test]
    fn test_details_carry_raw_response() {
        let error: ApiError = GenerationError::ExhaustedRetries {
            attempts: 3,
            last_error: Box::new(GenerationError::MalformedResponse {
                source: RecoveryError::NoPayload,
                raw: "maaf".into(),
            }),
            last_raw: Some("maaf".into()),
        }
        .into();

        assert_eq!(error.details().as_deref(), Some("maaf"));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }
}
