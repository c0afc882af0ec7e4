use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::protocol::ApiResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("Access denied")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    /// Shared by unknown emails and wrong passwords.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("Server error")]
    Server(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::BadRequest(message.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error envelope. The cause chain of a server error is only
    /// included when `expose_detail` is set.
    pub fn into_response(self, expose_detail: bool) -> HttpResponse {
        let status = self.status();
        let mut body = ApiResponse::<()>::failure(self.to_string());
        if let Self::Server(err) = &self {
            tracing::error!("{:?}", err);
            if expose_detail {
                body = body.with_error(format!("{:#}", err));
            }
        }
        HttpResponse::build(status).json(body)
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Server(anyhow::Error::new(err).context("DB error"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Server(err) = self {
            tracing::error!("{:?}", err);
        }
        HttpResponse::build(self.status()).json(ApiResponse::<()>::failure(self.to_string()))
    }
}
