use reqwest::StatusCode;

/// Failures of the post service. Everything except `Url` comes from the
/// downstream comment fetch.
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("in reqwest crate: {}: {}", message, source)]
    ReqwestError {
        message: String,
        source: reqwest::Error,
    },

    #[error("in serde_json crate: {}: {}", message, source)]
    SerdeJsonError {
        message: String,
        source: serde_json::Error,
    },

    #[error("in url crate: {}: {}", message, source)]
    UrlError {
        message: String,
        source: url::ParseError,
    },

    #[error("failed status code: {}: {}", status_code, message)]
    FailedStatusCode {
        status_code: StatusCode,
        message: String,
    },
}

type Response<T> = Result<T, PostServiceError>;

pub trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, reqwest::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| PostServiceError::ReqwestError {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, serde_json::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| PostServiceError::SerdeJsonError {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, url::ParseError> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| PostServiceError::UrlError {
            source: e,
            message: message.to_string(),
        })
    }
}
