//! JSON body extractor that runs `validator` rules before the handler sees the value.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use torum_core::error::AppError;

use crate::error::ApiError;

/// Deserialized and validated JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe(&e)))?;

        Ok(Self(value))
    }
}

/// An absent body (no `Content-Type`) yields `None`; a present one must parse
/// and validate.
impl<S, T> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        match body {
            Some(Json(value)) => {
                value
                    .validate()
                    .map_err(|e| AppError::validation(describe(&e)))?;
                Ok(Some(Self(value)))
            }
            None => Ok(None),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Request body is too large").into()
    } else {
        AppError::validation(rejection.body_text()).into()
    }
}

/// Flattens field errors into one sorted, `; `-separated message.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_describe_lists_every_field() {
        let sample = Sample {
            name: String::new(),
            email: "nope".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(describe(&errors), "Name is required; email is invalid");
    }
}
