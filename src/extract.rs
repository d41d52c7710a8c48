use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{error::AppError, validation::FieldErrors};

/// `axum::Json` whose rejections are rendered through `AppError`.
///
/// Syntax errors stay a `BadRequest`. A well-formed body whose fields have the wrong
/// type becomes `AppError::Validation`, one entry per offending field. Request payloads
/// keep every field optional, so each field can be checked on its own.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<Value>::from_request(req, state).await?;
        match T::deserialize(&value) {
            Ok(payload) => Ok(AppJson(payload)),
            Err(err) => Err(type_errors::<T>(&value)
                .unwrap_or_else(|| AppError::BadRequest(err.to_string()))),
        }
    }
}

fn type_errors<T: DeserializeOwned>(value: &Value) -> Option<AppError> {
    let object = value.as_object()?;
    let mut errors = FieldErrors::new();
    for (field, field_value) in object {
        let single = Value::Object(Map::from_iter([(field.clone(), field_value.clone())]));
        if let Err(err) = T::deserialize(&single) {
            errors.add(field, err.to_string());
        }
    }
    (!errors.is_empty()).then_some(AppError::Validation(errors))
}
