//! Extractors whose rejections are reported as `ActionResult` bodies like any
//! other failed action, instead of axum's plain-text defaults.

use crate::error::ApiError;
use axum::{
    Form,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use log::debug;
use models::error::RecordError;

/// [`Path`] that rejects malformed ids with `InvalidInput`
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("Rejected path {}: {}", parts.uri.path(), rejection.body_text());
                Err(RecordError::InvalidInput("Invalid id".to_string()).into())
            }
        }
    }
}

/// [`Query`] that rejects malformed parameters with `InvalidInput`
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| RecordError::InvalidInput(rejection.body_text()).into())
    }
}

/// [`Form`] that reports a missing content type or undecodable body as `InvalidInput`
pub struct ValidForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Form::<T>::from_request(req, state)
            .await
            .map(|Form(value)| Self(value))
            .map_err(|rejection| RecordError::InvalidInput(rejection.body_text()).into())
    }
}
