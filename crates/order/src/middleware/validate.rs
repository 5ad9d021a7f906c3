use crate::domain::requests::order::{OrderFields, OrderForm};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use shared::errors::HttpError;

/// JSON body extractor that only yields orders which passed the validation gate.
pub struct ValidatedOrder(pub OrderFields);

impl<S> FromRequest<S> for ValidatedOrder
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(form) = Json::<OrderForm>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        form.validate_order()
            .map(Self)
            .map_err(HttpError::Validation)
    }
}
