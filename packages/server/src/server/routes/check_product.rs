//! POST /check-product
//!
//! Body `{"url": "..."}`. Responds 200 with a classification on every path
//! that reaches the completion service, including completion failures.

use axum::{extract::rejection::JsonRejection, extract::Extension, Json};

use crate::domains::classification::{check_product, ClassificationRequest, ClassificationResult};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

pub async fn check_product_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(request) = payload?;

    if request.url.trim().is_empty() {
        return Err(ApiError::Validation("url must not be empty".to_string()));
    }

    tracing::debug!(url = %request.url, "Checking product");

    Ok(Json(check_product(&request.url, &state.deps).await))
}
