mod admin;
mod error;
mod middleware;
mod public;

pub use admin::{AdminState, build_admin_router};
pub use error::{ApiError, ApiErrorBody, ApiErrorMessage, codes};
pub use middleware::{REQUEST_ID_HEADER, RequestContext};
pub use public::{PublicState, build_public_router};

use crate::application::error::ErrorReport;
use crate::domain::entities::ProductRecord;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cellar_api_types::ProductResponse;
use sqlx::Error as SqlxError;

fn db_health_response(result: Result<(), SqlxError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

fn product_to_api(record: ProductRecord) -> ProductResponse {
    ProductResponse {
        id: record.id,
        name: record.name,
        wine_type: record.wine_type,
        region: record.region,
        vintage: record.vintage,
        price: record.price,
        alcohol: record.alcohol,
        stock: record.stock,
        description: record.description,
        image_url: record.image_url,
    }
}
