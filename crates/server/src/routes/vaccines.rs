use axum::{extract::State, http::StatusCode, Json};
use service::registry::model::{NewVaccine, Vaccine};
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(get, path = "/vaccines", tag = "vaccines", responses((status = 200, description = "OK")))]
pub async fn list_vaccines(State(state): State<AppState>) -> Json<Vec<Vaccine>> {
    Json(state.registry.list_vaccines().await)
}

#[utoipa::path(
    post, path = "/vaccines", tag = "vaccines",
    request_body = crate::openapi::NewVaccineDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn add_vaccine(
    State(state): State<AppState>,
    Json(input): Json<NewVaccine>,
) -> Result<(StatusCode, Json<Vaccine>), JsonApiError> {
    let vaccine = state.registry.add_vaccine(input).await?;
    info!(id = vaccine.id, name = %vaccine.name, "vaccine added");
    Ok((StatusCode::CREATED, Json(vaccine)))
}
