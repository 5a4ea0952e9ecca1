use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::errors::ServiceError;
use service::registry::model::{NewPerson, Person, PersonView};
use tracing::{info, warn};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(get, path = "/people", tag = "people", responses((status = 200, description = "All people with resolved vaccines")))]
pub async fn list_people(State(state): State<AppState>) -> Json<Vec<PersonView>> {
    Json(state.registry.list_people().await)
}

#[utoipa::path(
    get, path = "/people/{id}", tag = "people",
    params(("id" = u32, Path, description = "Person id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_person(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<PersonView>, JsonApiError> {
    Ok(Json(state.registry.get_person(id).await?))
}

#[utoipa::path(
    post, path = "/people", tag = "people",
    request_body = crate::openapi::NewPersonDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn add_person(
    State(state): State<AppState>,
    Json(input): Json<NewPerson>,
) -> Result<(StatusCode, Json<Person>), JsonApiError> {
    let person = state.registry.add_person(input).await?;
    info!(id = person.id, first_name = %person.first_name, "person added");
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    post, path = "/people/{id}/vaccines/{name}", tag = "people",
    params(
        ("id" = u32, Path, description = "Person id"),
        ("name" = String, Path, description = "Exact vaccine name")
    ),
    responses(
        (status = 200, description = "Linked"),
        (status = 404, description = "Unknown person or vaccine name")
    )
)]
pub async fn link_vaccine(
    State(state): State<AppState>,
    Path((id, name)): Path<(u32, String)>,
) -> Result<Json<PersonView>, JsonApiError> {
    let outcome = state.registry.link_vaccine(id, &name).await?;
    if !outcome.found {
        warn!(person_id = id, vaccine = %name, "link requested for unknown vaccine");
        return Err(ServiceError::VaccineNameNotFound(name).into());
    }
    info!(person_id = id, vaccine = %name, "vaccine linked");
    Ok(Json(outcome.person))
}
