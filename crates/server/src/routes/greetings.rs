use axum::extract::{Path, State};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/greet/{id}", tag = "greetings",
    params(("id" = u32, Path, description = "Person id")),
    responses((status = 200, description = "Greeting text"), (status = 404, description = "Not Found"))
)]
pub async fn greet(State(state): State<AppState>, Path(id): Path<u32>) -> Result<String, JsonApiError> {
    Ok(state.greeter.greet(id).await?)
}

#[utoipa::path(
    get, path = "/goodbye/{id}", tag = "greetings",
    params(("id" = u32, Path, description = "Person id")),
    responses((status = 200, description = "Farewell text"), (status = 404, description = "Not Found"))
)]
pub async fn farewell(State(state): State<AppState>, Path(id): Path<u32>) -> Result<String, JsonApiError> {
    Ok(state.greeter.farewell(id).await?)
}
