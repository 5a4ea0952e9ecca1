use axum::Json;
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPersonDoc {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct NewVaccineDoc {
    pub name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::people::list_people,
        crate::routes::people::get_person,
        crate::routes::people::add_person,
        crate::routes::people::link_vaccine,
        crate::routes::vaccines::list_vaccines,
        crate::routes::vaccines::add_vaccine,
        crate::routes::greetings::greet,
        crate::routes::greetings::farewell,
    ),
    components(schemas(NewPersonDoc, NewVaccineDoc)),
    tags(
        (name = "health"),
        (name = "people"),
        (name = "vaccines"),
        (name = "greetings")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
