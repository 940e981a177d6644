use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};
use shared::models::{
    merge_person_location, ContactForm, Greeting, LoginForm, LoginOut, Person, PersonIdPath,
    PersonOut, PersonQuery, UpdatePersonRequest,
};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    validation::{ValidatedForm, ValidatedJson, ValidatedPath, ValidatedQuery},
};

const ADS_COOKIE: &str = "ads";

pub async fn home() -> Json<Greeting> {
    Json(Greeting::default())
}

/// POST /person/new
pub async fn create_person(
    ValidatedJson(person): ValidatedJson<Person>,
) -> (StatusCode, Json<PersonOut>) {
    tracing::info!(first_name = %person.first_name, age = person.age, "person created");
    (StatusCode::CREATED, Json(PersonOut::from(person)))
}

/// GET /person/detail?name=&age=
pub async fn show_person_by_query(
    ValidatedQuery(query): ValidatedQuery<PersonQuery>,
) -> Json<PersonQuery> {
    Json(query)
}

/// GET /person/detail/:person_id
pub async fn show_person_by_id(
    ValidatedPath(PersonIdPath { person_id }): ValidatedPath<PersonIdPath>,
) -> Json<Map<String, Value>> {
    let mut body = Map::new();
    body.insert(person_id.to_string(), Value::from("It exists!"));
    Json(body)
}

/// PUT /person/:person_id
pub async fn update_person(
    ValidatedPath(PersonIdPath { person_id }): ValidatedPath<PersonIdPath>,
    ValidatedJson(req): ValidatedJson<UpdatePersonRequest>,
) -> ApiResult<Json<Map<String, Value>>> {
    let person = PersonOut::from(req.person);
    let merged = merge_person_location(&person, &req.location)?;
    tracing::info!(person_id, fields = merged.len(), "person updated");
    Ok(Json(merged))
}

/// POST /login
pub async fn login(ValidatedForm(form): ValidatedForm<LoginForm>) -> Json<LoginOut> {
    tracing::info!(username = %form.username, "login");
    Json(LoginOut::from(form))
}

/// POST /contact
pub async fn contact(
    headers: HeaderMap,
    ValidatedForm(form): ValidatedForm<ContactForm>,
) -> Json<Option<String>> {
    // Non-ASCII bytes are kept (lossily decoded) rather than dropped
    let user_agent = headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let ads = cookie_value(&headers, ADS_COOKIE);

    tracing::debug!(
        email = %form.email,
        ads = ads.as_deref().unwrap_or("-"),
        "contact message received"
    );

    Json(user_agent)
}

/// Look up one cookie by name across all `Cookie` headers
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime = state.started_at.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime,
    }))
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::gather_metrics(&state.registry);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
