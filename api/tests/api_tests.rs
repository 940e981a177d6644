// tests/api_tests.rs
//
// Router-level tests: every endpoint is driven through `api::app` with
// `tower::ServiceExt::oneshot`, no listener involved.

use api::config::AppConfig;
use api::observability::build_registry;
use api::state::AppState;
use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

fn app() -> Router {
    let registry = build_registry().unwrap();
    api::app(AppState::new(AppConfig::default(), registry))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn person_json() -> Value {
    json!({
        "first_name": "A",
        "last_name": "B",
        "age": 30,
        "email": "a@b.com",
        "password": "12345678"
    })
}

fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

// ─── Home ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_returns_greeting() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Hello": "World"}));
}

// ─── Create person ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_person_echoes_without_password() {
    let mut person = person_json();
    person["hair_color"] = json!("black");
    person["is_married"] = json!(true);
    person["web"] = json!("https://example.com");

    let (status, body) = send(app(), json_request("POST", "/person/new", person)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "first_name": "A",
            "last_name": "B",
            "age": 30,
            "hair_color": "black",
            "is_married": true,
            "email": "a@b.com",
            "web": "https://example.com"
        })
    );
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn create_person_rejects_age_out_of_range() {
    for age in [0, -4, 116] {
        let mut person = person_json();
        person["age"] = json!(age);

        let (status, body) = send(app(), json_request("POST", "/person/new", person)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "age {}", age);
        assert_eq!(body["error"], "ValidationError");
        assert_eq!(body["code"], 422);
        assert_eq!(error_fields(&body), vec!["age"]);
    }
}

#[tokio::test]
async fn create_person_lists_every_violation() {
    let body = json!({
        "first_name": "",
        "last_name": "B",
        "age": 200,
        "email": "not-an-email",
        "web": "nope",
        "password": "123"
    });

    let (status, body) = send(app(), json_request("POST", "/person/new", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_fields(&body),
        vec!["first_name", "age", "email", "web", "password"]
    );
}

#[tokio::test]
async fn create_person_rejects_unknown_hair_color() {
    let mut person = person_json();
    person["hair_color"] = json!("green");

    let (status, body) = send(app(), json_request("POST", "/person/new", person)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["hair_color"]);
    assert_eq!(
        body["errors"][0]["message"],
        "must be one of: white, brown, black, blonde, red"
    );
}

#[tokio::test]
async fn create_person_rejects_missing_field() {
    let mut person = person_json();
    person.as_object_mut().unwrap().remove("age");

    let (status, body) = send(app(), json_request("POST", "/person/new", person)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["age"]);
    assert_eq!(body["errors"][0]["message"], "field required");
}

#[tokio::test]
async fn create_person_lists_type_errors_with_constraint_errors() {
    let body = json!({
        "first_name": "",
        "last_name": "B",
        "age": 200,
        "hair_color": "green",
        "is_married": "sometimes",
        "password": "123"
    });

    let (status, body) = send(app(), json_request("POST", "/person/new", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let mut fields = error_fields(&body);
    fields.sort();
    assert_eq!(
        fields,
        vec!["age", "email", "first_name", "hair_color", "is_married", "password"]
    );
    assert_eq!(body["message"], "Validation failed for 6 fields");
}

#[tokio::test]
async fn create_person_reports_wrongly_typed_age_once() {
    let mut person = person_json();
    person["age"] = json!("thirty");
    person["email"] = json!("nope");

    let (status, body) = send(app(), json_request("POST", "/person/new", person)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["age", "email"]);
    assert_eq!(body["errors"][0]["message"], "must be an integer");
}

#[tokio::test]
async fn create_person_rejects_non_object_body() {
    let (status, body) = send(app(), json_request("POST", "/person/new", json!([1, 2]))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["body"]);
}

// ─── Show person ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn show_person_by_query_echoes_values() {
    let (status, body) = send(app(), get("/person/detail?name=Facundo%20Garcia&age=25")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "Facundo Garcia", "age": 25}));

    let (status, body) = send(app(), get("/person/detail")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": null, "age": null}));
}

#[tokio::test]
async fn show_person_by_query_rejects_bad_name_length() {
    let long = "n".repeat(51);
    for name in ["Facundo", long.as_str()] {
        let (status, body) = send(app(), get(&format!("/person/detail?name={}", name))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "name {}", name);
        assert_eq!(error_fields(&body), vec!["name"]);
    }
}

#[tokio::test]
async fn show_person_by_query_rejects_bad_age() {
    let (status, body) = send(app(), get("/person/detail?age=1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["age"]);

    let (status, body) = send(app(), get("/person/detail?name=Paco&age=old")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["age", "name"]);
}

#[tokio::test]
async fn show_person_by_id_confirms_existence() {
    let (status, body) = send(app(), get("/person/detail/124")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"124": "It exists!"}));
}

#[tokio::test]
async fn show_person_by_id_rejects_non_positive_or_non_numeric() {
    let (status, body) = send(app(), get("/person/detail/0")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["person_id"]);

    let (status, _) = send(app(), get("/person/detail/-3")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(app(), get("/person/detail/abc")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["person_id"]);
    assert_eq!(body["errors"][0]["message"], "must be an integer");
}

// ─── Update person ───────────────────────────────────────────────────────────

#[tokio::test]
async fn update_person_merges_person_and_location() {
    let body = json!({
        "person": person_json(),
        "location": {"city": "X", "state": "Y", "country": "Z"}
    });

    let (status, body) = send(app(), json_request("PUT", "/person/7", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "first_name": "A",
            "last_name": "B",
            "age": 30,
            "hair_color": null,
            "is_married": null,
            "email": "a@b.com",
            "web": null,
            "city": "X",
            "state": "Y",
            "country": "Z"
        })
    );
}

#[tokio::test]
async fn update_person_reports_nested_fields() {
    let mut person = person_json();
    person["password"] = json!("short");
    let body = json!({
        "person": person,
        "location": {"city": "X", "state": "Y", "country": "C".repeat(41)}
    });

    let (status, body) = send(app(), json_request("PUT", "/person/7", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["person.password", "location.country"]);
}

#[tokio::test]
async fn update_person_rejects_bad_id() {
    let body = json!({
        "person": person_json(),
        "location": {"city": "X", "state": "Y", "country": "Z"}
    });

    let (status, body) = send(app(), json_request("PUT", "/person/0", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["person_id"]);
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_username_only() {
    let (status, body) = send(
        app(),
        form_request("/login", "username=Paco2022&password=secret123"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "Paco2022"}));
}

#[tokio::test]
async fn login_rejects_missing_password_and_long_username() {
    let (status, body) = send(app(), form_request("/login", "username=Paco2022")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["password"]);

    let form = format!("username={}&password=secret123", "u".repeat(21));
    let (status, body) = send(app(), form_request("/login", &form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["username"]);
}

#[tokio::test]
async fn login_rejects_json_body() {
    let request = json_request(
        "POST",
        "/login",
        json!({"username": "Paco2022", "password": "secret123"}),
    );
    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

const CONTACT_FORM: &str = "first_name=Facundo&last_name=Garcia&email=facundo%40example.com\
&message=I%20would%20like%20more%20information";

#[tokio::test]
async fn contact_returns_user_agent() {
    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, FORM)
        .header(header::USER_AGENT, "curl/8.4.0")
        .header(header::COOKIE, "ads=enabled")
        .body(Body::from(CONTACT_FORM))
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("curl/8.4.0"));
}

#[tokio::test]
async fn contact_keeps_non_ascii_user_agent() {
    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, FORM)
        .header(
            header::USER_AGENT,
            HeaderValue::from_bytes("Navegador/1.0 (Español)".as_bytes()).unwrap(),
        )
        .body(Body::from(CONTACT_FORM))
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Navegador/1.0 (Español)"));
}

#[tokio::test]
async fn contact_without_user_agent_returns_null() {
    let (status, body) = send(app(), form_request("/contact", CONTACT_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn contact_rejects_short_message() {
    let form = "first_name=Facundo&last_name=Garcia&email=facundo%40example.com&message=hi";
    let (status, body) = send(app(), form_request("/contact", form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["message"]);
}

// ─── Ambient routes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn metrics_exposes_request_counters() {
    let app = app();
    let (status, _) = send(app.clone(), get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("person_api_http_requests_total"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(app(), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}
