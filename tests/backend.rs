use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shikkha_admission::backend::{BackendApi, BackendError, BackendOptions, HttpBackend};
use shikkha_admission::domain::submission::{PayloadValue, SubmissionPayload};
use shikkha_admission::models::config::{ContactConfig, SiteEnv};

fn backend(server: &MockServer, contact: Option<ContactConfig>) -> HttpBackend {
    let site = SiteEnv::new(&server.uri(), "23017").unwrap();
    HttpBackend::new(
        site,
        BackendOptions {
            settings_path: "/site-settings/".to_string(),
            timeout: Duration::from_secs(5),
            contact,
        },
    )
    .unwrap()
}

#[actix_web::test]
async fn list_courses_sends_site_header_and_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/"))
        .and(query_param("page_size", "100"))
        .and(header("Site-Id", "23017"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "results": [
                {"id": 3, "title": "Graphic Design", "fee": 5000},
                {"id": 5, "title": null},
                {"id": 4, "title": "Web Development"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let courses = backend(&server, None).list_courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[1].title, "Web Development");
}

#[actix_web::test]
async fn list_courses_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = backend(&server, None).list_courses().await.unwrap_err();

    assert!(matches!(err, BackendError::Status(500)));
}

#[actix_web::test]
async fn site_settings_unwraps_results_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-settings/"))
        .and(header("Site-Id", "23017"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"button_color": "#0055AA", "primary_color": "#F0F0F0"}]
        })))
        .mount(&server)
        .await;

    let theme = backend(&server, None)
        .site_settings()
        .await
        .unwrap()
        .theme();

    assert_eq!(theme.button_color, "#0055AA");
    assert_eq!(theme.primary_color, "#F0F0F0");
}

#[actix_web::test]
async fn submit_student_posts_multipart_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students/"))
        .and(header("Site-Id", "23017"))
        .and(body_string_contains("name=\"site_id\""))
        .and(body_string_contains("name=\"father_name\""))
        .and(body_string_contains("name=\"courses\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"results": [{"id": 9}]})))
        .expect(1)
        .mount(&server)
        .await;

    let mut payload = SubmissionPayload::new();
    payload.push("site_id", PayloadValue::Integer(23017));
    payload.push("name", PayloadValue::Text("Rahim".to_string()));
    payload.push("father_name", PayloadValue::Text("Karim".to_string()));
    payload.push("courses", PayloadValue::Integer(4));

    let response = backend(&server, None)
        .submit_student(payload)
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.results_len(), Some(1));
}

#[actix_web::test]
async fn submit_student_returns_rejections_as_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid mobile"})),
        )
        .mount(&server)
        .await;

    let response = backend(&server, None)
        .submit_student(SubmissionPayload::new())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("Invalid mobile"));
}

#[actix_web::test]
async fn submit_student_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = backend(&server, None)
        .submit_student(SubmissionPayload::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Decode(_)));
}

#[actix_web::test]
async fn send_contact_adds_access_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(body_string_contains("name=\"access_key\""))
        .and(body_string_contains("secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let contact = ContactConfig {
        endpoint: format!("{}/submit", server.uri()),
        access_key: "secret-key".to_string(),
    };
    let reply = backend(&server, Some(contact))
        .send_contact(vec![("name", "Rahim".to_string())])
        .await
        .unwrap();

    assert!(reply.success);
}

#[actix_web::test]
async fn send_contact_requires_configuration() {
    let server = MockServer::start().await;

    let err = backend(&server, None)
        .send_contact(Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotConfigured));
}
