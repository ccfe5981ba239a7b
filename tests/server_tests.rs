use actix_web::{test, web, App};
use gradeshift::algorithm::BackendKind;
use gradeshift::config::PolicyConfig;
use gradeshift::server::{configure, AppState};
use gradeshift::{Catalog, Course};
use serde_json::Value;

fn course(id: &str, title: &str, period: i32, prereq: &str, weight: f64, slot: &str) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        period,
        credits: 4.0,
        prerequisites: prereq.to_string(),
        weight,
        schedule: slot.to_string(),
        completed: false,
    }
}

fn state() -> web::Data<AppState> {
    let catalog = Catalog::new(vec![
        course("1", "A", 1, "", 5.0, "mon9"),
        course("2", "B", 1, "A", 3.0, "mon9"),
        course("3", "C", 2, "", 2.0, "tue10"),
    ]);
    web::Data::new(AppState::new(catalog, PolicyConfig::default(), BackendKind::BranchAndBound, None))
}

#[actix_web::test]
async fn optimize_returns_ordered_grade() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/optimize").set_payload(r#"{"completed": {}}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["objective"], 7.0);
    let titles: Vec<&str> = body["courses"].as_array().unwrap().iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[actix_web::test]
async fn empty_candidate_set_is_unprocessable() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/optimize")
        .set_payload(r#"{"completed_ids": ["1", "2", "3"]}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "empty_candidate_set");
}

#[actix_web::test]
async fn infeasible_policy_window_is_unprocessable() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/optimize")
        .set_payload(r#"{"policy": {"min_courses": 3}}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "infeasible");
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/optimize").set_payload("{not json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn csv_export_has_header_and_rows() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/optimize/csv").set_payload("").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let bytes = test::read_body(resp).await;
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["title,period,weight,schedule", "A,1,5,mon9", "C,2,2,tue10"]);
}

#[actix_web::test]
async fn catalog_is_grouped_by_period() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::get().uri("/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 3);
    let periods = body["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0]["period"], 1);
    assert_eq!(periods[0]["courses"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn runs_without_audit_db_is_unavailable() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::get().uri("/runs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);
}
