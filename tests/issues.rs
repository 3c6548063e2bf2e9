mod common;

use serde_json::json;
use tower::ServiceExt;

use crate::common::*;

/// Set up a project with one imported script and one open issue against it.
/// Returns (user cookie, project id, script id, issue id).
async fn setup_open_issue(app: &axum::Router) -> (String, String, String, String) {
    let admin = admin_cookie(app).await;
    let folder = create_folder(app, &admin, "Login", None).await;
    let script = create_script(app, &admin, "S-100", folder["id"].as_str().unwrap()).await;

    let user = user_cookie(app).await;
    let project = create_project(app, &user, "Q1").await;
    let project_id = project["id"].as_str().unwrap().to_string();
    let script_id = script["id"].as_str().unwrap().to_string();
    import_script(app, &user, &project_id, &script_id).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/projects/{}/scripts/{}/issues", project_id, script_id),
            Some(&user),
            json!({ "title": "Broken layout", "description": "details" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    let body = body_json(response).await;
    let issue_id = body["issue_id"].as_str().unwrap().to_string();

    (user, project_id, script_id, issue_id)
}

#[tokio::test]
async fn relinking_the_same_issue_keeps_issue_ids_unique() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, project_id, script_id, issue_id) = setup_open_issue(&app).await;

    // Raise the same existing issue against the script a second time.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/projects/{}/scripts/{}/issues", project_id, script_id),
            Some(&user),
            json!({ "issue_id": issue_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    let body = body_json(response).await;

    let ids = body["script"]["issue_ids"].as_array().unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0], json!(issue_id));

    // No second issue record was created and no number was consumed by the
    // relink.
    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/api/projects/{}/issues", project_id),
            Some(&user),
        ))
        .await
        .unwrap();
    let log = body_json(response).await;
    assert_eq!(log["issues"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn linking_an_issue_from_another_project_is_rejected() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, _project_id, script_id, issue_id) = setup_open_issue(&app).await;

    // A second project importing the same script cannot link the first
    // project's issue.
    let other = create_project(&app, &user, "Q2").await;
    let other_id = other["id"].as_str().unwrap();
    import_script(&app, &user, other_id, &script_id).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/projects/{}/scripts/{}/issues", other_id, script_id),
            Some(&user),
            json!({ "issue_id": issue_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn raise_issue_requires_a_link_or_a_title() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, project_id, script_id, _issue_id) = setup_open_issue(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/projects/{}/scripts/{}/issues", project_id, script_id),
            Some(&user),
            json!({ "remarks": "no issue named" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fix_and_reopen_cycle() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, _project_id, _script_id, issue_id) = setup_open_issue(&app).await;

    let fix_uri = format!("/api/issues/{}/fix", issue_id);
    let reopen_uri = format!("/api/issues/{}/reopen", issue_id);

    let response = app
        .clone()
        .oneshot(empty_request("POST", &fix_uri, Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "fixed");

    let response = app
        .clone()
        .oneshot(empty_request("POST", &reopen_uri, Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "reopened");

    // The cycle repeats: a reopened issue can be fixed again.
    let response = app
        .clone()
        .oneshot(empty_request("POST", &fix_uri, Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "fixed");
}

#[tokio::test]
async fn illegal_issue_transitions_are_rejected() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, _project_id, _script_id, issue_id) = setup_open_issue(&app).await;

    // An open issue cannot be reopened.
    let response = app
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/api/issues/{}/reopen", issue_id),
            Some(&user),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);

    // A fixed issue cannot be fixed again.
    let fix_uri = format!("/api/issues/{}/fix", issue_id);
    let response = app
        .clone()
        .oneshot(empty_request("POST", &fix_uri, Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);

    let response = app
        .oneshot(empty_request("POST", &fix_uri, Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fixing_an_unknown_issue_is_not_found() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let user = user_cookie(&app).await;

    let response = app
        .oneshot(empty_request("POST", "/api/issues/missing/fix", Some(&user)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn issue_log_reports_status_counts() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let (user, project_id, script_id, first_issue) = setup_open_issue(&app).await;

    // Two more issues; fix one of them, fix-and-reopen the first.
    let issues_uri = format!("/api/projects/{}/scripts/{}/issues", project_id, script_id);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &issues_uri,
            Some(&user),
            json!({ "title": "Second" }),
        ))
        .await
        .unwrap();
    let second_issue = body_json(response).await["issue_id"]
        .as_str()
        .unwrap()
        .to_string();
    app.clone()
        .oneshot(json_request(
            "POST",
            &issues_uri,
            Some(&user),
            json!({ "title": "Third" }),
        ))
        .await
        .unwrap();

    for uri in [
        format!("/api/issues/{}/fix", second_issue),
        format!("/api/issues/{}/fix", first_issue),
        format!("/api/issues/{}/reopen", first_issue),
    ] {
        let response = app
            .clone()
            .oneshot(empty_request("POST", &uri, Some(&user)))
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/api/projects/{}/issues", project_id),
            Some(&user),
        ))
        .await
        .unwrap();
    let log = body_json(response).await;
    assert_eq!(log["stats"]["open"], 1);
    assert_eq!(log["stats"]["fixed"], 1);
    assert_eq!(log["stats"]["reopened"], 1);
    assert_eq!(log["issues"].as_array().unwrap().len(), 3);
}
