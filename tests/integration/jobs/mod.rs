//! Jobs domain integration tests
//!
//! Every test tags its job titles with a unique suffix and filters listings
//! by that tag, so tests can share one database.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{
    assertions, job_body, parse_body, request, unique_suffix, TestApp, UserFixture,
};

/// Helper: post a job and return the parsed response
async fn post_job(app: &TestApp, user: &UserFixture, body: Value) -> (StatusCode, Value) {
    let resp = app
        .test_router()
        .oneshot(request(
            Method::POST,
            "/v1/jobs",
            Some(&user.jwt_token),
            Some(body),
        ))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

/// Helper: send a bodiless authenticated request
async fn send(app: &TestApp, method: Method, uri: &str, user: &UserFixture) -> (StatusCode, Value) {
    let resp = app
        .test_router()
        .oneshot(request(method, uri, Some(&user.jwt_token), None))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

fn ids(list: &Value) -> Vec<i64> {
    list["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_i64().unwrap())
        .collect()
}

mod test_job_creation {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_create_job_round_trips_fields() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let title = format!("Round trip {}", unique_suffix());

        let (status, created) = post_job(&app, &poster, job_body(&title)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["user_id"], poster.user.id);
        assert_eq!(created["is_new"], true);
        assert_eq!(created["is_claimed"], false);
        assert_eq!(created["is_verified"], false);
        assert_eq!(created["is_protected"], true);
        assert_eq!(created["is_escrow"], false);

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/v1/jobs/{id}"), &poster).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        assert_eq!(fetched["title"], title.as_str());
        assert_eq!(fetched["truck_size"], "medium");
        assert_eq!(fetched["payout"], "850.00");
        assert_eq!(fetched["start_date"], "2030-05-01T09:00:00Z");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_end_before_start_is_rejected() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();

        let mut body = job_body("Backwards");
        body["end_date"] = json!("2030-04-30T09:00:00Z");
        let (status, err) = post_job(&app, &poster, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&err, "VALIDATION_ERROR");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_truck_size_is_rejected() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();

        let mut body = job_body("Huge truck");
        body["truck_size"] = json!("huge");
        let (status, _) = post_job(&app, &poster, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod test_listing {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_available_jobs_exclude_claimed_newest_first() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let mover = app.create_test_user().await.unwrap();
        let tag = unique_suffix();

        let mut created = Vec::new();
        for i in 0..3 {
            let (_, job) = post_job(&app, &poster, job_body(&format!("List {tag} #{i}"))).await;
            created.push(job["id"].as_i64().unwrap());
        }
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/v1/jobs/{}/claim", created[1]),
            &mover,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = send(&app, Method::GET, &format!("/v1/jobs?query={tag}"), &mover).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&list), vec![created[2], created[0]]);
        assert_eq!(list["total"], 2);
        assert_eq!(list["page"], 1);
        assert_eq!(list["page_size"], 10);
        assert_eq!(list["total_pages"], 1);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_filters_combine_conjunctively() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let tag = unique_suffix();

        let mut large_far = job_body(&format!("Filter {tag} a"));
        large_far["truck_size"] = json!("large");
        large_far["distance"] = json!(800.0);
        let (_, large_far) = post_job(&app, &poster, large_far).await;

        let mut large_near = job_body(&format!("Filter {tag} b"));
        large_near["truck_size"] = json!("large");
        large_near["distance"] = json!(20.0);
        post_job(&app, &poster, large_near).await;

        let mut small_far = job_body(&format!("Filter {tag} c"));
        small_far["truck_size"] = json!("small");
        small_far["distance"] = json!(800.0);
        post_job(&app, &poster, small_far).await;

        let uri = format!("/v1/jobs?query={tag}&truck_sizes=large,medium&min_distance=500");
        let (status, list) = send(&app, Method::GET, &uri, &poster).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&list), vec![large_far["id"].as_i64().unwrap()]);
        assert_eq!(list["total"], 1);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_payout_and_date_bounds() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let tag = unique_suffix();

        let mut cheap = job_body(&format!("Bounds {tag} cheap"));
        cheap["payout"] = json!("100.00");
        post_job(&app, &poster, cheap).await;

        let mut late = job_body(&format!("Bounds {tag} late"));
        late["start_date"] = json!("2031-01-01T09:00:00Z");
        late["end_date"] = json!("2031-01-02T09:00:00Z");
        post_job(&app, &poster, late).await;

        let (_, fits) = post_job(&app, &poster, job_body(&format!("Bounds {tag} fits"))).await;

        let uri = format!(
            "/v1/jobs?query={tag}&min_payout=500&max_payout=1000&end_date=2030-12-31T00:00:00Z"
        );
        let (_, list) = send(&app, Method::GET, &uri, &poster).await;
        assert_eq!(ids(&list), vec![fits["id"].as_i64().unwrap()]);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_malformed_params_are_ignored() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let tag = unique_suffix();
        post_job(&app, &poster, job_body(&format!("Lenient {tag}"))).await;

        let uri = format!(
            "/v1/jobs?query={tag}&min_distance=far&start_date=tomorrow&page=-1&page_size=zero"
        );
        let (status, list) = send(&app, Method::GET, &uri, &poster).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["total"], 1);
        assert_eq!(list["page"], 1);
        assert_eq!(list["page_size"], 10);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_pagination_total_ignores_page() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let tag = unique_suffix();
        for i in 0..5 {
            post_job(&app, &poster, job_body(&format!("Paged {tag} {i}"))).await;
        }

        let uri = format!("/v1/jobs?query={tag}&page=3&page_size=2");
        let (_, list) = send(&app, Method::GET, &uri, &poster).await;
        assert_eq!(ids(&list).len(), 1);
        assert_eq!(list["total"], 5);
        assert_eq!(list["total_pages"], 3);

        let uri = format!("/v1/jobs?query={tag}&page=4&page_size=2");
        let (_, list) = send(&app, Method::GET, &uri, &poster).await;
        assert!(ids(&list).is_empty());
        assert_eq!(list["total"], 5);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_mine_and_claimed_listings() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let mover = app.create_test_user().await.unwrap();

        let (_, a) = post_job(&app, &poster, job_body("Mine a")).await;
        let (_, b) = post_job(&app, &poster, job_body("Mine b")).await;
        let a = a["id"].as_i64().unwrap();
        let b = b["id"].as_i64().unwrap();

        let (_, mine) = send(&app, Method::GET, "/v1/jobs/mine", &poster).await;
        assert_eq!(ids(&mine), vec![b, a]);
        assert_eq!(mine["total"], 2);

        send(&app, Method::POST, &format!("/v1/jobs/{a}/claim"), &mover).await;
        send(&app, Method::POST, &format!("/v1/jobs/{b}/claim"), &mover).await;

        let (_, claimed) = send(&app, Method::GET, "/v1/jobs/claimed?page_size=1", &mover).await;
        assert_eq!(ids(&claimed), vec![b]);
        assert_eq!(claimed["total"], 2);
        assert!(claimed["jobs"][0]["is_claimed"].as_bool().unwrap());

        let (_, none) = send(&app, Method::GET, "/v1/jobs/claimed", &poster).await;
        assert_eq!(none["total"], 0);
    }
}

mod test_claims {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_claim_then_second_claim_conflicts() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let first = app.create_test_user().await.unwrap();
        let second = app.create_test_user().await.unwrap();
        let (_, job) = post_job(&app, &poster, job_body("Claim me")).await;
        let id = job["id"].as_i64().unwrap();

        let (status, claim) = send(&app, Method::POST, &format!("/v1/jobs/{id}/claim"), &first).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(claim["job_id"], id);
        assert_eq!(claim["user_id"], first.user.id);
        assert_eq!(claim["status"], "pending");

        let (status, err) = send(&app, Method::POST, &format!("/v1/jobs/{id}/claim"), &second).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assertions::assert_error_code(&err, "CONFLICT");

        assert_eq!(app.claim_rows(id).await.unwrap(), 1);
        assert_eq!(app.is_claimed(id).await.unwrap(), Some(true));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_claim_missing_job_is_not_found() {
        let app = TestApp::new().await.unwrap();
        let mover = app.create_test_user().await.unwrap();

        let (status, err) = send(&app, Method::POST, "/v1/jobs/9223372036854775807/claim", &mover).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assertions::assert_error_code(&err, "NOT_FOUND");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_cancel_claim_reopens_job() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let mover = app.create_test_user().await.unwrap();
        let other = app.create_test_user().await.unwrap();
        let (_, job) = post_job(&app, &poster, job_body("Cancel me")).await;
        let id = job["id"].as_i64().unwrap();
        send(&app, Method::POST, &format!("/v1/jobs/{id}/claim"), &mover).await;

        // Someone else's claim cannot be cancelled
        let (status, _) = send(&app, Method::DELETE, &format!("/v1/jobs/{id}/claim"), &other).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.is_claimed(id).await.unwrap(), Some(true));

        let (status, _) = send(&app, Method::DELETE, &format!("/v1/jobs/{id}/claim"), &mover).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(app.claim_rows(id).await.unwrap(), 0);
        assert_eq!(app.is_claimed(id).await.unwrap(), Some(false));

        // A second cancel finds nothing and leaves the flag alone
        let (status, _) = send(&app, Method::DELETE, &format!("/v1/jobs/{id}/claim"), &mover).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.is_claimed(id).await.unwrap(), Some(false));
    }
}

mod test_deletion {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_delete_own_job_removes_it_and_its_claim() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let mover = app.create_test_user().await.unwrap();
        let tag = unique_suffix();
        let (_, job) = post_job(&app, &poster, job_body(&format!("Delete {tag}"))).await;
        let id = job["id"].as_i64().unwrap();
        send(&app, Method::POST, &format!("/v1/jobs/{id}/claim"), &mover).await;

        let (status, _) = send(&app, Method::DELETE, &format!("/v1/jobs/{id}"), &poster).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{id}"), &poster).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.claim_rows(id).await.unwrap(), 0);

        let (_, claimed) = send(&app, Method::GET, "/v1/jobs/claimed", &mover).await;
        assert_eq!(claimed["total"], 0);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_delete_by_other_user_is_not_found() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();
        let stranger = app.create_test_user().await.unwrap();
        let (_, job) = post_job(&app, &poster, job_body("Not yours")).await;
        let id = job["id"].as_i64().unwrap();

        let (status, _) = send(&app, Method::DELETE, &format!("/v1/jobs/{id}"), &stranger).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{id}"), &poster).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_delete_missing_job_is_not_found() {
        let app = TestApp::new().await.unwrap();
        let poster = app.create_test_user().await.unwrap();

        let (status, _) = send(&app, Method::DELETE, "/v1/jobs/9223372036854775807", &poster).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
