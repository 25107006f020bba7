use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use schedulify_auth::{SessionManager, SessionUser};
use schedulify_db::{
    init_schema, DbClient, NewSchedule, Repositories, ScheduleAggregate,
    ScheduleAggregateRepository, User, UserRepository,
};
use schedulify_schedules::{routes, ScheduleState};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    repos: Repositories,
    cookie: String,
}

async fn app() -> TestApp {
    let db_client = DbClient::from_url("sqlite::memory:").await.unwrap();
    init_schema(&db_client).await.unwrap();
    let sessions =
        SessionManager::from_secret(b"schedule-route-tests-secret-0123456789", false).unwrap();
    let cookie = sessions
        .request_cookie(&SessionUser {
            id: 1,
            username: "alice".to_string(),
        })
        .unwrap();

    TestApp {
        router: routes(ScheduleState::new(sessions, db_client.clone())),
        repos: Repositories::new(db_client),
        cookie,
    }
}

async fn seed_schedule(repos: &Repositories, name: &str) -> ScheduleAggregate {
    repos.users.upsert(User::new(1, "alice")).await.unwrap();
    repos
        .aggregates
        .create_schedule_aggregate(
            NewSchedule {
                schedule_name: name.to_string(),
                memo: String::new(),
                created_by: 1,
            },
            vec!["候補A".to_string(), "候補B".to_string()],
        )
        .await
        .unwrap()
}

fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn creating_a_schedule_requires_login() {
    let app = app().await;
    let response = app
        .router
        .oneshot(form_post("/schedules", None, "scheduleName=x&memo=&candidates=a"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn new_schedule_form_requires_login() {
    let app = app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/schedules/new").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = app
        .router
        .oneshot(
            Request::get("/schedules/new")
                .header(header::COOKIE, &app.cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("name=\"scheduleName\""));
}

#[tokio::test]
async fn unknown_schedule_is_not_found() {
    let app = app().await;
    let response = app
        .router
        .oneshot(
            Request::get("/schedules/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_availability_code_is_rejected() {
    let app = app().await;
    let created = seed_schedule(&app.repos, "plan").await;
    let uri = format!(
        "/schedules/{}/users/1/candidates/{}",
        created.schedule.schedule_id, created.candidates[0].candidate_id
    );

    for body in ["availability=3", "availability=-1", "availability=yes"] {
        let response = app
            .router
            .clone()
            .oneshot(form_post(&uri, Some(&app.cookie), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn invalid_json_availability_is_rejected() {
    let app = app().await;
    let created = seed_schedule(&app.repos, "plan").await;
    let uri = format!(
        "/schedules/{}/users/1/candidates/{}",
        created.schedule.schedule_id, created.candidates[0].candidate_id
    );

    for body in [r#"{"availability":3}"#, r#"{"availability":"yes"}"#, r#"{"availability":1.5}"#] {
        let request = Request::post(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &app.cookie)
            .body(Body::from(body))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error(), "{}", body);
    }
}

#[tokio::test]
async fn candidate_of_another_schedule_is_not_found() {
    let app = app().await;
    let first = seed_schedule(&app.repos, "first").await;
    let second = seed_schedule(&app.repos, "second").await;
    let uri = format!(
        "/schedules/{}/users/1/candidates/{}",
        first.schedule.schedule_id, second.candidates[0].candidate_id
    );

    let response = app
        .router
        .oneshot(form_post(&uri, Some(&app.cookie), "availability=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn top_page_lists_own_schedules() {
    let app = app().await;
    seed_schedule(&app.repos, "週末の飲み会").await;

    let response = app
        .router
        .oneshot(
            Request::get("/")
                .header(header::COOKIE, &app.cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("週末の飲み会"));
}
