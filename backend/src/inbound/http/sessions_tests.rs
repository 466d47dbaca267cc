//! Tests for session HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::SessionParts;
use crate::inbound::http::test_utils::{TestPorts, bearer, fixture_timestamp, test_principal};

fn session(id: i64, participants: &[i64]) -> Session {
    Session::new(SessionParts {
        id: SessionId::new(id),
        details: SessionDraft {
            name: SessionName::new("Yoga").expect("valid name"),
            description: SessionDescription::new("Morning flow").expect("valid description"),
            date: fixture_timestamp(),
            teacher_id: TeacherId::new(1),
        },
        participants: participants.iter().copied().map(UserId::new).collect(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    })
}

fn authenticated() -> TestPorts {
    TestPorts::authenticated(test_principal(1, "yoga@studio.com"))
}

async fn send(ports: TestPorts, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new().app_data(ports.into_state()).service(
            web::scope("/api/session")
                .service(list_sessions)
                .service(create_session)
                .service(get_session)
                .service(update_session)
                .service(delete_session)
                .service(participate)
                .service(no_longer_participate),
        ),
    )
    .await;
    let res = test::call_service(&app, request.insert_header(bearer()).to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[actix_web::test]
async fn get_renders_session_dto() {
    let mut ports = authenticated();
    ports
        .sessions_query
        .expect_get()
        .with(eq(SessionId::new(4)))
        .returning(|_| Ok(session(4, &[2, 9])));

    let (status, body) = send(ports, test::TestRequest::get().uri("/api/session/4")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 4);
    assert_eq!(body["name"], "Yoga");
    assert_eq!(body["teacher_id"], 1);
    assert_eq!(body["users"], json!([2, 9]));
    assert_eq!(body["date"], "2026-02-01T09:00:00+00:00");
    assert!(body.get("createdAt").is_some());
}

#[rstest]
#[case("/api/session/abc")]
#[case("/api/session/4x")]
#[actix_web::test]
async fn non_numeric_ids_are_malformed(#[case] uri: &str) {
    let mut ports = authenticated();
    ports.sessions_query.expect_get().times(0);

    let (status, body) = send(ports, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "malformed_request");
}

#[actix_web::test]
async fn missing_session_is_404() {
    let mut ports = authenticated();
    ports
        .sessions_query
        .expect_get()
        .returning(|id| Err(Error::not_found(format!("session {id} not found"))));

    let (status, body) = send(ports, test::TestRequest::get().uri("/api/session/77")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn create_ignores_client_supplied_participants() {
    let mut ports = authenticated();
    ports
        .sessions
        .expect_create()
        .withf(|draft: &SessionDraft| {
            draft.name.as_ref() == "Yoga" && draft.teacher_id == TeacherId::new(1)
        })
        .times(1)
        .returning(|_| Ok(session(5, &[])));

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri("/api/session").set_json(json!({
            "name": "Yoga",
            "date": "2026-02-01T09:00:00Z",
            "teacher_id": 1,
            "description": "Morning flow",
            "users": [3, 4],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 5);
    assert_eq!(body["users"], json!([]));
}

#[rstest]
#[case(json!({"date": "2026-02-01T09:00:00Z", "teacher_id": 1}), "name")]
#[case(json!({"name": "  ", "date": "2026-02-01T09:00:00Z", "teacher_id": 1}), "name")]
#[case(json!({"name": "Yoga", "teacher_id": 1}), "date")]
#[case(json!({"name": "Yoga", "date": "soon", "teacher_id": 1}), "date")]
#[case(json!({"name": "Yoga", "date": "2026-02-01T09:00:00Z"}), "teacher_id")]
#[actix_web::test]
async fn create_validates_payload(#[case] payload: Value, #[case] field: &str) {
    let mut ports = authenticated();
    ports.sessions.expect_create().times(0);

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri("/api/session").set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn update_passes_id_and_draft() {
    let mut ports = authenticated();
    ports
        .sessions
        .expect_update()
        .withf(|id: &SessionId, draft: &SessionDraft| {
            *id == SessionId::new(4) && draft.name.as_ref() == "Hatha"
        })
        .returning(|_, _| Ok(session(4, &[2])));

    let (status, body) = send(
        ports,
        test::TestRequest::put().uri("/api/session/4").set_json(json!({
            "name": "Hatha",
            "date": "2026-02-01T09:00:00Z",
            "teacher_id": 1,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!([2]));
}

#[actix_web::test]
async fn delete_returns_empty_ok() {
    let mut ports = authenticated();
    ports
        .sessions
        .expect_delete()
        .with(eq(SessionId::new(4)))
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = send(ports, test::TestRequest::delete().uri("/api/session/4")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn participate_forwards_both_ids() {
    let mut ports = authenticated();
    ports
        .sessions
        .expect_participate()
        .with(eq(SessionId::new(4)), eq(UserId::new(9)))
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, _) = send(
        ports,
        test::TestRequest::post().uri("/api/session/4/participate/9"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn duplicate_participation_is_400() {
    let mut ports = authenticated();
    ports.sessions.expect_participate().returning(|_, _| {
        Err(Error::invalid_request(
            "user 9 is already participating in session 4",
        ))
    });

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri("/api/session/4/participate/9"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case("/api/session/x/participate/9", "id")]
#[case("/api/session/4/participate/nine", "userId")]
#[actix_web::test]
async fn membership_ids_must_be_numeric(#[case] uri: &str, #[case] field: &str) {
    let mut ports = authenticated();
    ports.sessions.expect_no_longer_participate().times(0);

    let (status, body) = send(ports, test::TestRequest::delete().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn leaving_maps_service_errors() {
    let mut ports = authenticated();
    ports
        .sessions
        .expect_no_longer_participate()
        .with(eq(SessionId::new(4)), eq(UserId::new(9)))
        .returning(|_, _| Err(Error::not_found("session 4 not found")));

    let (status, body) = send(
        ports,
        test::TestRequest::delete().uri("/api/session/4/participate/9"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn unauthenticated_calls_never_reach_the_engine() {
    let mut ports = TestPorts::new();
    ports.sessions.expect_participate().times(0);
    let app = test::init_service(
        App::new()
            .app_data(ports.into_state())
            .service(web::scope("/api/session").service(participate)),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/session/4/participate/9")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "authentication_failed");
}
