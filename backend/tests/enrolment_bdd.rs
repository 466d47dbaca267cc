//! Behaviour tests for joining and leaving sessions over HTTP.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Each suite uses a different subset of the helpers.
#[allow(dead_code)]
#[path = "support/yoga_app.rs"]
mod yoga_app;

use std::collections::HashMap;
use std::future::Future;

use actix_web::http::Method;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use yoga_app::{LoggedIn, Reply, TestApp};

struct EnrolmentWorld {
    app: TestApp,
    members: HashMap<String, LoggedIn>,
    session: Option<i64>,
    last: Option<Reply>,
}

impl EnrolmentWorld {
    fn member(&self, name: &str) -> &LoggedIn {
        self.members
            .get(name)
            .unwrap_or_else(|| panic!("member {name} has not signed up"))
    }

    fn session(&self) -> i64 {
        self.session.expect("a session was created")
    }

    fn last(&self) -> &Reply {
        self.last.as_ref().expect("a request was sent")
    }

    fn participants(&self) -> serde_json::Value {
        let token = self
            .members
            .values()
            .next()
            .map(|member| member.token.clone())
            .expect("at least one member");
        let path = format!("/api/session/{}", self.session());
        block_on(self.app.get(Some(&token), &path)).body["users"].clone()
    }
}

/// Drive one request to completion on a fresh Actix system.
fn block_on<F: Future>(fut: F) -> F::Output {
    actix_rt::System::new().block_on(fut)
}

#[fixture]
fn world() -> EnrolmentWorld {
    EnrolmentWorld {
        app: TestApp::new(),
        members: HashMap::new(),
        session: None,
        last: None,
    }
}

#[given("member {name} has signed up")]
fn member_has_signed_up(world: &mut EnrolmentWorld, name: String) {
    let email = format!("{name}@studio.test");
    let member = block_on(world.app.sign_up(&email));
    world.members.insert(name, member);
}

#[given("{name} has created a session")]
fn member_has_created_a_session(world: &mut EnrolmentWorld, name: String) {
    let token = world.member(&name).token.clone();
    let id = block_on(world.app.create_session(&token, "Morning flow"));
    world.session = Some(id);
}

#[given("{name} has joined the session")]
fn member_has_joined_the_session(world: &mut EnrolmentWorld, name: String) {
    let member = world.member(&name).clone();
    let reply = block_on(world.app.participate(&member.token, world.session(), member.id));
    assert_eq!(reply.status.as_u16(), 200, "{name} joins");
}

#[given("the session has been deleted")]
fn the_session_has_been_deleted(world: &mut EnrolmentWorld) {
    let token = world
        .members
        .values()
        .next()
        .map(|member| member.token.clone())
        .expect("at least one member");
    let path = format!("/api/session/{}", world.session());
    let reply = block_on(world.app.delete(&token, &path));
    assert_eq!(reply.status.as_u16(), 200, "session deleted");
}

#[when("{name} joins the session")]
fn member_joins_the_session(world: &mut EnrolmentWorld, name: String) {
    let member = world.member(&name).clone();
    let reply = block_on(world.app.participate(&member.token, world.session(), member.id));
    world.last = Some(reply);
}

#[when("{name} leaves the session")]
fn member_leaves_the_session(world: &mut EnrolmentWorld, name: String) {
    let member = world.member(&name).clone();
    let reply = block_on(world.app.leave(&member.token, world.session(), member.id));
    world.last = Some(reply);
}

#[when("an anonymous client enrols {name} in the session")]
fn an_anonymous_client_enrols(world: &mut EnrolmentWorld, name: String) {
    let member_id = world.member(&name).id;
    let path = format!("/api/session/{}/participate/{member_id}", world.session());
    let reply = block_on(world.app.call(Method::POST, &path, None, None));
    world.last = Some(reply);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &mut EnrolmentWorld, status: u16) {
    assert_eq!(world.last().status.as_u16(), status);
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &mut EnrolmentWorld, code: String) {
    assert_eq!(world.last().body["code"], code.as_str());
}

#[then("the response carries a trace id")]
fn the_response_carries_a_trace_id(world: &mut EnrolmentWorld) {
    let reply = world.last();
    let header = reply.trace_id.as_deref().expect("trace id header");
    assert_eq!(reply.body["traceId"], header);
}

#[then("the session lists {name} as a participant")]
fn the_session_lists_participant(world: &mut EnrolmentWorld, name: String) {
    let id = world.member(&name).id;
    assert_eq!(world.participants(), json!([id]));
}

#[then("the session lists only {name}")]
fn the_session_lists_only(world: &mut EnrolmentWorld, name: String) {
    let id = world.member(&name).id;
    assert_eq!(world.participants(), json!([id]));
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "A member joins a session"
)]
fn a_member_joins_a_session(world: EnrolmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "Joining twice is rejected"
)]
fn joining_twice_is_rejected(world: EnrolmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "Leaving without having joined is rejected"
)]
fn leaving_without_having_joined_is_rejected(world: EnrolmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "A member leaves and the others stay"
)]
fn a_member_leaves_and_the_others_stay(world: EnrolmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "Joining a deleted session is not found"
)]
fn joining_a_deleted_session_is_not_found(world: EnrolmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/enrolment.feature",
    name = "Anonymous clients cannot enrol anyone"
)]
fn anonymous_clients_cannot_enrol_anyone(world: EnrolmentWorld) {
    drop(world);
}
