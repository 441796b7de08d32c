//! Invite routes against the live mock record store.

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use invite_core::{GuestRepository, RetryPolicy, StoreConfig};
use invite_site::{app, AppState};
use mock_server::Store;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

const KEY: &str = "test-key";
const BASE: &str = "appBase";
const TABLE: &str = "tblGuests";

/// Start the mock store on an ephemeral port and return its base URL.
fn start_store(store: Store) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, store).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn site(endpoint: &str) -> axum::Router {
    let guests = GuestRepository::connect(StoreConfig::new(KEY, BASE, TABLE).with_endpoint(endpoint)).unwrap();
    app(AppState::new(guests))
}

async fn seed(store: &Store, fields: Value) -> String {
    let fields: Map<String, Value> = fields.as_object().unwrap().clone();
    store.insert(BASE, TABLE, fields).await.id
}

async fn stored_fields(store: &Store, id: &str) -> Option<Value> {
    store
        .get(BASE, TABLE, id)
        .await
        .map(|record| Value::Object(record.fields))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[http::header::LOCATION].to_str().unwrap()
}

// --- invite loader ---

#[tokio::test]
async fn invite_page_describes_family_weekender() {
    let store = Store::new(KEY);
    let id = seed(
        &store,
        json!({ "guest": "The Rosses", "inviteSize": "Family", "weekender": "yes" }),
    )
    .await;
    let resp = site(&start_store(store)).oneshot(get(&format!("/invite/{id}"))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let view = body_json(resp).await;
    assert_eq!(view["id"], id.as_str());
    assert_eq!(view["greeting_name"], "The Rosses");
    assert_eq!(view["invite_suffix"], "& family");
    assert_eq!(view["weekender"], true);
    assert_eq!(view["has_responded"], false);
    assert!(view["rsvp"].is_null());
}

#[tokio::test]
async fn unknown_invite_returns_404() {
    let resp = site(&start_store(Store::new(KEY)))
        .oneshot(get("/invite/recNobody"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unusable_id_returns_404() {
    let resp = site(&start_store(Store::new(KEY)))
        .oneshot(get("/invite/rec%20one"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_record_returns_404() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({})).await;
    let resp = site(&start_store(store)).oneshot(get(&format!("/invite/{id}"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_outage_returns_502() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let guests = GuestRepository::connect(StoreConfig::new(KEY, BASE, TABLE).with_endpoint(format!("http://{addr}")))
        .unwrap()
        .with_retry_policy(RetryPolicy::none());
    let resp = app(AppState::new(guests)).oneshot(get("/invite/rec123")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

// --- edit loader ---

#[tokio::test]
async fn edit_form_for_day_guest_hides_camping() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({ "guest": "Sam", "inviteSize": "Plus One", "email": "sam@example.com" })).await;
    let resp = site(&start_store(store))
        .oneshot(get(&format!("/invite/{id}/edit")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let view = body_json(resp).await;
    assert_eq!(view["weekender"], false);
    assert_eq!(view["show_camping"], false);
    assert_eq!(view["show_children"], false);
    assert_eq!(view["email"], "sam@example.com");
}

// --- rsvp action ---

#[tokio::test]
async fn rsvp_submission_merges_and_redirects() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({ "guest": "Jo", "weekender": "yes", "hasResponded": "false" })).await;
    let endpoint = start_store(store.clone());

    let resp = site(&endpoint)
        .oneshot(form_post(
            &format!("/invite/{id}/edit"),
            "rsvp=yes&email=jo%40example.com&dietary=&planOnCamping=yes&numChildren=2",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/invite/{id}"));
    assert_eq!(
        stored_fields(&store, &id).await.unwrap(),
        json!({
            "guest": "Jo",
            "weekender": "yes",
            "hasResponded": true,
            "rsvp": "yes",
            "email": "jo@example.com",
            "planOnCamping": "yes",
            "numChildren": 2
        })
    );
}

#[tokio::test]
async fn blank_inputs_clear_stored_answers() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({ "guest": "Jo", "dietary": "no nuts", "email": "old@example.com" })).await;
    let endpoint = start_store(store.clone());

    let resp = site(&endpoint)
        .oneshot(form_post(&format!("/invite/{id}/edit"), "rsvp=yes&dietary=&email="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        stored_fields(&store, &id).await.unwrap(),
        json!({ "guest": "Jo", "rsvp": "yes", "hasResponded": true })
    );
}

#[tokio::test]
async fn rsvp_for_unknown_guest_returns_404() {
    let resp = site(&start_store(Store::new(KEY)))
        .oneshot(form_post("/invite/recNobody/edit", "rsvp=no"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- favorite action ---

#[tokio::test]
async fn favorite_toggle_round_trips() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({ "guest": "Jo" })).await;
    let endpoint = start_store(store.clone());

    let resp = site(&endpoint)
        .oneshot(form_post(&format!("/invite/{id}"), "favorite=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/invite/{id}"));
    let fields = stored_fields(&store, &id).await.unwrap();
    assert_eq!(fields["favorite"], true);
    assert_eq!(fields["guest"], "Jo");
}

// --- destroy action ---

#[tokio::test]
async fn destroy_removes_guest_and_redirects_home() {
    let store = Store::new(KEY);
    let id = seed(&store, json!({ "guest": "Jo" })).await;
    let endpoint = start_store(store.clone());

    let resp = site(&endpoint)
        .oneshot(form_post(&format!("/invite/{id}/destroy"), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert!(stored_fields(&store, &id).await.is_none());

    let resp = site(&endpoint).oneshot(get(&format!("/invite/{id}"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
