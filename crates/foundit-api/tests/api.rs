//! Router-level tests: drive the whole claim lifecycle over HTTP against an
//! in-memory database and a throwaway object-store directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use foundit_api::state::{AppState, AppStateInner};
use foundit_api::storage::Storage;
use foundit_db::Database;
use foundit_types::models::Role;

struct TestApp {
    router: Router,
    state: AppState,
    storage_dir: PathBuf,
}

impl TestApp {
    async fn new() -> Self {
        let storage_dir = std::env::temp_dir().join(format!("foundit-api-test-{}", Uuid::new_v4()));
        let state = Arc::new(AppStateInner {
            db: Database::open_in_memory().unwrap(),
            storage: Storage::new(storage_dir.clone(), "http://localhost").await.unwrap(),
            jwt_secret: "test-secret".into(),
        });
        Self {
            router: foundit_api::router(state.clone()),
            state,
            storage_dir,
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }

    async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    async fn upload(&self, uri: &str, token: &str, content_type: &str, data: Vec<u8>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(data))
            .unwrap();
        self.send(req).await
    }

    /// Returns (user_id, token).
    async fn register(&self, email: &str, role: &str) -> (String, String) {
        let (status, body) = self
            .json(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "hunter22",
                    "display_name": email.split('@').next().unwrap(),
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["user_id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn post_item(&self, token: &str) -> String {
        let (status, upload) = self
            .upload("/uploads/item-images", token, "image/png", b"\x89PNG fake".to_vec())
            .await;
        assert_eq!(status, StatusCode::CREATED, "{upload}");

        let (status, item) = self
            .json(Method::POST, "/items", Some(token), Some(item_body("Black wallet", upload["url"].as_str().unwrap())))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{item}");
        item["id"].as_str().unwrap().to_string()
    }

    fn files_under(&self, bucket: &str, owner: &str) -> usize {
        std::fs::read_dir(self.storage_dir.join(bucket).join(owner))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn item_body(title: &str, image_url: &str) -> Value {
    json!({
        "title": title,
        "category": "Wallets",
        "description": "Found near the library",
        "image_url": image_url,
        "questions": [
            { "question": "Colour?", "options": ["Red", "Black", "Brown"], "correct_index": 1 },
            { "question": "Brand?", "options": ["Fossil", "Gucci", "Other"], "correct_index": 0 },
        ],
    })
}

#[tokio::test]
async fn claim_lifecycle_end_to_end() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;

    // Three seekers scoring 2/2, 1/2 and 0/2.
    let mut claim_ids = Vec::new();
    let mut seekers = Vec::new();
    for (i, answers) in [[1, 0], [1, 2], [0, 2]].iter().enumerate() {
        let (_, token) = app.register(&format!("seeker{i}@example.com"), "seeker").await;
        let (status, body) = app
            .json(Method::POST, &format!("/items/{item_id}/claims"), Some(&token), Some(json!({ "answers": answers })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        claim_ids.push(body["id"].as_str().unwrap().to_string());
        seekers.push(token);
    }

    let (status, all) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims"), Some(&founder), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, filtered) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims?min_correct=2"), Some(&founder), None)
        .await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], claim_ids[0].as_str());
    assert_eq!(filtered[0]["score"], json!({ "correct": 2, "total": 2 }));
    assert_eq!(filtered[0]["seeker_profile"]["email"], "seeker0@example.com");

    let (status, body) = app
        .json(
            Method::POST,
            &format!("/dashboard/items/{item_id}/winner"),
            Some(&founder),
            Some(json!({ "claim_id": claim_ids[0] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "claimed");
    assert_eq!(body["winning_claim_id"], claim_ids[0].as_str());

    let (_, applicants) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims"), Some(&founder), None)
        .await;
    let winners: Vec<_> = applicants
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["is_winner"] == true)
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(winners, vec![claim_ids[0].clone()]);

    // A second selection is refused and changes nothing.
    let (status, _) = app
        .json(
            Method::POST,
            &format!("/dashboard/items/{item_id}/winner"),
            Some(&founder),
            Some(json!({ "claim_id": claim_ids[1] })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (_, items) = app.json(Method::GET, "/dashboard/items", Some(&founder), None).await;
    assert_eq!(items[0]["winning_claim_id"], claim_ids[0].as_str());

    // The winner sees it on their claim list and on the item page.
    let (_, mine) = app.json(Method::GET, "/me/claims", Some(&seekers[0]), None).await;
    assert_eq!(mine[0]["is_winner"], true);
    assert_eq!(mine[0]["item"]["status"], "claimed");

    let (_, detail) = app.json(Method::GET, &format!("/items/{item_id}"), Some(&seekers[1]), None).await;
    assert_eq!(detail["has_applied"], true);
    assert_eq!(detail["is_winner"], false);

    // Claimed items drop out of the public listing and stop accepting claims.
    let (_, listing) = app.json(Method::GET, "/items", None, None).await;
    assert!(listing.as_array().unwrap().is_empty());

    let (_, late) = app.register("late@example.com", "seeker").await;
    let (status, body) = app
        .json(Method::POST, &format!("/items/{item_id}/claims"), Some(&late), Some(json!({ "answers": [1, 0] })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This item has already been claimed.");
}

#[tokio::test]
async fn duplicate_claim_reports_already_applied() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;
    let (_, seeker) = app.register("sam@example.com", "seeker").await;

    let uri = format!("/items/{item_id}/claims");
    let (status, _) = app.json(Method::POST, &uri, Some(&seeker), Some(json!({ "answers": [1, 0] }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.json(Method::POST, &uri, Some(&seeker), Some(json!({ "answers": [0, 0] }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You have already applied for this item.");

    let (_, applicants) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims"), Some(&founder), None)
        .await;
    assert_eq!(applicants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn incomplete_answers_rejected_without_claim() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;
    let (_, seeker) = app.register("sam@example.com", "seeker").await;
    let uri = format!("/items/{item_id}/claims");

    let (status, body) = app.json(Method::POST, &uri, Some(&seeker), Some(json!({ "answers": [1, null] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please answer all questions.");

    let (status, _) = app.json(Method::POST, &uri, Some(&seeker), Some(json!({ "answers": [1] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, detail) = app.json(Method::GET, &format!("/items/{item_id}"), Some(&seeker), None).await;
    assert_eq!(detail["has_applied"], false);
}

#[tokio::test]
async fn roles_are_enforced() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;
    let (_, seeker) = app.register("sam@example.com", "seeker").await;

    let (status, _) = app
        .json(Method::POST, &format!("/items/{item_id}/claims"), Some(&founder), Some(json!({ "answers": [1, 0] })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .json(Method::POST, "/items", Some(&seeker), Some(item_body("Keys", "http://localhost/x.png")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.json(Method::GET, "/dashboard/items", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.json(Method::GET, "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.json(Method::GET, "/me", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn other_founders_cannot_touch_an_item() {
    let app = TestApp::new().await;
    let (_, owner) = app.register("finn@example.com", "founder").await;
    let (_, other) = app.register("olga@example.com", "founder").await;
    let item_id = app.post_item(&owner).await;

    let (status, _) = app
        .json(Method::PUT, &format!("/items/{item_id}"), Some(&other), Some(item_body("Mine now", "http://localhost/x.png")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/dashboard/items/{item_id}/winner"),
            Some(&other),
            Some(json!({ "claim_id": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn item_detail_hides_answer_key() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;

    let (status, detail) = app.json(Method::GET, &format!("/items/{item_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let questions = detail["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.get("correct_index").is_none()));
    assert!(detail.get("has_applied").is_none());

    let (status, _) = app.json(Method::GET, &format!("/items/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_question_sets_rejected() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;

    let mut body = item_body("Umbrella", "http://localhost/x.png");
    body["questions"][1]["options"][2] = json!("  ");
    let (status, err) = app.json(Method::POST, "/items", Some(&founder), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Option C in Question 2 is empty.");

    let mut body = item_body("Umbrella", "http://localhost/x.png");
    body["questions"].as_array_mut().unwrap().truncate(1);
    let (status, _) = app.json(Method::POST, "/items", Some(&founder), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = item_body(" ", "http://localhost/x.png");
    body["category"] = json!("");
    let (_, err) = app.json(Method::POST, "/items", Some(&founder), Some(body)).await;
    assert_eq!(err["error"], "Title and category are required.");

    let (_, items) = app.json(Method::GET, "/dashboard/items", Some(&founder), None).await;
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_or_non_image_uploads_never_stored() {
    let app = TestApp::new().await;
    let (founder_id, founder) = app.register("finn@example.com", "founder").await;

    let too_big = vec![0u8; foundit_verify::MAX_IMAGE_BYTES + 1];
    let (status, body) = app.upload("/uploads/item-images", &founder, "image/jpeg", too_big).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Image must be under 5MB.");

    let (status, _) = app.upload("/uploads/item-images", &founder, "application/pdf", b"%PDF".to_vec()).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(app.files_under("item-images", &founder_id), 0);
}

#[tokio::test]
async fn uploaded_images_are_served_and_replaced() {
    let app = TestApp::new().await;
    let (founder_id, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;
    assert_eq!(app.files_under("item-images", &founder_id), 1);

    let (_, items) = app.json(Method::GET, "/dashboard/items", Some(&founder), None).await;
    let old_url = items[0]["image_url"].as_str().unwrap().to_string();
    let served = old_url.strip_prefix("http://localhost").unwrap();
    let resp = app
        .router
        .clone()
        .oneshot(Request::builder().uri(served).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, upload) = app.upload("/uploads/item-images", &founder, "image/webp", b"RIFF fake".to_vec()).await;
    let new_url = upload["url"].as_str().unwrap();
    let (status, updated) = app
        .json(Method::PUT, &format!("/items/{item_id}"), Some(&founder), Some(item_body("Brown wallet", new_url)))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["title"], "Brown wallet");
    assert_eq!(updated["image_url"], new_url);

    // Only the replacement remains on disk.
    assert_eq!(app.files_under("item-images", &founder_id), 1);
}

#[tokio::test]
async fn profile_username_and_avatar() {
    let app = TestApp::new().await;
    let (seeker_id, seeker) = app.register("sam@example.com", "seeker").await;

    let (status, me) = app.json(Method::GET, "/me", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "seeker");
    assert_eq!(me["username"], "sam");

    let (status, me) = app
        .json(Method::PUT, "/me/username", Some(&seeker), Some(json!({ "username": "samwise" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "samwise");

    let (status, _) = app.json(Method::PUT, "/me/username", Some(&seeker), Some(json!({ "username": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, first) = app.upload("/me/avatar", &seeker, "image/png", b"one".to_vec()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app.upload("/me/avatar", &seeker, "image/png", b"two".to_vec()).await;
    assert_ne!(first["url"], second["url"]);

    let (_, me) = app.json(Method::GET, "/me", Some(&seeker), None).await;
    assert_eq!(me["avatar_url"], second["url"]);
    assert_eq!(app.files_under("avatars", &seeker_id), 1);
}

#[tokio::test]
async fn login_and_registration_rules() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("finn@example.com", "founder").await;

    let (status, body) = app
        .json(Method::POST, "/auth/login", None, Some(json!({ "email": "FINN@example.com", "password": "hunter22" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["role"], "founder");

    let (status, _) = app
        .json(Method::POST, "/auth/login", None, Some(json!({ "email": "finn@example.com", "password": "wrong-pass" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let register = |email: &str, password: &str| {
        json!({ "email": email, "password": password, "display_name": "Finn", "role": "seeker" })
    };
    let (status, _) = app
        .json(Method::POST, "/auth/register", None, Some(register("finn@example.com", "hunter22")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .json(Method::POST, "/auth/register", None, Some(register("new@example.com", "short")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters.");
}

#[tokio::test]
async fn applicant_threshold_bounds() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;

    let (status, _) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims?min_correct=4"), Some(&founder), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims?min_correct=3"), Some(&founder), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn foreign_image_urls_rejected_and_never_deleted() {
    let app = TestApp::new().await;
    let (victim_id, victim) = app.register("vera@example.com", "founder").await;
    let victim_item = app.post_item(&victim).await;
    let (_, detail) = app.json(Method::GET, &format!("/items/{victim_item}"), None, None).await;
    let victim_url = detail["image_url"].as_str().unwrap().to_string();

    let (attacker_id, attacker) = app.register("mal@example.com", "founder").await;
    let (status, body) = app
        .json(Method::POST, "/items", Some(&attacker), Some(item_body("Not mine", &victim_url)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please upload your own image.");

    let attacker_item = app.post_item(&attacker).await;
    let (status, _) = app
        .json(
            Method::PUT,
            &format!("/items/{attacker_item}"),
            Some(&attacker),
            Some(item_body("Not mine", &victim_url)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, upload) = app.upload("/uploads/item-images", &attacker, "image/png", b"\x89PNG again".to_vec()).await;
    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/items/{attacker_item}"),
            Some(&attacker),
            Some(item_body("Mine", upload["url"].as_str().unwrap())),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    assert_eq!(app.files_under("item-images", &victim_id), 1);
    assert_eq!(app.files_under("item-images", &attacker_id), 1);
    let (_, detail) = app.json(Method::GET, &format!("/items/{victim_item}"), None, None).await;
    assert_eq!(detail["image_url"], victim_url.as_str());
}

#[tokio::test]
async fn malformed_bodies_and_queries_get_json_errors() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;
    let (_, seeker) = app.register("sam@example.com", "seeker").await;

    let (status, body) = app
        .json(Method::POST, &format!("/items/{item_id}/claims"), Some(&seeker), Some(json!({ "answers": [1, 300] })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
    let (_, mine) = app.json(Method::GET, "/me/claims", Some(&seeker), None).await;
    assert!(mine.as_array().unwrap().is_empty());

    let (status, body) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims?min_correct=-1"), Some(&founder), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn inconsistent_winner_reports_distinct_error() {
    let app = TestApp::new().await;
    let (_, founder) = app.register("finn@example.com", "founder").await;
    let item_id = app.post_item(&founder).await;

    let mut claim_ids = Vec::new();
    for i in 0..2 {
        let (_, token) = app.register(&format!("seeker{i}@example.com"), "seeker").await;
        let (_, body) = app
            .json(Method::POST, &format!("/items/{item_id}/claims"), Some(&token), Some(json!({ "answers": [1, 0] })))
            .await;
        claim_ids.push(body["id"].as_str().unwrap().to_string());
    }

    app.state
        .db
        .with_conn_mut(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER spread_winner AFTER UPDATE OF is_winner ON claims
                 WHEN NEW.is_winner = 1
                 BEGIN
                     UPDATE claims SET is_winner = 1 WHERE item_id = NEW.item_id AND id != NEW.id;
                 END;",
            )?;
            Ok(())
        })
        .unwrap();

    let (status, body) = app
        .json(
            Method::POST,
            &format!("/dashboard/items/{item_id}/winner"),
            Some(&founder),
            Some(json!({ "claim_id": claim_ids[0] })),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Winner selection failed and was rolled back; please retry.");

    let (_, detail) = app.json(Method::GET, &format!("/items/{item_id}"), None, None).await;
    assert_eq!(detail["status"], "found");
    let (_, applicants) = app
        .json(Method::GET, &format!("/dashboard/items/{item_id}/claims"), Some(&founder), None)
        .await;
    assert!(applicants.as_array().unwrap().iter().all(|a| a["is_winner"] == false));
}

#[tokio::test]
async fn avatar_removed_when_profile_update_fails() {
    let app = TestApp::new().await;
    // Valid token for an account that has no profile row.
    let ghost = Uuid::new_v4();
    let token = foundit_api::auth::create_token("test-secret", ghost, Role::Seeker).unwrap();

    let (status, _) = app.upload("/me/avatar", &token, "image/png", b"\x89PNG".to_vec()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.files_under("avatars", &ghost.to_string()), 0);
}
