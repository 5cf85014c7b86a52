use axum::Router;
use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::collections::HashSet;
use tokio::task::JoinHandle;
use wishwall::{app::AppState, db, http, store::WishStore};

async fn start_server() -> (String, JoinHandle<()>) {
    let (base, srv, _pool) = start_server_with_pool().await;
    (base, srv)
}

async fn start_server_with_pool() -> (String, JoinHandle<()>, SqlitePool) {
    let db_url = db::ensure_sqlite_path("sqlite::memory:").expect("memory url");
    // One connection that never recycles, otherwise each connection would see
    // its own empty in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&db_url)
        .await
        .expect("connect memory sqlite");
    db::run_migrations(&pool).await.expect("migrate");
    let state = AppState {
        store: WishStore::new(pool.clone()),
    };
    let app: Router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle, pool)
}

async fn submit(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/wishes", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    let res = client.get(url).send().await.unwrap();
    assert!(res.status().is_success());
    res.json().await.unwrap()
}

fn ids(v: &Value) -> Vec<i64> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn submit_then_read_recent() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = submit(&client, &base, json!({ "text": "  Learn to juggle " })).await;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["id"], 1);
    assert_eq!(v["text"], "Learn to juggle");
    assert!(v["created_at"].as_str().unwrap().starts_with("20"));

    let res = submit(&client, &base, json!({ "message": "See the aurora" })).await;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    let recent = get_json(&client, format!("{}/api/wishes/recent?limit=1", base)).await;
    let arr = recent.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["text"], "See the aurora");
}

#[tokio::test]
async fn invalid_submissions_are_rejected() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    for body in [json!({ "text": "" }), json!({ "text": "   " }), json!({ "text": 42 }), json!({})] {
        let res = submit(&client, &base, body).await;
        assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
        let v: Value = res.json().await.unwrap();
        assert_eq!(v["error"], "empty");
    }

    let res = submit(&client, &base, json!({ "text": "x".repeat(81) })).await;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["error"], "too_long");

    // A body that is not JSON at all counts as empty text.
    let res = client
        .post(format!("{}/api/wishes", base))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let recent = get_json(&client, format!("{}/api/wishes/recent", base)).await;
    assert!(recent.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn random_skips_excluded_ids_and_tolerates_garbage() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    for i in 0..6 {
        let res = submit(&client, &base, json!({ "text": format!("wish {i}") })).await;
        assert!(res.status().is_success());
    }

    let v = get_json(
        &client,
        format!("{}/api/wishes/random?limit=abc&exclude_ids=1,2,zz,-3,,3", base),
    )
    .await;
    let got = ids(&v);
    assert_eq!(got.len(), 3);
    assert!(got.iter().all(|id| *id > 3));
    assert_eq!(got.iter().collect::<HashSet<_>>().len(), 3);

    let v = get_json(&client, format!("{}/api/wishes/random?limit=2", base)).await;
    assert_eq!(ids(&v).len(), 2);
}

#[tokio::test]
async fn seed_returns_disjoint_recent_and_random() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    for i in 0..8 {
        submit(&client, &base, json!({ "text": format!("wish {i}") })).await;
    }

    let v = get_json(
        &client,
        format!("{}/api/wishes/seed?recent=3&random=50&exclude_ids=1", base),
    )
    .await;
    let recent = ids(&v["recent"]);
    let random = ids(&v["random"]);
    assert_eq!(recent, vec![8, 7, 6]);
    assert_eq!(random.len(), 4);
    assert!(random.iter().all(|id| !recent.contains(id) && *id != 1));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    submit(&client, &base, json!({ "text": "short lived" })).await;

    for path in ["api/wishes/1", "api/delete/1", "api/delete/404"] {
        let res = client
            .delete(format!("{}/{}", base, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        let v: Value = res.json().await.unwrap();
        assert_eq!(v["status"], "deleted");
    }

    let recent = get_json(&client, format!("{}/api/wishes/recent", base)).await;
    assert!(recent.as_array().unwrap().is_empty());

    let v: Value = submit(&client, &base, json!({ "text": "next" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(v["id"], 2);
}

#[tokio::test]
async fn index_page_escapes_wish_text() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    submit(&client, &base, json!({ "text": "<script>alert(1)</script>" })).await;

    let res = client.get(format!("{}/", base)).send().await.unwrap();
    assert!(res.status().is_success());
    let html = res.text().await.unwrap();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("maxlength=\"80\""));
}

async fn fill(pool: &SqlitePool, n: usize) {
    let store = WishStore::new(pool.clone());
    for i in 0..n {
        let text = format!("wish {i}");
        store.create(Some(text.as_str())).await.expect("create");
    }
}

fn len(v: &Value) -> usize {
    v.as_array().unwrap().len()
}

#[tokio::test]
async fn legacy_submit_and_init_routes() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/submit", base))
        .json(&json!({ "text": "Plant a tree" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["text"], "Plant a tree");

    for i in 0..4 {
        submit(&client, &base, json!({ "text": format!("more {i}") })).await;
    }

    let v = get_json(
        &client,
        format!("{}/api/init?recent_limit=2&random_limit=15", base),
    )
    .await;
    let recent = ids(&v["recent"]);
    let random = ids(&v["random"]);
    assert_eq!(recent, vec![5, 4]);
    assert_eq!(random.len(), 3);
    assert!(random.iter().all(|id| !recent.contains(id)));
}

#[tokio::test]
async fn messages_routes_use_message_key() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/messages", base))
        .json(&json!({ "message": "  Visit Kyoto " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["message"], "Visit Kyoto");
    assert_eq!(v["id"], 1);
    assert!(v.get("text").is_none());

    let res = client
        .post(format!("{}/api/messages", base))
        .json(&json!({ "message": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    submit(&client, &base, json!({ "text": "Run a marathon" })).await;

    let v = get_json(&client, format!("{}/api/messages?recent=1&random=10", base)).await;
    assert_eq!(len(&v["recent"]), 1);
    assert_eq!(v["recent"][0]["message"], "Run a marathon");
    assert_eq!(len(&v["random"]), 1);
    assert_eq!(v["random"][0]["message"], "Visit Kyoto");
}

#[tokio::test]
async fn storage_failures_are_redacted() {
    let (base, _srv, pool) = start_server_with_pool().await;
    let client = reqwest::Client::new();
    sqlx::query("DROP TABLE wishes")
        .execute(&pool)
        .await
        .unwrap();

    let res = submit(&client, &base, json!({ "text": "lost wish" })).await;
    assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v, json!({ "error": "storage_error" }));

    for path in ["api/wishes/seed", "api/wishes/recent", "api/messages"] {
        let res = client
            .get(format!("{}/{}", base, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body = res.text().await.unwrap();
        assert!(!body.contains("no such table"));
        let v: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v, json!({ "error": "storage_error" }));
    }
}

#[tokio::test]
async fn limits_default_and_clamp_per_endpoint() {
    let (base, _srv, pool) = start_server_with_pool().await;
    let client = reqwest::Client::new();
    fill(&pool, 150).await;

    let cases = [
        ("api/wishes/recent", 20),
        ("api/wishes/recent?limit=0", 1),
        ("api/wishes/recent?limit=-4", 1),
        ("api/wishes/recent?limit=500", 100),
        ("api/wishes/recent?limit=99999999999999999999", 100),
        ("api/wishes/recent?limit=7", 7),
        ("api/wishes/recent?limit=oops", 20),
        ("api/wishes/random", 30),
        ("api/wishes/random?limit=0", 1),
        ("api/wishes/random?limit=500", 100),
        ("api/wishes/random?limit=12", 12),
    ];
    for (path, expected) in cases {
        let v = get_json(&client, format!("{}/{}", base, path)).await;
        assert_eq!(len(&v), expected, "{path}");
    }

    let seed_cases = [
        ("api/wishes/seed", 20, 30),
        ("api/wishes/seed?recent=5&random=500", 5, 100),
        ("api/wishes/seed?recent=0&random=x", 1, 30),
        ("api/wishes/seed?recent_limit=4&random_limit=6", 4, 6),
        ("api/init", 20, 30),
        ("api/messages?recent=12&random=10", 12, 10),
    ];
    for (path, recent, random) in seed_cases {
        let v = get_json(&client, format!("{}/{}", base, path)).await;
        assert_eq!(len(&v["recent"]), recent, "{path}");
        assert_eq!(len(&v["random"]), random, "{path}");
    }
}
