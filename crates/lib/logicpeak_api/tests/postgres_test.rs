//! End-to-end against a live PostgreSQL named by `DATABASE_URL`.
//!
//! Skipped when `DATABASE_URL` is not set. Clears the `documents` table.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use logicpeak_core::store::PgDocumentStore;
use logicpeak_core::store::postgres::PoolSettings;
use serde_json::json;

use common::{app, get, post_json};

#[tokio::test]
async fn leads_round_trip_through_postgres() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL round trip");
        return;
    };

    let store = PgDocumentStore::connect_lazy(
        &url,
        None,
        &PoolSettings {
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        },
    )
    .expect("valid DATABASE_URL");
    store.migrate().await.expect("migrate");

    let pool = sqlx::PgPool::connect(&url).await.expect("connect");
    sqlx::query("DELETE FROM documents")
        .execute(&pool)
        .await
        .expect("clear documents");

    let store = Arc::new(store);
    let app = app(Some(store.clone()));

    let leads = [
        json!({ "message": "Need a quote", "source": "contact", "name": null, "email": null }),
        json!({ "message": "Call me", "source": "chat", "name": "Ada", "email": "ada@example.com" }),
        json!({ "message": "Pricing?", "source": "other", "name": "Bob", "email": null }),
        json!({ "message": "Hello", "source": "contact", "name": null, "email": "c@example.org" }),
    ];
    let mut ids = Vec::new();
    for lead in &leads {
        let (status, body) = post_json(&app, "/leads", lead).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        ids.push(body["id"].clone());
    }

    let (status, body) = get(&app, "/leads?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for ((item, lead), id) in items.iter().zip(&leads).zip(&ids) {
        assert_eq!(&item["_id"], id);
        for field in ["name", "email", "message", "source"] {
            assert_eq!(item[field], lead[field], "field {field}");
        }
    }

    let (_, body) = get(&app, "/leads?limit=0").await;
    assert_eq!(body["items"], json!([]));

    let (_, body) = get(&app, "/leads").await;
    assert_eq!(body["items"].as_array().unwrap().len(), leads.len());

    let (status, body) = get(&app, "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["collections"], json!(["lead"]));

    store.close().await;
    pool.close().await;
}
