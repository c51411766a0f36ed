//! Books over HTTP: create / list / get / update / delete against the real router.

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dune_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = common::spawn_app().await?;
    let client = reqwest::Client::new();
    let dune = json!({"id": 1, "title": "Dune", "author": "Herbert", "year": 1965});

    let resp = client
        .post(format!("{}/books", base_url))
        .json(&dune)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.json::<Value>().await?, dune);

    let resp = client
        .post(format!("{}/books", base_url))
        .json(&json!({"id": 1, "title": "Other", "author": "Someone"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.json::<Value>().await?["error"], "conflict");

    let resp = client
        .put(format!("{}/books/1", base_url))
        .json(&json!({"year": 1966}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({"id": 1, "title": "Dune", "author": "Herbert", "year": 1966})
    );

    let resp = client.delete(format!("{}/books/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(format!("{}/books/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>().await?["error"], "not_found");

    let resp = client.delete(format!("{}/books/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_is_ordered_and_optional_year_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = common::spawn_app().await?;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/books", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!([]));

    for body in [
        json!({"id": 3, "title": "Emma", "author": "Austen"}),
        json!({"id": 2, "title": "Ulysses", "author": "Joyce", "year": 1922}),
    ] {
        let resp = client
            .post(format!("{}/books", base_url))
            .json(&body)
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let emma = client
        .get(format!("{}/books/3", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(
        emma,
        json!({"id": 3, "title": "Emma", "author": "Austen", "year": null})
    );

    let ids: Vec<i64> = client
        .get(format!("{}/books", base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?
        .iter()
        .filter_map(|b| b["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![2, 3]);

    // An empty update is a no-op that returns the current record.
    let resp = client
        .put(format!("{}/books/2", base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?["year"], 1922);

    // Explicit null clears the optional year.
    let resp = client
        .put(format!("{}/books/2", base_url))
        .json(&json!({"year": null}))
        .send()
        .await?;
    assert_eq!(resp.json::<Value>().await?["year"], Value::Null);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_input_is_rejected_before_storage() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = common::spawn_app().await?;
    let client = reqwest::Client::new();

    let missing_author = client
        .post(format!("{}/books", base_url))
        .json(&json!({"id": 5, "title": "Untitled"}))
        .send()
        .await?;
    assert_eq!(missing_author.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        missing_author.json::<Value>().await?["error"],
        "validation_error"
    );

    let zero_id = client
        .post(format!("{}/books", base_url))
        .json(&json!({"id": 0, "title": "T", "author": "A"}))
        .send()
        .await?;
    assert_eq!(zero_id.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_path = client.get(format!("{}/books/abc", base_url)).send().await?;
    assert_eq!(bad_path.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let update_missing = client
        .put(format!("{}/books/77", base_url))
        .json(&json!({"title": "Nope"}))
        .send()
        .await?;
    assert_eq!(update_missing.status(), StatusCode::NOT_FOUND);

    let books = client
        .get(format!("{}/books", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(books, json!([]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn root_and_health_respond() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = common::spawn_app().await?;
    let client = reqwest::Client::new();

    let root = client.get(&base_url).send().await?.json::<Value>().await?;
    assert_eq!(root["ok"], true);

    let health = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.json::<Value>().await?["status"], "ok");
    Ok(())
}
