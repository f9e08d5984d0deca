//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "http")]

use std::sync::Arc;

use reqwest::multipart;
use salary_records::service::{self, RecordService};
use salary_records::store::RecordStore;
use salary_records::{InMemoryRecordStore, NewRecord, ServiceConfig};
use serde_json::{json, Value};

type Service = RecordService<InMemoryRecordStore>;

fn staff_service() -> Arc<Service> {
    let store = InMemoryRecordStore::with_records([
        NewRecord::new("John", 50_000.0),
        NewRecord::new("Jane", 75_000.0),
        NewRecord::new("Bob", 65_000.0),
    ])
    .unwrap();
    Arc::new(RecordService::new(store, Default::default()))
}

/// Bind to port 0 and return the base URL.
async fn start_server(service: Arc<Service>) -> String {
    let app = service::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let base = start_server(staff_service()).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn list_with_range_and_sort() {
    let base = start_server(staff_service()).await;
    let resp = reqwest::get(format!("{base}/records?min=0&max=70000&sort=SALARY"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 2);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["limit"], Value::Null);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["John", "Bob"]);
    assert!(body["data"][0]["id"].is_string());
}

#[tokio::test]
async fn page_size_alias() {
    let base = start_server(staff_service()).await;
    let body: Value = reqwest::get(format!("{base}/records?max=100000&pageSize=1&offset=1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["data"][0]["name"], "Jane");
}

#[tokio::test]
async fn non_numeric_filter_is_400() {
    let base = start_server(staff_service()).await;
    let resp = reqwest::get(format!("{base}/records?min=abc"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("min"));
}

#[tokio::test]
async fn create_returns_201_with_id() {
    let service = staff_service();
    let base = start_server(service.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/records"))
        .json(&json!({ "name": "Zoe", "salary": 1200 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Zoe");
    assert!(body["data"]["id"].is_string());
    assert_eq!(service.store().count().unwrap(), 4);
}

#[tokio::test]
async fn create_validation_errors() {
    let service = staff_service();
    let base = start_server(service.clone()).await;
    let client = reqwest::Client::new();

    for body in [
        json!({ "name": "", "salary": 100 }),
        json!({ "name": "Zoe" }),
        json!({ "name": "Zoe", "salary": "lots" }),
    ] {
        let resp = client
            .post(format!("{base}/records"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{body}");
    }

    let resp = client
        .post(format!("{base}/records"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    assert_eq!(service.store().count().unwrap(), 3);
}

#[tokio::test]
async fn multipart_upload() {
    let service = staff_service();
    let base = start_server(service.clone()).await;

    let csv = "name,salary\nJane,80000\nZoe,1200\nNeg,-5\n";
    let form = multipart::Form::new().part(
        service::UPLOAD_FIELD,
        multipart::Part::text(csv).file_name("staff.csv"),
    );
    let resp = reqwest::Client::new()
        .post(format!("{base}/records/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "processedCount": 2,
            "rejectedCount": 1,
            "createdNames": ["Zoe"],
            "updatedNames": ["Jane"],
        })
    );
    assert_eq!(
        service.store().find_by_name("Jane").unwrap().unwrap().salary,
        80_000.0
    );
}

#[tokio::test]
async fn raw_csv_upload() {
    let service = staff_service();
    let base = start_server(service.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/records/upload"))
        .header("content-type", "text/csv")
        .body("name,salary\nAmy,10\n")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(service.store().find_by_name("Amy").unwrap().is_some());
}

#[tokio::test]
async fn structural_upload_failure_is_422() {
    let service = staff_service();
    let base = start_server(service.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/records/upload"))
        .body("name,salary\nAlice,0.00\nBob,-50000\nx,abc\n")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("line 4"));
    // Written before the failing row.
    assert!(service.store().find_by_name("Alice").unwrap().is_some());
}

#[tokio::test]
async fn multipart_without_file_field_is_400() {
    let base = start_server(staff_service()).await;
    let form = multipart::Form::new().text("other", "name,salary\n");
    let resp = reqwest::Client::new()
        .post(format!("{base}/records/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn configured_page_cap_applies() {
    let config = ServiceConfig {
        max_page_size: Some(2),
        ..ServiceConfig::default()
    };
    let service = Arc::new(
        RecordService::new(
            InMemoryRecordStore::with_records(
                (0..5).map(|i| NewRecord::new(format!("n{i}"), i as f64)),
            )
            .unwrap(),
            Default::default(),
        )
        .with_config(&config),
    );
    let base = start_server(service).await;

    let body: Value = reqwest::get(format!("{base}/records"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total"], 5);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
