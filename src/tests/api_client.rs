use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::api::{ApiError, PointRecord, TripApi, TripApiClient};
use crate::core::PointKind;
use crate::testing::sample_point;

const AUTH: &str = "Basic tripline-test";

fn client(server: &MockServer) -> TripApiClient {
    TripApiClient::new(server.base_url(), AUTH)
}

#[tokio::test]
async fn event_points_sends_authorization_and_decodes_records() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/points").header("Authorization", AUTH);
        then.status(200).json_body(json!([{
            "id": "p1",
            "type": "flight",
            "base_price": 100,
            "date_from": "2024-01-01T10:00:00.000Z",
            "date_to": "2024-01-01T12:00:00.000Z",
            "destination": "d1",
            "offers": ["o1"],
            "is_favorite": false
        }]));
    });

    let records = client(&server).event_points().await.unwrap();
    mock.assert();

    assert_eq!(records.len(), 1);
    let point = records.into_iter().next().unwrap().into_point().unwrap();
    assert_eq!(point.id, "p1");
    assert_eq!(point.kind, PointKind::Flight);
    assert_eq!(point.date_from.unwrap().to_rfc3339(), "2024-01-01T10:00:00+00:00");
    assert_eq!(point.offers, vec!["o1".to_string()]);
}

#[tokio::test]
async fn null_dates_survive_the_round_trip() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/points");
        then.status(200).json_body(json!([{
            "id": "p1",
            "type": "taxi",
            "base_price": 0,
            "date_from": null,
            "date_to": null,
            "destination": "",
            "offers": [],
            "is_favorite": false
        }]));
    });

    let records = client(&server).event_points().await.unwrap();
    let point = records.into_iter().next().unwrap().into_point().unwrap();
    assert_eq!(point.date_from, None);
    assert_eq!(point.date_to, None);
}

#[tokio::test]
async fn malformed_date_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/points");
        then.status(200).json_body(json!([{
            "id": "p1",
            "type": "taxi",
            "base_price": 0,
            "date_from": "not-a-date",
            "date_to": null,
            "destination": "",
            "offers": [],
            "is_favorite": false
        }]));
    });

    let records = client(&server).event_points().await.unwrap();
    let result = records.into_iter().next().unwrap().into_point();
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn update_puts_to_the_point_path() {
    let server = MockServer::start();
    let point = sample_point("p1", "2024-01-01T10:00:00Z", "2024-01-01T12:00:00Z", 100);
    let record = PointRecord::from_point(&point);
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/points/p1")
            .header("Authorization", AUTH)
            .json_body_obj(&record);
        then.status(200).json_body_obj(&record);
    });

    let saved = client(&server).update_point(record.clone()).await.unwrap();
    mock.assert();
    assert_eq!(saved, record);
}

#[tokio::test]
async fn create_posts_the_draft_and_returns_the_assigned_id() {
    let server = MockServer::start();
    let draft = sample_point("", "2024-02-01T10:00:00Z", "2024-02-01T12:00:00Z", 50);
    let mut confirmed = PointRecord::from_point(&draft);
    confirmed.id = "srv-1".to_string();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/points").header("Authorization", AUTH);
        then.status(201).json_body_obj(&confirmed);
    });

    let saved = client(&server)
        .create_point(PointRecord::from_point(&draft))
        .await
        .unwrap();
    mock.assert();
    assert_eq!(saved.id, "srv-1");
}

#[tokio::test]
async fn delete_maps_http_errors_to_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/points/p1");
        then.status(404);
    });

    let result = client(&server).delete_point("p1").await;
    assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
}

#[tokio::test]
async fn read_failure_surfaces_the_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/offers");
        then.status(500);
    });

    let result = client(&server).offers().await;
    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
}
