//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, room list, room details).

mod fixtures;
use fixtures::{TestServer, WsClient};
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let port = 19080;
    let server = TestServer::start(port).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_list_empty_by_default() {
    // テスト項目: ルームが作成されていなければ /api/rooms は空配列を返す
    // given (前提条件):
    let port = 19081;
    let server = TestServer::start(port).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_rooms_list_shows_active_room() {
    // テスト項目: ホストがルームを作成すると /api/rooms に現れる
    // given (前提条件): ホストがルーム "lobby" を作成して参加済み
    let port = 19082;
    let server = TestServer::start(port).await;
    let client = reqwest::Client::new();

    let mut host = WsClient::connect(&server).await;
    host.send(json!({
        "type": "join",
        "name": "alice",
        "roomId": "lobby",
        "memberId": "m-alice",
        "host": true,
    }))
    .await;
    host.recv_type("joined").await;

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let rooms: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let rooms = rooms.as_array().expect("Response should be an array");
    assert_eq!(rooms.len(), 1);

    let room = &rooms[0];
    assert_eq!(room["code"], "lobby");
    assert_eq!(room["members"], json!(["alice"]));
    assert!(room["created_at"].is_string());

    host.close().await;
}

#[tokio::test]
async fn test_room_detail_endpoint_success() {
    // テスト項目: /api/rooms/:room_code エンドポイントが正常にルーム詳細を返す
    // given (前提条件): ホストとゲストが参加したルーム
    let port = 19083;
    let server = TestServer::start(port).await;
    let client = reqwest::Client::new();

    let mut host = WsClient::connect(&server).await;
    host.send(json!({
        "type": "join",
        "name": "alice",
        "roomId": "studio",
        "memberId": "m-alice",
        "host": true,
    }))
    .await;
    host.recv_type("joined").await;

    let mut guest = WsClient::connect(&server).await;
    guest
        .send(json!({
            "type": "join",
            "name": "bob",
            "roomId": "studio",
            "memberId": "m-bob",
            "host": false,
        }))
        .await;
    guest.recv_type("joined").await;

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/studio", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["code"], "studio");
    assert_eq!(body["host_member_id"], "m-alice");
    assert_eq!(body["element_count"], 0);
    assert!(body["created_at"].is_string());

    // members の各要素が名前・権限・接続時刻を持つ
    let members = body["members"].as_array().expect("members should be an array");
    assert_eq!(members.len(), 2);
    for member in members {
        assert!(member["name"].is_string());
        assert!(member["member_id"].is_string());
        assert!(member["is_host"].is_boolean());
        assert!(member["can_draw"].is_boolean());
        assert!(member["connected_at"].is_string());
    }

    guest.close().await;
    host.close().await;
}

#[tokio::test]
async fn test_room_detail_endpoint_not_found() {
    // テスト項目: /api/rooms/:room_code エンドポイントが存在しないルームに対して404を返す
    // given (前提条件):
    let port = 19084;
    let server = TestServer::start(port).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/nonexistent", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}
