use groupsio::{error::ErrorKind, GroupsClient};
use groupsio_models::{
    id::{GroupId, SubscriptionId},
    subscription::{SubscriptionStatus, SubscriptionUpdate},
};
use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn subscription_json(id: u64, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "subscription",
        "group_id": 1,
        "user_id": id * 10,
        "email": email,
        "status": "sub_status_normal"
    })
}

fn client_for(server: &MockServer) -> GroupsClient {
    GroupsClient::with_base_url("test-token", &format!("{}/api/v1/", server.uri()))
}

#[tokio::test]
async fn members_follow_continuation_tokens_in_order() {
    let server = MockServer::start().await;

    // Numeric continuation token, forwarded verbatim as a query value.
    Mock::given(method("GET"))
        .and(path("/api/v1/getmembers"))
        .and(query_param("group_id", "1"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription_json(1, "a@example.org"), subscription_json(2, "b@example.org")],
            "has_more": true,
            "next_page_token": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getmembers"))
        .and(query_param("page_token", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription_json(3, "c@example.org")],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let members = client.members().get_members(GroupId(1)).await.unwrap();
    let emails = members.iter().map(|m| m.email.as_str()).collect::<Vec<_>>();
    assert_eq!(
        emails,
        vec!["a@example.org", "b@example.org", "c@example.org"]
    );
}

#[tokio::test]
async fn page_failure_discards_partial_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getmembers"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription_json(1, "a@example.org")],
            "has_more": true,
            "next_page_token": "B"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getmembers"))
        .and(query_param("page_token", "B"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "object": "error",
            "type": "server"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.members().get_members(GroupId(1)).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Api { .. }));
}

#[tokio::test]
async fn update_member_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getperms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "perms",
            "manage_members": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/updatemember"))
        .and(query_param("sub_id", "9"))
        .and(body_string("status=sub_status_banned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "object": "subscription",
            "group_id": 1,
            "user_id": 90,
            "email": "a@example.org",
            "status": "sub_status_banned"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = SubscriptionUpdate::new().status(SubscriptionStatus::Banned);
    let updated = client
        .members()
        .update_member(GroupId(1), SubscriptionId(9), &update)
        .await
        .unwrap();
    assert_eq!(updated.status, SubscriptionStatus::Banned);
}

#[tokio::test]
async fn update_member_denied_issues_no_update_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getperms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "perms",
            "manage_group_settings": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/updatemember"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = SubscriptionUpdate::new().full_name("Name");
    let err = client
        .members()
        .update_member(GroupId(1), SubscriptionId(9), &update)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InadequatePermissions { .. }));
}

#[tokio::test]
async fn remove_member_returns_the_removed_subscription() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/getperms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "perms",
            "manage_members": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/removemember"))
        .and(query_param("sub_id", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(subscription_json(9, "a@example.org")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let removed = client
        .members()
        .remove_member(GroupId(1), SubscriptionId(9))
        .await
        .unwrap();
    assert_eq!(removed.id, SubscriptionId(9));
}
