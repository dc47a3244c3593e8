//! HTTP-level tests for the configuration API client using wiremock
//!
//! These tests verify request shapes (paths, auth, bodies) and the mapping of
//! response codes onto ConfigApiError.

use pingdirectory_client::{
    AddNumSubordinatesVirtualAttributeRequest, ClientSettings, ConfigApiClient, ConfigApiClientTrait,
    ConfigApiError, JoinBaseDnType, Operation, UpdateRequest, DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA,
    NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC_AUTH: &str = "Basic Y249YWRtaW5pc3RyYXRvcjoyRmVkZXJhdGVNMHJl";

fn client_for(server: &MockServer) -> ConfigApiClient {
    ConfigApiClient::new(ClientSettings {
        base_url: server.uri(),
        username: "cn=administrator".to_string(),
        password: "2FederateM0re".to_string(),
        user_agent: Some("terraform-provider-pingdirectory/test".to_string()),
        ..Default::default()
    })
    .expect("client should build")
}

fn num_subordinates_body(id: &str, enabled: bool) -> serde_json::Value {
    json!({
        "schemas": [NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA],
        "id": id,
        "enabled": enabled,
        "attributeType": "numSubordinates",
        "baseDN": ["dc=example,dc=com"],
        "conflictBehavior": "virtual-overrides-real",
        "requireExplicitRequestByName": false,
        "multipleVirtualAttributeEvaluationOrderIndex": 0,
        "multipleVirtualAttributeMergeBehavior": "prefer-virtual-values"
    })
}

#[tokio::test]
async fn test_add_posts_typed_body_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/config/virtual-attributes"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("user-agent", "terraform-provider-pingdirectory/test"))
        .and(body_json(json!({
            "schemas": [NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA],
            "id": "numSubordinates",
            "enabled": true,
            "baseDN": ["dc=example,dc=com"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(num_subordinates_body("numSubordinates", true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .add_num_subordinates_virtual_attribute(AddNumSubordinatesVirtualAttributeRequest {
            schemas: vec![NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
            id: "numSubordinates".to_string(),
            description: None,
            enabled: true,
            attribute_type: None,
            base_dn: Some(vec!["dc=example,dc=com".to_string()]),
            group_dn: None,
            filter: None,
            client_connection_policy: None,
            conflict_behavior: None,
            require_explicit_request_by_name: None,
            multiple_virtual_attribute_evaluation_order_index: None,
            multiple_virtual_attribute_merge_behavior: None,
        })
        .await
        .expect("add should succeed");

    assert_eq!(created.id, "numSubordinates");
    assert_eq!(created.attribute_type, "numSubordinates");
}

#[tokio::test]
async fn test_get_encodes_id_and_reads_messages() {
    let server = MockServer::start().await;

    let mut body = json!({
        "schemas": [DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA],
        "id": "Manager Of",
        "joinDNAttribute": "manager",
        "joinBaseDNType": "use-search-base-dn",
        "enabled": true,
        "attributeType": "managerOf",
        "joinScope": "whole-subtree"
    });
    body["urn:pingidentity:schemas:configuration:messages:2.0"] = json!({
        "notifications": ["The change takes effect after a restart"],
        "requiredActions": [{"property": "enabled", "type": "restart", "synopsis": "Restart the server"}]
    });

    Mock::given(method("GET"))
        .and(path("/config/virtual-attributes/Manager%20Of"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let attr = client
        .get_dn_join_virtual_attribute("Manager Of")
        .await
        .expect("get should succeed");

    assert_eq!(attr.join_base_dn_type, JoinBaseDnType::UseSearchBaseDn);
    let messages = attr.messages.expect("messages should be decoded");
    assert_eq!(messages.notifications.len(), 1);
    assert_eq!(messages.required_actions[0].action_type, "restart");
}

#[tokio::test]
async fn test_get_of_other_type_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config/virtual-attributes/numSubordinates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(num_subordinates_body("numSubordinates", true)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_dn_join_virtual_attribute("numSubordinates").await;

    assert!(matches!(result, Err(ConfigApiError::UnexpectedType { .. })));
}

#[tokio::test]
async fn test_update_sends_operations_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/config/virtual-attributes/numSubordinates"))
        .and(body_json(json!({
            "operations": [
                {"op": "replace", "path": "enabled", "value": "false"},
                {"op": "remove", "path": "base-dn", "value": "dc=example,dc=com"},
                {"op": "remove", "path": "description"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(num_subordinates_body("numSubordinates", false)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .update_num_subordinates_virtual_attribute(
            "numSubordinates",
            UpdateRequest {
                operations: vec![
                    Operation::replace("enabled", "false"),
                    Operation::remove_value("base-dn", "dc=example,dc=com"),
                    Operation::remove("description"),
                ],
            },
        )
        .await
        .expect("update should succeed");

    assert!(!updated.enabled);
}

#[tokio::test]
async fn test_update_without_operations_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .update_num_subordinates_virtual_attribute("numSubordinates", UpdateRequest { operations: vec![] })
        .await;

    assert!(matches!(result, Err(ConfigApiError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config/virtual-attributes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "schemas": ["urn:pingidentity:schemas:2.0:Error"],
            "status": "404",
            "detail": "Virtual Attribute missing does not exist"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_num_subordinates_virtual_attribute("missing")
        .await
        .expect_err("missing object should fail");

    assert!(err.is_not_found());
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_api_error_carries_status_and_detail() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/config/virtual-attributes/numSubordinates"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "schemas": ["urn:pingidentity:schemas:2.0:Error"],
            "status": "400",
            "detail": "The Virtual Attribute cannot be removed"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.delete_num_subordinates_virtual_attribute("numSubordinates").await {
        Err(ConfigApiError::Api { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "The Virtual Attribute cannot be removed");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/config/virtual-attributes/numSubordinates"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .delete_num_subordinates_virtual_attribute("numSubordinates")
        .await
        .expect("delete should succeed");
}
