//! Unit tests for the Num Subordinates Virtual Attribute resource, mostly the
//! edit-only variant used for the server's built-in `numSubordinates`

#[cfg(test)]
mod tests {
    use super::super::NumSubordinatesVirtualAttribute;
    use crate::test_utils::*;
    use pingdirectory_client::Operation;
    use plugin_framework::{Diagnostics, Plan, ReadResult, Resource, State, UNKNOWN_VALUE};
    use serde_json::{json, Value};

    const ID: &str = "numSubordinates";

    fn plan(enabled: bool) -> Value {
        json!({
            "id": ID,
            "enabled": enabled,
            "attribute_type": UNKNOWN_VALUE,
            "base_dn": [],
            "group_dn": [],
            "filter": [],
            "client_connection_policy": [],
            "conflict_behavior": "virtual-overrides-real",
            "require_explicit_request_by_name": false,
            "multiple_virtual_attribute_evaluation_order_index": 0,
            "multiple_virtual_attribute_merge_behavior": "prefer-virtual-values",
            "notifications": UNKNOWN_VALUE,
            "required_actions": UNKNOWN_VALUE
        })
    }

    #[tokio::test]
    async fn test_adopting_matching_object_skips_update() {
        let client = mock_client();
        client.add_num_subordinates(num_subordinates_response(ID));

        let mut diags = Diagnostics::new();
        let state = edit_only::<NumSubordinatesVirtualAttribute>(&client)
            .create(Plan::new(plan(true)), &mut diags)
            .await
            .unwrap();

        assert!(!diags.has_error(), "{:?}", diags);
        assert!(client.update_calls().is_empty());
        assert_eq!(client.request_count(), 1);
        assert_eq!(state.raw()["attribute_type"], json!("numSubordinates"));
    }

    #[tokio::test]
    async fn test_adopting_changed_object_patches_it() {
        let client = mock_client();
        client.add_num_subordinates(num_subordinates_response(ID));

        let mut plan = plan(false);
        plan["description"] = json!("Counts immediate subordinates");

        let mut diags = Diagnostics::new();
        let state = edit_only::<NumSubordinatesVirtualAttribute>(&client)
            .create(Plan::new(plan), &mut diags)
            .await
            .unwrap();

        let calls = client.update_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].operations,
            vec![
                Operation::replace("description", "Counts immediate subordinates"),
                Operation::replace("enabled", "false"),
            ]
        );
        assert_eq!(state.raw()["enabled"], json!(false));
        assert!(!client.num_subordinates(ID).unwrap().enabled);
    }

    #[tokio::test]
    async fn test_adopting_missing_object_fails() {
        let client = mock_client();

        let mut diags = Diagnostics::new();
        let state = edit_only::<NumSubordinatesVirtualAttribute>(&client)
            .create(Plan::new(plan(true)), &mut diags)
            .await;

        assert!(state.is_none());
        assert!(diags.errors().next().unwrap().detail.contains("HTTP status: 404"));
    }

    #[tokio::test]
    async fn test_edit_only_delete_has_no_remote_effect() {
        let client = mock_client();
        client.add_num_subordinates(num_subordinates_response(ID));

        let mut diags = Diagnostics::new();
        let result = edit_only::<NumSubordinatesVirtualAttribute>(&client)
            .delete(State::new(json!({"id": ID})), &mut diags)
            .await;

        assert_eq!(result, Some(()));
        assert!(diags.is_empty());
        assert_eq!(client.request_count(), 0);
        assert!(client.num_subordinates(ID).is_some());
    }

    #[tokio::test]
    async fn test_edit_only_read_of_missing_object_is_an_error() {
        let client = mock_client();

        let mut diags = Diagnostics::new();
        let result = edit_only::<NumSubordinatesVirtualAttribute>(&client)
            .read(State::new(json!({"id": ID})), &mut diags)
            .await;

        assert!(result.is_none());
        assert!(diags.has_error());
    }

    #[tokio::test]
    async fn test_import_then_read_populates_state() {
        let client = mock_client();
        client.add_num_subordinates(num_subordinates_response(ID));
        let resource = managed::<NumSubordinatesVirtualAttribute>(&client);

        let mut diags = Diagnostics::new();
        let imported = resource.import_state(ID, &mut diags).unwrap();
        let Some(ReadResult::Present(state)) = resource.read(imported, &mut diags).await else {
            panic!("expected imported object, got {:?}", diags);
        };

        assert_eq!(state.raw()["id"], json!(ID));
        assert_eq!(state.raw()["conflict_behavior"], json!("virtual-overrides-real"));
        assert_eq!(state.raw()["description"], json!(null));
    }

    #[tokio::test]
    async fn test_managed_create_uses_server_attribute_type() {
        let client = mock_client();

        let mut plan = plan(true);
        plan["id"] = json!("childCount");

        let mut diags = Diagnostics::new();
        let state = managed::<NumSubordinatesVirtualAttribute>(&client)
            .create(Plan::new(plan), &mut diags)
            .await
            .unwrap();

        assert_eq!(state.raw()["attribute_type"], json!("numSubordinates"));
        assert_eq!(
            client.num_subordinates("childCount").unwrap().attribute_type,
            "numSubordinates"
        );
    }

    #[test]
    fn test_edit_only_type_name() {
        let resource = crate::resource::ConfigResource::<NumSubordinatesVirtualAttribute>::edit_only();
        assert_eq!(
            resource.metadata("pingdirectory"),
            "pingdirectory_default_num_subordinates_virtual_attribute"
        );
    }
}
