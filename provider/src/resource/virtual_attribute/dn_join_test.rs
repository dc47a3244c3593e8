//! Unit tests for the DN Join Virtual Attribute resource

#[cfg(test)]
mod tests {
    use super::super::DnJoinVirtualAttribute;
    use crate::resource::ConfigObject;
    use crate::test_utils::*;
    use pingdirectory_client::{ConfigMessages, JoinScope, Operation, RequiredAction};
    use plugin_framework::{AttrValue, Diagnostics, Plan, ReadResult, Resource, State, UNKNOWN_VALUE};
    use serde_json::{json, Value};

    const ID: &str = "managerOf";

    fn plan() -> Value {
        json!({
            "id": ID,
            "description": "",
            "join_dn_attribute": "manager",
            "join_base_dn_type": "use-search-base-dn",
            "join_scope": UNKNOWN_VALUE,
            "join_size_limit": UNKNOWN_VALUE,
            "enabled": true,
            "attribute_type": "managerOf",
            "base_dn": ["dc=example,dc=com"],
            "notifications": UNKNOWN_VALUE,
            "required_actions": UNKNOWN_VALUE
        })
    }

    async fn create(client: &pingdirectory_client::MockConfigApiClient) -> State {
        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(client)
            .create(Plan::new(plan()), &mut diags)
            .await;
        assert!(!diags.has_error(), "{:?}", diags);
        state.unwrap()
    }

    #[tokio::test]
    async fn test_create_fills_server_defaults() {
        let client = mock_client();
        let state = create(&client).await;

        let mut diags = Diagnostics::new();
        let model: DnJoinVirtualAttribute = state.get(&mut diags).unwrap();
        assert_eq!(model.join_scope, AttrValue::string("whole-subtree"));
        assert_eq!(model.join_size_limit, AttrValue::Known(0));
        assert_eq!(model.description, AttrValue::string(""));
        assert_eq!(model.join_attribute, AttrValue::set(Vec::<String>::new()));
        assert_eq!(model.notifications, AttrValue::set(Vec::<String>::new()));

        let stored = client.dn_join(ID).unwrap();
        assert_eq!(stored.description, None);
        assert_eq!(stored.join_scope, Some(JoinScope::WholeSubtree));
    }

    #[tokio::test]
    async fn test_invalid_enum_fails_before_any_request() {
        let client = mock_client();
        let mut plan = plan();
        plan["join_scope"] = json!("subtree");

        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(&client)
            .create(Plan::new(plan), &mut diags)
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors().next().unwrap().attribute.as_deref(), Some("join_scope"));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_read_after_create_is_identical() {
        let client = mock_client();
        let state = create(&client).await;

        let mut diags = Diagnostics::new();
        let refreshed = managed::<DnJoinVirtualAttribute>(&client)
            .read(state.clone(), &mut diags)
            .await;

        assert_eq!(refreshed, Some(ReadResult::Present(state)));
    }

    #[tokio::test]
    async fn test_read_of_missing_object_removes_it() {
        let client = mock_client();
        let mut diags = Diagnostics::new();
        let result = managed::<DnJoinVirtualAttribute>(&client)
            .read(State::new(json!({"id": "gone"})), &mut diags)
            .await;

        assert_eq!(result, Some(ReadResult::Removed));
        assert!(!diags.has_error());
        assert_eq!(diags.warnings().count(), 1);
    }

    #[tokio::test]
    async fn test_update_patches_only_changed_fields() {
        let client = mock_client();
        let prior = create(&client).await;

        let mut plan = prior.raw().clone();
        plan["enabled"] = json!(false);
        plan["base_dn"] = json!(["dc=example,dc=com", "ou=people,dc=example,dc=com"]);
        plan["join_filter"] = json!("(objectClass=person)");

        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(&client)
            .update(Plan::new(plan), prior, &mut diags)
            .await
            .unwrap();

        let calls = client.update_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].operations,
            vec![
                Operation::replace("join-filter", "(objectClass=person)"),
                Operation::replace("enabled", "false"),
                Operation::add("base-dn", "ou=people,dc=example,dc=com"),
            ]
        );
        assert_eq!(state.raw()["enabled"], json!(false));
        assert_eq!(client.dn_join(ID).unwrap().join_filter.as_deref(), Some("(objectClass=person)"));
    }

    #[tokio::test]
    async fn test_update_without_changes_makes_no_request() {
        let client = mock_client();
        let prior = create(&client).await;
        let requests = client.request_count();

        let mut plan = prior.raw().clone();
        plan["notifications"] = json!(UNKNOWN_VALUE);

        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(&client)
            .update(Plan::new(plan), prior.clone(), &mut diags)
            .await;

        assert_eq!(state, Some(prior));
        assert_eq!(client.request_count(), requests);
    }

    #[tokio::test]
    async fn test_update_rejects_identifier_change() {
        let client = mock_client();
        let prior = create(&client).await;

        let mut plan = prior.raw().clone();
        plan["id"] = json!("renamed");

        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(&client)
            .update(Plan::new(plan), prior, &mut diags)
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors().next().unwrap().summary, "Cannot change identifier");
        assert!(client.update_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_remote_untouched() {
        let client = mock_client();
        let prior = create(&client).await;
        client.fail_with(400, "The value of property join-filter is invalid");

        let mut plan = prior.raw().clone();
        plan["enabled"] = json!(false);
        plan["join_filter"] = json!("(bad");

        let mut diags = Diagnostics::new();
        let state = managed::<DnJoinVirtualAttribute>(&client)
            .update(Plan::new(plan), prior, &mut diags)
            .await;

        assert!(state.is_none());
        let error = diags.errors().next().unwrap();
        assert!(error.detail.contains("HTTP status: 400"));
        assert!(error.detail.contains("join-filter is invalid"));
        let stored = client.dn_join(ID).unwrap();
        assert!(stored.enabled);
        assert_eq!(stored.join_filter, None);
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let client = mock_client();
        let state = create(&client).await;

        let mut diags = Diagnostics::new();
        let resource = managed::<DnJoinVirtualAttribute>(&client);
        assert_eq!(resource.delete(state.clone(), &mut diags).await, Some(()));
        assert!(client.dn_join(ID).is_none());

        // Already gone is not an error
        assert_eq!(resource.delete(state, &mut diags).await, Some(()));
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn test_messages_are_kept_in_state() {
        let client = mock_client();
        client.set_messages(ConfigMessages {
            notifications: vec!["The virtual attribute will be used after the next restart".to_string()],
            required_actions: vec![RequiredAction {
                property: None,
                action_type: "restart".to_string(),
                synopsis: "Restart the server".to_string(),
            }],
        });

        let state = create(&client).await;
        assert_eq!(
            state.raw()["notifications"],
            json!(["The virtual attribute will be used after the next restart"])
        );
        assert_eq!(state.raw()["required_actions"], json!(["restart: Restart the server"]));
    }

    #[tokio::test]
    async fn test_unconfigured_resource_reports_error() {
        let mut diags = Diagnostics::new();
        let state = crate::resource::ConfigResource::<DnJoinVirtualAttribute>::managed()
            .create(Plan::new(plan()), &mut diags)
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors().next().unwrap().summary, "Unconfigured resource");
    }

    #[test]
    fn test_empty_and_absent_description_send_same_request() {
        let mut diags = Diagnostics::new();
        let with_empty: DnJoinVirtualAttribute = Plan::new(plan()).get(&mut diags).unwrap();
        let mut without = plan();
        without.as_object_mut().unwrap().remove("description");
        let without: DnJoinVirtualAttribute = Plan::new(without).get(&mut diags).unwrap();

        let request = with_empty.add_request().unwrap();
        assert_eq!(request, without.add_request().unwrap());
        assert_eq!(request.description, None);
        assert_eq!(request.join_scope, None);
        assert_eq!(request.base_dn, Some(vec!["dc=example,dc=com".to_string()]));
    }

    #[test]
    fn test_schema_matches_field_table() {
        let resource = crate::resource::ConfigResource::<DnJoinVirtualAttribute>::managed();
        let schema = resource.schema();
        let join_scope = schema.attribute("join_scope").unwrap();
        assert!(join_scope.optional && join_scope.computed);
        assert_eq!(
            join_scope.allowed_values.as_deref().unwrap(),
            ["base-object", "single-level", "whole-subtree", "subordinate-subtree"]
        );
        assert_eq!(resource.metadata("pingdirectory"), "pingdirectory_dn_join_virtual_attribute");
    }
}
