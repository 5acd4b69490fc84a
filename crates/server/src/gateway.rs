//! The tool invocation gateway: advertises the catalog and answers tool calls.

use crate::catalog;
use crate::result::to_call_result;
use crate::router;
use linkedin_mcp_client::LinkedInApi;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

pub const SERVER_NAME: &str = "linkedin-mcp-server";

/// Holds nothing that a call writes to: the client reference and an in-flight counter used to
/// drain calls on shutdown. Cloning is cheap and clones share both.
pub struct ToolGateway<A: ?Sized> {
    api: Arc<A>,
    in_flight: TaskTracker,
}

impl<A: ?Sized> Clone for ToolGateway<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<A> ToolGateway<A>
where
    A: LinkedInApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            in_flight: TaskTracker::new(),
        }
    }

    /// The catalog, in stable order.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        catalog::list_tools()
    }

    /// Run one tool call. Never fails: every error becomes an `is_error` result.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let _in_flight = self.in_flight.token();
        info!(tool = name, "Tool called: {name}");

        let arguments = arguments.unwrap_or_default();
        let outcome = router::route(self.api.as_ref(), name, &arguments).await;
        if let Err(err) = &outcome {
            error!(tool = name, error = %err, "Error handling tool {name}: {err}");
        }
        to_call_result(outcome)
    }

    pub(crate) fn in_flight(&self) -> &TaskTracker {
        &self.in_flight
    }
}

impl<A> ServerHandler for ToolGateway<A>
where
    A: LinkedInApi + ?Sized + 'static,
{
    fn get_info(&self) -> ServerInfo {
        let mut implementation = Implementation::default();
        implementation.name = SERVER_NAME.to_string();
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = implementation;
        info.instructions = Some(
            "Tools for reading and editing the authenticated member's LinkedIn profile, \
             sharing posts, and searching people."
                .to_string(),
        );
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.invoke(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_mcp_client::{Person, Post, Profile};
    use linkedin_mcp_test_support::{Call, FakeLinkedIn};
    use serde_json::{Value, json};
    use std::collections::HashSet;

    fn gateway(api: FakeLinkedIn) -> (ToolGateway<FakeLinkedIn>, Arc<FakeLinkedIn>) {
        let api = Arc::new(api);
        (ToolGateway::new(Arc::clone(&api)), api)
    }

    fn args(v: Value) -> Option<JsonObject> {
        v.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> String {
        let v = serde_json::to_value(result).expect("CallToolResult serializes");
        v.get("content")
            .and_then(Value::as_array)
            .and_then(|c| c.first())
            .and_then(|c| c.get("text"))
            .and_then(Value::as_str)
            .expect("content[0].text")
            .to_string()
    }

    fn person(id: &str, first: &str) -> Person {
        Person {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            headline: None,
            profile_url: None,
        }
    }

    #[test]
    fn advertised_tools_match_routed_tools() {
        let (gw, _) = gateway(FakeLinkedIn::new());
        let advertised: HashSet<String> = gw.tools().iter().map(|t| t.name.to_string()).collect();
        let routed: HashSet<String> = catalog::ToolName::ALL
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(advertised.len(), 18);
        assert_eq!(advertised, routed);
    }

    #[test]
    fn server_info_advertises_tools_capability() {
        let (gw, _) = gateway(FakeLinkedIn::new());
        let info = gw.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, SERVER_NAME);
    }

    #[tokio::test]
    async fn get_profile_renders_profile_json() {
        let profile = Profile {
            id: "abc123".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            headline: Some("Rear Admiral".to_string()),
            vanity_name: Some("grace".to_string()),
            profile_url: None,
        };
        let (gw, api) = gateway(FakeLinkedIn::new().with_profile(profile.clone()));
        let result = gw.invoke("get_linkedin_profile", None).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(api.calls(), vec![Call::GetProfile]);

        let rendered: Value = serde_json::from_str(&text_of(&result)).expect("json");
        assert_eq!(rendered["id"], "abc123");
        assert_eq!(rendered["firstName"], "Grace");
        assert_eq!(
            serde_json::from_value::<Profile>(rendered).expect("profile"),
            profile
        );
    }

    #[tokio::test]
    async fn get_posts_forwards_limit_and_renders_all_posts() {
        let posts = vec![
            Post {
                id: "post-1".to_string(),
                text: Some("Test post".to_string()),
                created_at: None,
                visibility: None,
            },
            Post {
                id: "post-2".to_string(),
                text: None,
                created_at: Some(1),
                visibility: Some("PUBLIC".to_string()),
            },
        ];
        let (gw, api) = gateway(FakeLinkedIn::new().with_posts(posts.clone()));

        let result = gw.invoke("get_linkedin_posts", args(json!({ "limit": 5 }))).await;
        assert_eq!(api.calls(), vec![Call::GetPosts { limit: 5 }]);

        let round_trip: Vec<Post> = serde_json::from_str(&text_of(&result)).expect("json");
        assert_eq!(round_trip, posts);
    }

    #[tokio::test]
    async fn omitted_limits_use_tool_defaults() {
        let (gw, api) = gateway(FakeLinkedIn::new());
        gw.invoke("get_linkedin_posts", None).await;
        gw.invoke("get_linkedin_connections", args(json!({}))).await;
        gw.invoke(
            "search_linkedin_people",
            args(json!({ "keywords": "engineer" })),
        )
        .await;
        assert_eq!(
            api.calls(),
            vec![
                Call::GetPosts { limit: 10 },
                Call::GetConnections { limit: 50 },
                Call::SearchPeople {
                    keywords: "engineer".to_string(),
                    limit: 10
                },
            ]
        );
    }

    #[tokio::test]
    async fn connections_and_search_embed_every_id() {
        let people = vec![person("conn-1", "Jane"), person("conn-2", "Bob")];
        let (gw, api) = gateway(
            FakeLinkedIn::new()
                .with_connections(people.clone())
                .with_people(people.clone()),
        );

        let result = gw
            .invoke("get_linkedin_connections", args(json!({ "limit": 25 })))
            .await;
        let text = text_of(&result);
        assert!(text.contains("conn-1") && text.contains("conn-2"));
        assert!(text.contains("Jane"));

        let result = gw
            .invoke(
                "search_linkedin_people",
                args(json!({ "keywords": "engineer", "limit": 15 })),
            )
            .await;
        let found: Vec<Person> = serde_json::from_str(&text_of(&result)).expect("json");
        assert_eq!(found, people);
        assert_eq!(
            api.calls().last(),
            Some(&Call::SearchPeople {
                keywords: "engineer".to_string(),
                limit: 15
            })
        );
    }

    #[tokio::test]
    async fn share_post_renders_share_result() {
        let (gw, api) = gateway(FakeLinkedIn::new());
        let result = gw
            .invoke("share_linkedin_post", args(json!({ "text": "New post" })))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("post-1"));
        assert_eq!(
            api.calls(),
            vec![Call::SharePost {
                text: "New post".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_result() {
        let (gw, _) = gateway(FakeLinkedIn::new());
        let result = gw.invoke("unknown_tool", None).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Unknown tool"));
    }

    #[tokio::test]
    async fn missing_arguments_are_error_results() {
        let (gw, api) = gateway(FakeLinkedIn::new());

        let result = gw.invoke("share_linkedin_post", args(json!({}))).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Text is required"));

        let result = gw.invoke("search_linkedin_people", None).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Keywords are required"));

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn remote_failures_are_error_results() {
        let (gw, _) = gateway(FakeLinkedIn::new().failing_with("API Error"));
        let result = gw.invoke("get_linkedin_profile", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: API Error");
    }

    #[tokio::test]
    async fn add_skill_confirms_with_returned_id() {
        let (gw, _) = gateway(FakeLinkedIn::new());
        let result = gw
            .invoke("add_linkedin_skill", args(json!({ "name": "Rust" })))
            .await;
        assert_eq!(
            text_of(&result),
            "Successfully added skill: Rust (ID: skill-1)"
        );
    }
}
