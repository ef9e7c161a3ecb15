//! MCP server handler exposing the Cost Plus Drugs tools and the static
//! collections resource.

use rmcp::model as m;
use rmcp::model::AnnotateAble;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use std::sync::Arc;

use costplus_async::ClassifiedError;

use crate::collections::{self, COLLECTIONS_URI};
use crate::envelope::{Envelope, FailureContext};
use crate::models::{GetAllProductsInput, GetCollectionsInput, SearchMedicinesInput};
use crate::CostPlusTools;

const SEARCH_MEDICINES_DESC: &str = "Search for medications by name. Finds medications whose \
     name, brand name, or collection name matches the query (e.g. 'metformin', 'aspirin'). \
     To browse by category instead, use get_collections to find a collection id and pass it \
     to get_all_products.";

const GET_COLLECTIONS_DESC: &str = "Browse the available medication categories (Diabetes, \
     Heart Health, Mental Health, ...). Pass no parameters for all ~90 categories, or a search \
     term to narrow by name. Returns each category's id for use with get_all_products.";

const GET_ALL_PRODUCTS_DESC: &str = "Retrieve medications with pagination, always sorted \
     alphabetically by name. Accepts a collection filter as a base64 id \
     ('Q29sbGVjdGlvbjozMQ=='), a numeric id (31), or an array of ids, plus relay-style \
     before/after cursors and a page size (first, default 25, max 1000).";

const COLLECTIONS_RESOURCE_DESC: &str = "Static snapshot of the Cost Plus Drugs medication \
     categories with their ids, names, and slugs. Append ?query= to filter by name or slug.";

/// MCP server wrapper around [`CostPlusTools`].
pub struct CostPlusServer {
    tools: Arc<CostPlusTools>,
    name: String,
    version: String,
}

impl CostPlusServer {
    /// Create a new server around the tool service.
    pub fn new(tools: Arc<CostPlusTools>) -> Self {
        Self {
            tools,
            name: "costplus-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the server name and version.
    #[must_use]
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Names of the exposed tools.
    #[must_use]
    pub fn tool_names() -> [&'static str; 3] {
        ["search_medicines", "get_collections", "get_all_products"]
    }

    fn tool_entry<T: schemars::JsonSchema>(name: &'static str, description: &'static str) -> m::Tool {
        let schema_json = serde_json::to_value(schemars::schema_for!(T))
            .unwrap_or(serde_json::json!({"type": "object"}));

        m::Tool {
            name: name.into(),
            title: Some(name.to_string()),
            description: Some(description.into()),
            input_schema: Arc::new(schema_json.as_object().cloned().unwrap_or_default()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
        }
    }

    fn envelope_result(envelope: &Envelope) -> m::CallToolResult {
        m::CallToolResult {
            content: vec![m::Content::text(envelope.to_json_text())],
            structured_content: None,
            is_error: Some(envelope.is_error()),
            meta: None,
        }
    }

    /// Deserializes tool arguments, turning any mismatch into a validation
    /// failure envelope so the caller still gets the uniform shape.
    fn parse_input<T: serde::de::DeserializeOwned>(
        tool_name: &'static str,
        args: serde_json::Value,
    ) -> Result<T, Box<Envelope>> {
        serde_json::from_value(args.clone()).map_err(|e| {
            let error = ClassifiedError::validation(
                format!("invalid tool input: {e}"),
                format!("{tool_name} input"),
            );
            error.log(tool_name);
            Box::new(Envelope::failure(
                error,
                None,
                FailureContext {
                    tool_name,
                    user_input: args,
                },
            ))
        })
    }

    fn read_collections(uri: &str) -> String {
        // Supports an optional ?query= substring filter on the URI. The value
        // arrives percent-encoded, with '+' standing in for a space.
        let query = uri
            .split_once('?')
            .and_then(|(_, qs)| {
                qs.split('&')
                    .find_map(|pair| pair.strip_prefix("query="))
            })
            .map(|raw| {
                let spaced = raw.replace('+', " ");
                urlencoding::decode(&spaced)
                    .map_or_else(|_| spaced.clone(), |decoded| decoded.into_owned())
            })
            .unwrap_or_default();

        let entries: Vec<String> = collections::search(&query)
            .into_iter()
            .map(collections::render_entry)
            .collect();
        entries.join("\n\n")
    }

    /// The collections URI itself, optionally followed by a query string.
    fn is_collections_uri(uri: &str) -> bool {
        uri.strip_prefix(COLLECTIONS_URI)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('?'))
    }
}

// Allow manual_async_fn because the trait signature uses `impl Future` return types
#[allow(clippy::manual_async_fn)]
impl ServerHandler for CostPlusServer {
    fn initialize(
        &self,
        _params: m::InitializeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::InitializeResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::InitializeResult {
                server_info: m::Implementation {
                    name: self.name.clone(),
                    title: self.name.clone().into(),
                    version: self.version.clone(),
                    website_url: None,
                    icons: None,
                },
                capabilities: m::ServerCapabilities::builder()
                    .enable_tools()
                    .enable_resources()
                    .build(),
                ..Default::default()
            })
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: vec![
                    Self::tool_entry::<SearchMedicinesInput>(
                        "search_medicines",
                        SEARCH_MEDICINES_DESC,
                    ),
                    Self::tool_entry::<GetCollectionsInput>(
                        "get_collections",
                        GET_COLLECTIONS_DESC,
                    ),
                    Self::tool_entry::<GetAllProductsInput>(
                        "get_all_products",
                        GET_ALL_PRODUCTS_DESC,
                    ),
                ],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move {
            let args = serde_json::Value::Object(req.arguments.unwrap_or_default());

            let envelope = match req.name.as_ref() {
                "search_medicines" => {
                    match Self::parse_input::<SearchMedicinesInput>("search_medicines", args) {
                        Ok(input) => self.tools.search_medicines(input).await,
                        Err(envelope) => *envelope,
                    }
                }
                "get_collections" => {
                    match Self::parse_input::<GetCollectionsInput>("get_collections", args) {
                        Ok(input) => self.tools.get_collections(input).await,
                        Err(envelope) => *envelope,
                    }
                }
                "get_all_products" => {
                    match Self::parse_input::<GetAllProductsInput>("get_all_products", args) {
                        Ok(input) => self.tools.get_all_products(input).await,
                        Err(envelope) => *envelope,
                    }
                }
                other => {
                    return Ok(m::CallToolResult::error(vec![m::Content::text(format!(
                        "Unknown tool '{other}'"
                    ))]));
                }
            };

            Ok(Self::envelope_result(&envelope))
        }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn list_resources(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourcesResult, m::ErrorData>> + Send + '_
    {
        async {
            let mut raw = m::RawResource::new(COLLECTIONS_URI, "costplus_collections");
            raw.description = Some(COLLECTIONS_RESOURCE_DESC.to_string());
            raw.mime_type = Some("text/plain".to_string());

            Ok(m::ListResourcesResult {
                resources: vec![raw.no_annotation()],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn list_resource_templates(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourceTemplatesResult, m::ErrorData>>
    + Send
    + '_ {
        async {
            Ok(m::ListResourceTemplatesResult {
                resource_templates: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        req: m::ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ReadResourceResult, m::ErrorData>> + Send + '_
    {
        async move {
            let uri = req.uri.as_ref();
            if !Self::is_collections_uri(uri) {
                return Err(m::ErrorData::invalid_request(
                    format!("Unknown resource '{uri}'"),
                    None,
                ));
            }

            Ok(m::ReadResourceResult {
                contents: vec![m::ResourceContents::text(
                    Self::read_collections(uri),
                    COLLECTIONS_URI,
                )],
            })
        }
    }

    fn list_prompts(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListPromptsResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListPromptsResult {
                prompts: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn get_prompt(
        &self,
        _req: m::GetPromptRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::GetPromptResult, m::ErrorData>> + Send + '_
    {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }

    fn subscribe(
        &self,
        _req: m::SubscribeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }

    fn unsubscribe(
        &self,
        _req: m::UnsubscribeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_schemas_are_objects() {
        let tool = CostPlusServer::tool_entry::<GetAllProductsInput>("get_all_products", "desc");
        assert_eq!(
            tool.input_schema.get("type").and_then(|t| t.as_str()),
            Some("object")
        );
        let props = tool.input_schema.get("properties").unwrap();
        assert!(props.get("collection").is_some());
        assert!(props.get("first").is_some());
    }

    #[test]
    fn collections_read_supports_query_filter() {
        let all = CostPlusServer::read_collections(COLLECTIONS_URI);
        assert!(all.contains("Name: Diabetes"));
        assert!(all.contains("Name: Women's Health"));

        let filtered =
            CostPlusServer::read_collections(&format!("{COLLECTIONS_URI}?query=diabetes"));
        assert!(filtered.contains("Q29sbGVjdGlvbjozMQ=="));
        assert!(!filtered.contains("Heart Health"));
    }

    #[test]
    fn collections_read_decodes_percent_encoded_query() {
        let encoded =
            CostPlusServer::read_collections(&format!("{COLLECTIONS_URI}?query=heart%20health"));
        assert!(encoded.contains("Name: Heart Health"));
        assert!(!encoded.contains("Name: Diabetes"));

        // '+' is the query-string spelling of a space.
        let plus =
            CostPlusServer::read_collections(&format!("{COLLECTIONS_URI}?query=heart+health"));
        assert!(plus.contains("Name: Heart Health"));
    }

    #[test]
    fn resource_uri_must_match_collections_base_exactly() {
        assert!(CostPlusServer::is_collections_uri(COLLECTIONS_URI));
        assert!(CostPlusServer::is_collections_uri(&format!(
            "{COLLECTIONS_URI}?query=diabetes"
        )));

        assert!(!CostPlusServer::is_collections_uri(&format!(
            "{COLLECTIONS_URI}foo"
        )));
        assert!(!CostPlusServer::is_collections_uri("costplus://other"));
    }

    #[test]
    fn bad_input_becomes_validation_envelope() {
        let result = CostPlusServer::parse_input::<GetAllProductsInput>(
            "get_all_products",
            serde_json::json!({"first": "not-a-number"}),
        );
        let envelope = *result.unwrap_err();
        assert!(envelope.is_error());

        let value: serde_json::Value =
            serde_json::from_str(&envelope.to_json_text()).unwrap();
        assert_eq!(value["error"]["kind"], "validation");
        assert_eq!(value["context"]["user_input"]["first"], "not-a-number");
    }
}
