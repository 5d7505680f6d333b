//! Azure Resource Graph queries.
//!
//! The report only sees query results as text. [`AzCliGraph`] runs
//! `az graph query` and renders the returned rows in the object-array debug
//! shape (`[map[k:v k:v] map[...]]`) the extraction pipeline expects.

use super::auth::{self, Account};
use super::cli;
use crate::config::LS_TAG;
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::sync::OnceLock;

/// Runs a Resource Graph query and returns the rendered rows.
pub trait QueryService {
    fn query(&self, query: &str) -> Result<String, Box<dyn Error>>;
}

/// Query listing all visible subscriptions with their LS tag.
pub fn subscription_query() -> String {
    format!(
        r#"resourcecontainers | where type == "microsoft.resources/subscriptions" | project name, id, LS=tostring(tags.{LS_TAG})"#
    )
}

/// Query listing the resource groups of one subscription.
///
/// `subscription_id` must be a bare GUID, anything else is rejected before it
/// reaches the query text.
pub fn resource_group_query(subscription_id: &str) -> Result<String, Box<dyn Error>> {
    validate_subscription_id(subscription_id)?;
    Ok(format!(
        r#"resourcecontainers | where type == "microsoft.resources/subscriptions/resourcegroups" | project name, tags.{LS_TAG}, subId=subscriptionId | where subId == "{subscription_id}""#
    ))
}

static GUID_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_guid_regex() -> &'static Regex {
    GUID_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("Invalid Regex")
    })
}

pub fn validate_subscription_id(subscription_id: &str) -> Result<(), Box<dyn Error>> {
    if get_guid_regex().is_match(subscription_id) {
        Ok(())
    } else {
        Err(format!("Subscription id is not a GUID: '{subscription_id}'").into())
    }
}

/// Response envelope of `az graph query --output json`.
#[derive(Deserialize, Debug, Default)]
pub struct GraphResponse {
    /// Result rows.
    pub data: Vec<Map<String, Value>>,
    /// Token for the next page, set when rows were cut off.
    pub skip_token: Option<String>,
    /// Total number of records matching the query.
    pub total_records: Option<u64>,
    /// Count of records in this response.
    #[serde(default)]
    pub count: i64,
}

/// Resource Graph through the Azure CLI.
#[derive(Debug, Clone)]
pub struct AzCliGraph {
    page_size: u32,
}

impl AzCliGraph {
    /// Check the CLI login and return a client, or fail.
    pub fn authorize(page_size: u32) -> Result<AzCliGraph, Box<dyn Error>> {
        AzCliGraph::authorize_with(page_size, auth::ensure_logged_in)
    }

    /// Like [`AzCliGraph::authorize`] with the login check supplied by the caller.
    fn authorize_with<F>(page_size: u32, check_login: F) -> Result<AzCliGraph, Box<dyn Error>>
    where
        F: FnOnce() -> Result<Account, Box<dyn Error>>,
    {
        check_login()?;
        Ok(AzCliGraph { page_size })
    }
}

impl QueryService for AzCliGraph {
    fn query(&self, query: &str) -> Result<String, Box<dyn Error>> {
        log::info!("  - execute query : {query}");
        if query.contains('\'') {
            return Err(format!("Query must not contain single quotes: {query}").into());
        }
        let cmd = format!(
            "az graph query --first {} -q '{query}' --output json",
            self.page_size
        );
        let output = cli::run(&cmd)?;
        let response = parse_graph_response(&output)?;

        if let Some(warning) = truncation_warning(&response) {
            log::warn!("{warning}");
        }
        log::debug!("got {} rows", response.data.len());
        Ok(render_object_array(&response.data))
    }
}

pub fn parse_graph_response(json: &str) -> Result<GraphResponse, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let response = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", json);
        format!("Error parsing graph response: path={} error={}", e.path(), e)
    })?;
    Ok(response)
}

/// Warning text when the response holds only part of the matching rows.
pub fn truncation_warning(response: &GraphResponse) -> Option<String> {
    response.skip_token.as_ref().map(|token| {
        format!(
            "Result truncated at {} of {:?} records (skip_token={token})",
            response.count, response.total_records
        )
    })
}

/// Render rows as `[map[k:v ...] map[...]]`, keys in byte order.
pub fn render_object_array(rows: &[Map<String, Value>]) -> String {
    format!("[{}]", rows.iter().map(render_map).join(" "))
}

fn render_map(map: &Map<String, Value>) -> String {
    format!(
        "map[{}]",
        map.iter()
            .map(|(k, v)| format!("{k}:{}", render_value(v)))
            .join(" ")
    )
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{}]", items.iter().map(render_value).join(" ")),
        Value::Object(map) => render_map(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB_ID: &str = "0a1b2c3d-0000-1111-2222-333344445555";

    #[test]
    fn test_resource_group_query() {
        let query = resource_group_query(SUB_ID).expect("valid id");
        assert!(query.ends_with(&format!(r#"where subId == "{SUB_ID}""#)));
        assert!(query.contains("tags.Leistungsschein"));
    }

    #[test]
    fn test_resource_group_query_rejects_injection() {
        assert!(resource_group_query(r#"x" or 1==1 or subId == ""#).is_err());
        assert!(resource_group_query("/subscriptions/0a1b2c3d-0000-1111-2222-333344445555").is_err());
        assert!(resource_group_query("").is_err());
    }

    #[test]
    fn test_subscription_query() {
        assert!(subscription_query().ends_with("LS=tostring(tags.Leistungsschein)"));
    }

    #[test]
    fn test_render_object_array() {
        let json = r#"{
            "count": 2,
            "data": [
                {"name": "sub-A", "id": "/subscriptions/1111", "LS": "4711"},
                {"name": "sub-B", "id": "/subscriptions/2222", "LS": ""}
            ],
            "skip_token": null,
            "total_records": 2
        }"#;
        let response = parse_graph_response(json).expect("valid response");
        assert_eq!(response.count, 2);
        assert_eq!(response.total_records, Some(2));
        assert_eq!(
            render_object_array(&response.data),
            "[map[LS:4711 id:/subscriptions/1111 name:sub-A] map[LS: id:/subscriptions/2222 name:sub-B]]"
        );
    }

    #[test]
    fn test_render_nested_values() {
        let json = r#"{"data": [{"name": "rg-1", "tags_Leistungsschein": null, "n": 3, "t": {"b": [1, true]}}]}"#;
        let response = parse_graph_response(json).expect("valid response");
        assert_eq!(
            render_object_array(&response.data),
            "[map[n:3 name:rg-1 t:map[b:[1 true]] tags_Leistungsschein:<nil>]]"
        );
    }

    fn logged_in() -> Result<Account, Box<dyn Error>> {
        Ok(Account::default())
    }

    #[test]
    fn test_authorize_fails_without_login() {
        let result = AzCliGraph::authorize_with(10, || Err("Please run 'az login'".into()));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("az login"));
    }

    #[test]
    fn test_authorize_keeps_page_size() {
        let graph = AzCliGraph::authorize_with(10, logged_in).expect("logged in");
        assert_eq!(graph.page_size, 10);
    }

    #[test]
    fn test_query_rejects_single_quote() {
        let graph = AzCliGraph::authorize_with(10, logged_in).expect("logged in");
        let err = graph
            .query("resourcecontainers | where name == 'x'")
            .unwrap_err();
        assert!(err.to_string().contains("single quotes"));
    }

    #[test]
    fn test_truncation_warning() {
        let json = std::fs::read_to_string("src/tests/test_data/graph_truncated_01.json")
            .expect("Error reading fixture");
        let response = parse_graph_response(&json).expect("valid response");
        let warning = truncation_warning(&response).expect("truncated response");
        assert!(warning.contains("skip_token=ew0KICAiJGlkIjogIjEi"));
        assert!(warning.contains("at 1 of Some(3) records"));
    }

    #[test]
    fn test_no_truncation_warning() {
        let response = parse_graph_response(r#"{"data": [], "skip_token": null}"#).expect("valid");
        assert_eq!(truncation_warning(&response), None);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_object_array(&[]), "[]");
    }

    #[test]
    fn test_parse_graph_response_error_path() {
        let err = parse_graph_response(r#"{"data": [1]}"#).unwrap_err();
        assert!(err.to_string().contains("data"));
    }
}
