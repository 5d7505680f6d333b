//! Azure CLI and Resource Graph interaction.
//!
//! - [`cli`] - Command execution for Azure CLI
//! - [`auth`] - Login check before querying
//! - [`graph`] - Resource Graph queries and result rendering

mod auth;
mod cli;
mod graph;

// Re-export public types and functions
pub use auth::{ensure_logged_in, Account};
pub use cli::run;
pub use graph::{
    parse_graph_response, render_object_array, resource_group_query, subscription_query,
    truncation_warning, validate_subscription_id, AzCliGraph, GraphResponse, QueryService,
};
