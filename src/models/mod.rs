//! Domain models for the LS report.
//!
//! - [`Subscription`] - Azure subscription with its LS tag
//! - [`ResourceGroup`] - Resource group with its LS tag

mod resource_group;
mod subscription;

// Re-export public types
pub use resource_group::ResourceGroup;
pub use subscription::Subscription;
