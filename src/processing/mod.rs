//! Result extraction pipeline.
//!
//! Turns the textual rendering of query rows into typed records:
//! - [`tokenizer`] - Escape and split the raw result
//! - [`field_scanner`] - Find `label:value` fields in a token
//! - [`assembler`] - Collect fields into records
//! - [`extractors`] - Subscription and resource group configurations

pub mod assembler;
pub mod extractors;
pub mod field_scanner;
pub mod tokenizer;

// Re-export public functions
pub use assembler::{AssemblerState, Extractable, FieldSpec, RecordAssembler};
pub use extractors::{
    extract_resource_groups, extract_subscriptions, strip_subscription_prefix, ResultDecoder,
    TokenScanDecoder,
};
pub use tokenizer::tokenize;
