//! Subscription and resource group extraction from raw query results.

use super::assembler::{Extractable, FieldSpec, RecordAssembler};
use super::field_scanner::normalize_numeric_ls;
use super::tokenizer::tokenize;
use crate::config::SUBSCRIPTION_ID_PREFIX;
use crate::models::{ResourceGroup, Subscription};
use std::collections::HashMap;
use std::error::Error;

/// Turns a raw query result into records keyed by name.
///
/// Implementations document the upstream text shape they accept, so a
/// structured decoder can replace [`TokenScanDecoder`] without touching callers.
pub trait ResultDecoder {
    fn decode<R: Extractable>(&self, raw: &str) -> Result<HashMap<String, R>, Box<dyn Error>>;
}

/// Label scanning decoder for the object-array debug rendering
/// (`[map[k:v k:v] map[...]]`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenScanDecoder;

impl TokenScanDecoder {
    pub const FORMAT_VERSION: &'static str = "object-array-debug/1";
}

impl ResultDecoder for TokenScanDecoder {
    fn decode<R: Extractable>(&self, raw: &str) -> Result<HashMap<String, R>, Box<dyn Error>> {
        let mut assembler = RecordAssembler::<R>::new();
        for token in tokenize(raw)? {
            assembler.observe(&token);
        }
        log::debug!(
            "decoded {} record(s) with {}",
            assembler.emitted(),
            Self::FORMAT_VERSION
        );
        Ok(assembler.finish())
    }
}

/// Remove the `/subscriptions/` prefix from a subscription resource id.
pub fn strip_subscription_prefix(id: &str) -> String {
    id.strip_prefix(SUBSCRIPTION_ID_PREFIX)
        .unwrap_or(id)
        .to_string()
}

impl Extractable for Subscription {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::raw("name:"),
        FieldSpec::new("id:", strip_subscription_prefix),
        FieldSpec::raw("LS:"),
    ];

    fn from_fields(values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let name = values.next().unwrap_or_default();
        let id = values.next().unwrap_or_default();
        let ls = values.next().unwrap_or_default();
        Subscription::new(&name, &id, &ls)
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Extractable for ResourceGroup {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::raw("name:"),
        FieldSpec::new("tags_Leistungsschein:", normalize_numeric_ls),
    ];

    fn from_fields(values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let name = values.next().unwrap_or_default();
        let ls = values.next().unwrap_or_default();
        ResourceGroup { name, ls }
    }

    fn key(&self) -> &str {
        &self.name
    }
}

/// Subscriptions in `raw`, keyed by name.
pub fn extract_subscriptions(raw: &str) -> Result<HashMap<String, Subscription>, Box<dyn Error>> {
    log::info!("  - extract subscriptions");
    TokenScanDecoder.decode(raw)
}

/// Resource groups in `raw`, keyed by name.
pub fn extract_resource_groups(
    raw: &str,
) -> Result<HashMap<String, ResourceGroup>, Box<dyn Error>> {
    log::info!("  - extract resource groups");
    TokenScanDecoder.decode(raw)
}
