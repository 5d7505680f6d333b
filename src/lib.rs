pub mod azure;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use azure::{resource_group_query, subscription_query, QueryService};
use models::{ResourceGroup, Subscription};
use output::{write_header, write_report, ReportSummary};
use processing::{extract_resource_groups, extract_subscriptions};
use std::collections::HashMap;
use std::error::Error;
use std::io::Write;

/// All subscriptions visible to the signed-in user, keyed by name.
pub fn get_subscriptions<Q: QueryService + ?Sized>(
    service: &Q,
) -> Result<HashMap<String, Subscription>, Box<dyn Error>> {
    log::info!("- getSubscriptions");
    let raw = service.query(&subscription_query())?;
    extract_subscriptions(&raw)
}

/// Resource groups of one subscription, keyed by name.
pub fn get_resource_groups<Q: QueryService + ?Sized>(
    service: &Q,
    subscription_id: &str,
) -> Result<HashMap<String, ResourceGroup>, Box<dyn Error>> {
    log::info!("- getLSByResourceGroups {subscription_id}");
    let query = resource_group_query(subscription_id)?;
    let raw = service.query(&query)?;
    extract_resource_groups(&raw)
}

/// Query everything and write the CSV report to `out`.
pub fn run_report<Q: QueryService + ?Sized, W: Write>(
    service: &Q,
    out: &mut W,
) -> Result<ReportSummary, Box<dyn Error>> {
    let started = chrono::Local::now();
    log::info!("#Start run_report() at {}", started.format("%Y-%m-%d %H:%M:%S"));

    let mut subscriptions = get_subscriptions(service)?;
    log::info!("Found {} subscriptions", subscriptions.len());

    write_header(out).map_err(|e| format!("Error writing report header: {e}"))?;
    let summary = write_report(out, &mut subscriptions, |sub| {
        get_resource_groups(service, &sub.id)
    })?;

    log::info!(
        "#End run_report() {} lines for {} subscriptions in {}s",
        summary.lines,
        summary.subscriptions,
        (chrono::Local::now() - started).num_seconds()
    );
    Ok(summary)
}
