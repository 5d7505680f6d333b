//! CSV report of subscription and resource group LS tags.

use crate::config::CSV_HEADER;
use crate::models::{ResourceGroup, Subscription};
use std::collections::HashMap;
use std::error::Error;
use std::io::Write;

/// Counts of one report run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub subscriptions: usize,
    pub lines: usize,
}

/// `Name, Id, LS, RGName, RGLS`; an empty subscription LS prints as `?`.
pub fn format_report_line(sub: &Subscription, rg: &ResourceGroup) -> String {
    format!(
        "{}, {}, {}, {}, {}",
        sub.name,
        sub.id,
        sub.ls_display(),
        rg.name,
        rg.ls
    )
}

/// One line per resource group of `sub`, none if it has no resource groups.
pub fn format_report_lines(sub: &Subscription) -> Vec<String> {
    sub.resource_groups
        .values()
        .map(|rg| format_report_line(sub, rg))
        .collect()
}

pub fn write_header<W: Write>(out: &mut W) -> std::io::Result<usize> {
    let header = format!("{CSV_HEADER}\n");
    out.write_all(header.as_bytes())?;
    log::info!("wrote {} bytes", header.len());
    Ok(header.len())
}

/// Write the report lines of every subscription.
///
/// `fetch_resource_groups` is called once per subscription, in map order, and
/// its result is stored on the subscription before its lines are written.
/// The first error, from the fetch or from `out`, stops the report.
pub fn write_report<W, F>(
    out: &mut W,
    subscriptions: &mut HashMap<String, Subscription>,
    mut fetch_resource_groups: F,
) -> Result<ReportSummary, Box<dyn Error>>
where
    W: Write,
    F: FnMut(&Subscription) -> Result<HashMap<String, ResourceGroup>, Box<dyn Error>>,
{
    let mut summary = ReportSummary::default();
    for sub in subscriptions.values_mut() {
        sub.resource_groups = fetch_resource_groups(sub)?;
        for line in format_report_lines(sub) {
            println!("{line}");
            writeln!(out, "{line}")
                .map_err(|e| format!("Error writing report line for '{}': {e}", sub.name))?;
            summary.lines += 1;
        }
        summary.subscriptions += 1;
    }
    out.flush()
        .map_err(|e| format!("Error flushing report: {e}"))?;
    Ok(summary)
}
