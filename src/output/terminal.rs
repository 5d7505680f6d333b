//! Terminal output utilities.

use super::csv::ReportSummary;
use colored::Colorize;

pub const BANNER: &str = "LS - By Subscription and Resource Groups";

pub fn print_banner() {
    println!("{}", BANNER.bold());
}

pub fn print_summary(summary: &ReportSummary, report_file: &str) {
    println!(
        "{done} {lines} line(s) for {subs} subscription(s) written to {file}",
        done = "#Done".on_green(),
        lines = summary.lines,
        subs = summary.subscriptions,
        file = report_file.blue(),
    );
}
