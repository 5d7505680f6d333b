//! Report output.
//!
//! - [`csv`] - The `statisticLS.csv` report
//! - [`terminal`] - Banner and summary on stdout

mod csv;
mod terminal;

pub use csv::{format_report_line, format_report_lines, write_header, write_report, ReportSummary};
pub use terminal::{print_banner, print_summary};
