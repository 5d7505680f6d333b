use azure_ls_report::azure::AzCliGraph;
use azure_ls_report::config::{self, Config};
use azure_ls_report::output::{print_banner, print_summary};
use azure_ls_report::run_report;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    log4rs::init_file(config::log_config_path(), Default::default())
        .expect("Error initializing log4rs");
    log::info!("#Start main()");

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        e
    })?;
    print_banner();

    let service = AzCliGraph::authorize(config.page_size).map_err(|e| {
        log::error!("Authentication failed: {e}");
        e
    })?;

    let file = File::create(&config.report_file).expect("Error creating report file");
    let mut out = BufWriter::new(file);

    let summary = run_report(&service, &mut out).map_err(|e| {
        log::error!("Report failed: {e}");
        e
    })?;
    print_summary(&summary, &config.report_file);

    Ok(())
}
