use liq_cache_exporter::config::Config;
use liq_cache_exporter::csv::{export_results_csv, ResultRow};
use liq_cache_exporter::exporter::export;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let enriched = match export(&config.cache_file, &config.output_file) {
        Ok(enriched) => enriched,
        Err(e) => {
            error!("{e}");
            println!("Export failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(csv_file) = &config.csv_file {
        let rows = ResultRow::from_cache(&enriched);
        if let Err(e) = export_results_csv(&rows, csv_file) {
            error!("Failed to write {}: {e}", csv_file.display());
            println!("Export failed: {e}");
            return ExitCode::FAILURE;
        }
        info!("Wrote {} result rows to {}", rows.len(), csv_file.display());
    }

    println!("\nTo open the visualizer:");
    println!("   1. serve this directory with any static file server (e.g. on port 8000)");
    println!("   2. open http://localhost:8000/visualizer.html");

    ExitCode::SUCCESS
}
