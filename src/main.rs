use anyhow::Result;
use tracing::info;

use product_price_tracker::{
    cli,
    config,
    error::TrackerError,
    fetcher::HttpFetcher,
    logging,
    parser::ScraperLocator,
    tracker,
};

fn main() -> Result<()> {
    logging::init_logging();

    let opts = cli::parse();
    let cfg = opts.to_config();
    let date = match opts.date {
        Some(date) => date,
        None => cfg.today()?,
    };
    let fetcher = HttpFetcher::new(&cfg)?;

    match tracker::run(&cfg, &config::date_key(date), &fetcher, &ScraperLocator) {
        Ok(report) => {
            info!(date = %report.date, recorded = report.recorded(), failed = report.failed(), "run finished");
            Ok(())
        }
        Err(err @ TrackerError::ProductsNotFound(_)) => {
            println!("{err}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
