use clap::Parser;
use log::{error, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod booth;

use crate::args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Info);
    logger.parse_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = booth::run_booth(&args).await {
        error!("{}", e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            error!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
