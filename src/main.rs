use std::env;
use std::process;

use log::error;
use structopt::StructOpt;

use promconv::cliopt::CliOpt;
use promconv::runner;

fn main() {
    let opt = CliOpt::from_args();

    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(opt.log_level);
    if let Ok(filters) = env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    if let Err(err) = runner::run(&opt) {
        error!("{}: {}", err.kind(), err);
        process::exit(err.kind().exit_code());
    }
}
