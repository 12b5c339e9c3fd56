use std::env;

use anyhow::Error;
use clap::{App, Arg};
use env_logger::Builder;
use log::{error, LevelFilter};

mod bench;

use bench::BenchConfig;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let mut builder = Builder::new();
    builder.filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("USPW_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("uspw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Times the USP weakness solvers over randomly generated puzzles")
        .arg(
            Arg::with_name("solver")
                .long("solver")
                .value_name("SOLVER")
                .possible_values(&["basic", "dpll", "cdcl"])
                .default_value("cdcl")
                .help("The solver to benchmark"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .value_name("N")
                .default_value("6")
                .help("Largest number of puzzle rows in the benchmark grid"),
        )
        .arg(
            Arg::with_name("max-width")
                .long("max-width")
                .value_name("K")
                .default_value("8")
                .help("Largest number of puzzle columns in the benchmark grid"),
        )
        .arg(
            Arg::with_name("trials")
                .long("trials")
                .value_name("COUNT")
                .default_value("10")
                .help("Number of random puzzles per grid point"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FILE")
                .default_value("runtime.csv")
                .help("Where to write the timing table"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .takes_value(true)
                .help("Seed the puzzle generator for a reproducible run"),
        )
        .get_matches();

    init_logging();

    let config = BenchConfig {
        solver: matches.value_of("solver").unwrap().parse()?,
        max_depth: matches.value_of("max-depth").unwrap().parse()?,
        max_width: matches.value_of("max-width").unwrap().parse()?,
        trials: matches.value_of("trials").unwrap().parse()?,
        output: matches.value_of("output").unwrap().into(),
        seed: matches.value_of("seed").map(str::parse).transpose()?,
    };

    bench::run(&config)?;

    Ok(0)
}
