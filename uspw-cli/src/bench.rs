//! Timing runs over randomly generated puzzles.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{anyhow, Context, Error};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use uspw::{basic, cdcl, dpll, Permutation};
use uspw_puzzle::{gen, Usp};

/// The solver under measurement.
#[derive(Copy, Clone, Debug)]
pub enum SolverKind {
    Basic,
    Dpll,
    Cdcl,
}

impl SolverKind {
    fn run(self, puzzle: &Usp) -> Option<(Permutation, Permutation)> {
        match self {
            SolverKind::Basic => basic::solve(puzzle),
            SolverKind::Dpll => dpll::solve(puzzle),
            SolverKind::Cdcl => cdcl::solve(puzzle),
        }
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<SolverKind, Error> {
        match name {
            "basic" => Ok(SolverKind::Basic),
            "dpll" => Ok(SolverKind::Dpll),
            "cdcl" => Ok(SolverKind::Cdcl),
            _ => Err(anyhow!("unknown solver '{}'", name)),
        }
    }
}

pub struct BenchConfig {
    pub solver: SolverKind,
    pub max_depth: usize,
    pub max_width: usize,
    pub trials: usize,
    pub output: PathBuf,
    pub seed: Option<u64>,
}

/// Mean and population standard deviation of a non-empty sample.
fn statistics(samples: &[f64]) -> (f64, f64) {
    assert!(!samples.is_empty());

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance = samples
        .iter()
        .map(|sample| (sample - mean) * (sample - mean))
        .sum::<f64>()
        / samples.len() as f64;
    (mean, variance.sqrt())
}

/// Time the configured solver over the (depth, width) grid and write the
/// timing table as CSV.
pub fn run(config: &BenchConfig) -> Result<(), Error> {
    let file = File::create(&config.output)
        .with_context(|| format!("could not create '{}'", config.output.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "Depth,Width,Mean(ms),Deviation(ms)")?;

    let mut rng = config.seed.map(StdRng::seed_from_u64);

    for depth in 1..=config.max_depth {
        for width in 1..=config.max_width {
            let mut samples = Vec::with_capacity(config.trials);
            for _ in 0..config.trials {
                let puzzle = match rng.as_mut() {
                    Some(rng) => gen::random_usp_from(rng, depth, width),
                    None => gen::random_usp(depth, width),
                };
                debug!("puzzle:\n{}", puzzle);

                let start = Instant::now();
                let witness = config.solver.run(&puzzle);
                let elapsed = start.elapsed().as_secs_f64() * 1e3;
                samples.push(elapsed);

                info!(
                    "{}x{}: {} in {:.3} ms",
                    depth,
                    width,
                    if witness.is_some() { "weak" } else { "strong" },
                    elapsed,
                );
            }

            let (mean, deviation) = statistics(&samples);
            writeln!(out, "{},{},{:.3},{:.3}", depth, width, mean, deviation)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_of_a_constant_sample() {
        let (mean, deviation) = statistics(&[2.0, 2.0, 2.0]);
        assert_eq!(mean, 2.0);
        assert_eq!(deviation, 0.0);
    }

    #[test]
    fn statistics_use_the_population_deviation() {
        let (mean, deviation) = statistics(&[1.0, 3.0]);
        assert_eq!(mean, 2.0);
        assert_eq!(deviation, 1.0);
    }

    #[test]
    fn solver_names_parse() {
        assert!("basic".parse::<SolverKind>().is_ok());
        assert!("dpll".parse::<SolverKind>().is_ok());
        assert!("cdcl".parse::<SolverKind>().is_ok());
        assert!("brute".parse::<SolverKind>().is_err());
    }

    #[test]
    fn run_writes_the_timing_table() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("runtime.csv");

        let config = BenchConfig {
            solver: SolverKind::Cdcl,
            max_depth: 2,
            max_width: 3,
            trials: 2,
            output: output.clone(),
            seed: Some(17),
        };
        run(&config).unwrap();

        let table = std::fs::read_to_string(&output).unwrap();
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("Depth,Width,Mean(ms),Deviation(ms)"));
        assert_eq!(lines.count(), 2 * 3);
    }
}
