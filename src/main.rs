//! u-tsp CLI: solve a TSPLIB instance and print one result line.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use u_tsp::constructive::{canonical_tour, nearest_neighbor, random_walk};
use u_tsp::distance::{CoordinateOracle, DistanceMatrix, DistanceOracle};
use u_tsp::exact::{exact_search, ExactConfig, ExactProgress, Pause, PauseToken};
use u_tsp::ga::{genetic_algorithm, genetic_algorithm_dpx, GaConfig};
use u_tsp::io::{tsplib, ReportLine};
use u_tsp::local_search::two_opt;
use u_tsp::models::{Instance, Tour};
use u_tsp::{TspError, TspResult};

#[derive(Parser, Debug)]
#[command(name = "u-tsp")]
#[command(about = "Traveling salesman tours for TSPLIB instances")]
#[command(version)]
struct Cli {
    /// TSPLIB instance file
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Canonical tour 1..N (the default; ignored when -m is given)
    #[arg(short = 'c', long)]
    canonical: bool,

    /// Method: canonical, bf, nn, rw, 2opt, ga, gadpx
    #[arg(short = 'm', long)]
    method: Option<String>,

    /// Use the precomputed half matrix (falls back to coordinates if it cannot be built)
    #[arg(short = 'M', long)]
    matrix: bool,

    /// Allow brute force above the dimension threshold
    #[arg(short = 'F', long)]
    force: bool,

    /// Append the result line to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Start city for nn and 2opt
    #[arg(long, default_value = "1")]
    start: usize,

    /// GA population size
    #[arg(long, default_value = "30")]
    population: usize,

    /// GA generations
    #[arg(long, default_value = "1000")]
    generations: usize,

    /// GA mutation rate
    #[arg(long, default_value = "0.1")]
    mutation: f64,

    /// Random seed for rw, ga and gadpx
    #[arg(long)]
    seed: Option<u64>,
}

/// Methods accepted by `-m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Canonical,
    BruteForce,
    NearestNeighbor,
    RandomWalk,
    TwoOpt,
    Ga,
    GaDpx,
}

impl Algorithm {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "canonical" => Some(Self::Canonical),
            "bf" => Some(Self::BruteForce),
            "nn" => Some(Self::NearestNeighbor),
            "rw" => Some(Self::RandomWalk),
            "2opt" => Some(Self::TwoOpt),
            "ga" => Some(Self::Ga),
            "gadpx" => Some(Self::GaDpx),
            _ => None,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::BruteForce => "bf",
            Self::NearestNeighbor => "nn",
            Self::RandomWalk => "rw",
            Self::TwoOpt => "2opt",
            Self::Ga => "ga",
            Self::GaDpx => "gadpx",
        }
    }

    /// Exit status for a failed run of this method.
    fn failure_status(self, err: &TspError) -> u8 {
        if err.is_refusal() {
            return err.status();
        }
        match self {
            Self::BruteForce => 7,
            Self::Ga | Self::GaDpx => 8,
            _ => err.status(),
        }
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    enable_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let (line, status) = execute(&cli);
    match emit(&line, cli.output.as_deref()) {
        Ok(()) => ExitCode::from(status),
        Err(e) => {
            tracing::error!(error = %e, "cannot write result");
            ExitCode::from(if status == 0 { e.status() } else { status })
        }
    }
}

/// Runs one invocation and returns the line to emit with the exit status.
///
/// Any failure replaces the data line with a [`ReportLine::failure`].
fn execute(cli: &Cli) -> (ReportLine, u8) {
    if cli.canonical && cli.method.is_some() {
        tracing::debug!("-m given, ignoring -c");
    }
    let method = cli
        .method
        .clone()
        .unwrap_or_else(|| Algorithm::Canonical.code().to_string());

    let instance = match tsplib::parse_file(&cli.file) {
        Ok(instance) => instance,
        Err(e) => {
            tracing::error!(file = %cli.file.display(), error = %e, "cannot load instance");
            return (failure_line(None, &method), e.status());
        }
    };

    let Some(algorithm) = Algorithm::parse(&method) else {
        let e = TspError::UnsupportedAlgorithm(method.clone());
        tracing::error!(error = %e, "expected one of canonical, bf, nn, rw, 2opt, ga, gadpx");
        return (failure_line(Some(instance.name()), &method), e.status());
    };

    match solve(cli, &instance, algorithm) {
        Ok(line) => (line, 0),
        Err(e) => {
            if e.is_refusal() {
                tracing::error!(error = %e, "use -F to force brute force");
            } else {
                tracing::error!(method = algorithm.code(), error = %e, "run failed");
            }
            (
                failure_line(Some(instance.name()), algorithm.code()),
                algorithm.failure_status(&e),
            )
        }
    }
}

fn solve(cli: &Cli, instance: &Instance, algorithm: Algorithm) -> TspResult<ReportLine> {
    let coords = CoordinateOracle::for_instance(instance);
    let matrix = if cli.matrix {
        match DistanceMatrix::build(&coords) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "half matrix unavailable, using coordinates");
                None
            }
        }
    } else {
        None
    };
    let oracle: &dyn DistanceOracle = match &matrix {
        Some(m) => m,
        None => &coords,
    };
    let n = oracle.dimension();

    let timer = Instant::now();
    let tour = match algorithm {
        Algorithm::Canonical => {
            let mut tour = canonical_tour(n)?;
            let length = oracle.path_length(tour.cities(), tour.is_closed());
            tour.set_length(length);
            tour
        }
        Algorithm::NearestNeighbor => {
            let mut tour = Tour::try_with_dimension(n)?;
            nearest_neighbor(oracle, &mut tour, cli.start)?;
            tour
        }
        Algorithm::RandomWalk => {
            let mut tour = Tour::try_with_dimension(n)?;
            let mut rng = u_numflow::random::create_rng(cli.seed.unwrap_or_else(rand::random));
            random_walk(oracle, &mut tour, &mut rng)?;
            tour
        }
        Algorithm::TwoOpt => {
            let mut tour = Tour::try_with_dimension(n)?;
            nearest_neighbor(oracle, &mut tour, cli.start)?;
            two_opt(oracle, &mut tour)?;
            tour
        }
        Algorithm::BruteForce => brute_force(cli, oracle)?,
        Algorithm::Ga => genetic_algorithm(oracle, &ga_config(cli))?.tour,
        Algorithm::GaDpx => genetic_algorithm_dpx(oracle, &ga_config(cli))?.tour,
    };
    let seconds = timer.elapsed().as_secs_f64();

    Ok(ReportLine::new(instance.name(), algorithm.code(), seconds, &tour))
}

fn brute_force(cli: &Cli, oracle: &dyn DistanceOracle) -> TspResult<Tour> {
    let config = ExactConfig::default().with_force(cli.force);
    config.check(oracle.dimension())?;

    let token = PauseToken::new();
    let remote = token.clone();
    if let Err(e) = ctrlc::set_handler(move || remote.request()) {
        tracing::warn!(error = %e, "cannot install SIGINT handler, pause disabled");
    }

    let mut handler = report_and_wait;
    let result = exact_search(oracle, Some(Pause::new(&token, &mut handler)))?;
    tracing::info!(
        worst_length = result.worst.length(),
        worst = %result.worst.compact(),
        "longest tour"
    );
    Ok(result.best)
}

/// Prints progress to stderr and blocks until a line is read from stdin.
fn report_and_wait(progress: &ExactProgress) {
    eprintln!("Best length so far: {:.6}", progress.best_length);
    eprintln!("Worst length so far: {:.6}", progress.worst_length);
    eprintln!("Permutations evaluated: {}", progress.evaluated);
    eprintln!("Press Enter to resume");
    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        tracing::warn!(error = %e, "cannot read from stdin, resuming");
    }
    eprintln!("Resuming brute force");
}

fn ga_config(cli: &Cli) -> GaConfig {
    let config = GaConfig::default()
        .with_population_size(cli.population)
        .with_generations(cli.generations)
        .with_mutation_rate(cli.mutation);
    match cli.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Writes `line` to the output file when given, otherwise to stdout.
fn emit(line: &ReportLine, output: Option<&Path>) -> TspResult<()> {
    match output {
        Some(path) => line.append_to(path),
        None => {
            println!("{line}");
            Ok(())
        }
    }
}

fn failure_line(name: Option<&str>, method: &str) -> ReportLine {
    ReportLine::failure(name.filter(|n| !n.is_empty()), method)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];

    fn write_instance(file: &str, name: &str, coords: &[(f64, f64)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("u_tsp_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("dir");
        let mut text = format!(
            "NAME: {name}\nTYPE: TSP\nDIMENSION: {}\nEDGE_WEIGHT_TYPE: EUC_2D\nNODE_COORD_SECTION\n",
            coords.len()
        );
        for (i, (x, y)) in coords.iter().enumerate() {
            text.push_str(&format!("{} {x} {y}\n", i + 1));
        }
        text.push_str("EOF\n");
        let path = dir.join(file);
        std::fs::write(&path, text).expect("write");
        path
    }

    fn cli(file: &Path, args: &[&str]) -> Cli {
        let file = file.to_str().expect("utf-8 path");
        let argv = ["u-tsp", "-f", file].into_iter().chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_algorithm_parse() {
        for code in ["canonical", "bf", "nn", "rw", "2opt", "ga", "gadpx"] {
            let algorithm = Algorithm::parse(code).expect("known method");
            assert_eq!(algorithm.code(), code);
        }
        assert_eq!(Algorithm::parse("BF"), Some(Algorithm::BruteForce));
        assert_eq!(Algorithm::parse("GaDpx"), Some(Algorithm::GaDpx));
        assert_eq!(Algorithm::parse("sa"), None);
        assert_eq!(Algorithm::parse(""), None);
    }

    #[test]
    fn test_failure_status() {
        let invalid = TspError::InvalidArgument("bad".into());
        let alloc = TspError::Allocation { what: "tour" };
        let refusal = TspError::PolicyRefusal {
            dimension: 13,
            limit: 12,
        };

        assert_eq!(Algorithm::BruteForce.failure_status(&refusal), 6);
        assert_eq!(Algorithm::BruteForce.failure_status(&alloc), 7);
        assert_eq!(Algorithm::BruteForce.failure_status(&invalid), 7);
        assert_eq!(Algorithm::Ga.failure_status(&alloc), 8);
        assert_eq!(Algorithm::GaDpx.failure_status(&invalid), 8);
        assert_eq!(Algorithm::NearestNeighbor.failure_status(&alloc), 4);
        assert_eq!(Algorithm::Canonical.failure_status(&alloc), 4);
    }

    #[test]
    fn test_execute_canonical_by_default() {
        let path = write_instance("canonical.tsp", "sq", &SQUARE);
        let (line, status) = execute(&cli(&path, &[]));
        assert_eq!(status, 0);
        assert_eq!(line.name, "sq");
        assert_eq!(line.algorithm, "canonical");
        assert_eq!(line.length, 40.0);
        assert_eq!(line.cities, vec![1, 2, 3, 4]);

        // -m wins over -c
        let (line, status) = execute(&cli(&path, &["-c", "-m", "nn"]));
        assert_eq!(status, 0);
        assert_eq!(line.algorithm, "nn");
    }

    #[test]
    fn test_execute_matrix_matches_coordinates() {
        let coords = [(0.0, 0.0), (7.0, 3.0), (2.0, 9.0), (8.0, 8.0), (5.0, 1.0), (1.0, 4.0)];
        let path = write_instance("matrix.tsp", "six", &coords);
        for method in ["canonical", "nn", "2opt", "bf"] {
            let (plain, s1) = execute(&cli(&path, &["-m", method]));
            let (cached, s2) = execute(&cli(&path, &["-m", method, "-M"]));
            assert_eq!((s1, s2), (0, 0), "{method}");
            assert_eq!(plain.cities, cached.cities, "{method}");
            assert_eq!(plain.length, cached.length, "{method}");
        }
    }

    #[test]
    fn test_execute_unsupported_method() {
        let path = write_instance("unsupported.tsp", "sq", &SQUARE);
        let (line, status) = execute(&cli(&path, &["-m", "sa"]));
        assert_eq!(status, 5);
        assert_eq!(line.to_string(), "Tour sq sa 0.000000 0 []");
    }

    #[test]
    fn test_execute_load_failures() {
        let missing = std::env::temp_dir().join("u_tsp_cli_missing_instance.tsp");
        let (line, status) = execute(&cli(&missing, &["-m", "nn"]));
        assert_eq!(status, 1);
        assert_eq!(line.to_string(), "Tour unknown nn 0.000000 0 []");

        let dir = std::env::temp_dir().join(format!("u_tsp_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("dir");
        let bad = dir.join("malformed.tsp");
        std::fs::write(&bad, "NAME: bad\nTYPE: TSP\nDIMENSION: 2\nNODE_COORD_SECTION\n1 0 zero\n2 1 1\nEOF\n")
            .expect("write");
        let (line, status) = execute(&cli(&bad, &[]));
        assert_eq!(status, 2);
        assert_eq!(line.to_string(), "Tour unknown canonical 0.000000 0 []");
    }

    #[test]
    fn test_execute_refuses_large_brute_force() {
        let coords: Vec<(f64, f64)> = (0..13).map(|i| (i as f64, (i * i % 7) as f64)).collect();
        let path = write_instance("large.tsp", "big13", &coords);
        let (line, status) = execute(&cli(&path, &["-m", "bf"]));
        assert_eq!(status, 6);
        assert_eq!(line.to_string(), "Tour big13 bf 0.000000 0 []");
    }

    #[test]
    fn test_execute_ga_failure_replaces_line() {
        let path = write_instance("ga.tsp", "sq", &SQUARE);
        let (line, status) = execute(&cli(&path, &["-m", "ga", "--population", "0"]));
        assert_eq!(status, 8);
        assert_eq!(line.to_string(), "Tour sq ga 0.000000 0 []");

        let (line, status) = execute(&cli(&path, &["-m", "gadpx", "--generations", "0"]));
        assert_eq!(status, 8);
        assert!(line.cities.is_empty());
    }

    #[test]
    fn test_emit_appends_to_output() {
        let path = write_instance("output.tsp", "sq", &SQUARE);
        let out = path.with_extension("out");
        std::fs::remove_file(&out).ok();
        let out_arg = out.to_str().expect("utf-8 path");

        for method in ["canonical", "sa"] {
            let cli = cli(&path, &["-m", method, "-o", out_arg]);
            let (line, _) = execute(&cli);
            emit(&line, cli.output.as_deref()).expect("append");
        }

        let text = std::fs::read_to_string(&out).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Tour sq canonical "));
        assert!(lines[0].ends_with(" 40 [1,2,3,4]"));
        assert_eq!(lines[1], "Tour sq sa 0.000000 0 []");
        std::fs::remove_file(&out).ok();
    }
}
