use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, Command};
use knap_algorithms::knapsack::hybrid_dp_bnb::{help, solve_challenge};
use knap_challenges::knapsack::{Problem, Solution, Track};
use serde_json::{Map, Value};
use std::{fs, io::Read, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("knap-runtime")
        .about("Solves, verifies or generates 0/1 knapsack problems")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve_problem")
                .about("Solves a problem")
                .arg(
                    arg!(<PROBLEM> "Path to a problem file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--params [PARAMS] "Solver hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--json "Print the solution as json instead of the text format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution")
                .arg(
                    arg!(<PROBLEM> "Path to a problem file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Path to a solution file (text, or *.json), or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_problem")
                .about("Generates a random problem")
                .arg(arg!(<SEED> "Seed for the generator").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(<NUM_ITEMS> "Number of items")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--values [MAX_VALUE] "Largest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--weights [MAX_WEIGHT] "Largest item weight")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the problem will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("help_params").about("Lists the solver hyperparameters"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("KNAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve_problem", sub_m)) => solve_problem(
            sub_m.get_one::<String>("PROBLEM").unwrap().clone(),
            sub_m.get_one::<String>("params").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("json"),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("PROBLEM").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate_problem", sub_m)) => generate_problem(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            *sub_m.get_one::<usize>("NUM_ITEMS").unwrap(),
            *sub_m.get_one::<u64>("values").unwrap(),
            *sub_m.get_one::<u64>("weights").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("help_params", _)) => {
            help();
            Ok(())
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

pub fn solve_problem(
    problem_path: String,
    params: Option<String>,
    output_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let problem = read_input(&problem_path)?
        .parse::<Problem>()
        .with_context(|| format!("Failed to parse problem: {}", problem_path))?;
    let hyperparameters = params.as_deref().map(load_params).transpose()?;

    let solution = solve_challenge(&problem, &hyperparameters)?;
    problem
        .verify_solution(&solution)
        .context("Solver produced an invalid solution")?;

    let output = if json {
        serde_json::to_string(&solution)?
    } else {
        solution.to_string()
    };
    write_output(output_file, &output)
}

pub fn verify_solution(problem_path: String, solution_path: String) -> Result<()> {
    if problem_path == "-" && solution_path == "-" {
        return Err(anyhow!("Problem and solution cannot both be read from stdin"));
    }
    let problem = read_input(&problem_path)?
        .parse::<Problem>()
        .with_context(|| format!("Failed to parse problem: {}", problem_path))?;
    let solution = load_solution(&solution_path)?;

    match problem.verify_solution(&solution) {
        Ok(_) => println!("Solution is valid"),
        Err(e) => {
            eprintln!("Verification error: Invalid solution: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn generate_problem(
    seed: u64,
    num_items: usize,
    max_value: u64,
    max_weight: u64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let track = Track {
        num_items,
        max_value,
        max_weight,
    };
    let problem = Problem::generate_instance(seed, &track)?;
    info!(num_items, capacity = problem.capacity(), "generated problem");
    write_output(output_file, &problem.to_string())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
    }
}

fn write_output(output_file: Option<PathBuf>, output: &str) -> Result<()> {
    if let Some(path) = output_file {
        fs::write(&path, format!("{}\n", output))
            .with_context(|| format!("Failed to write file: {:?}", path))?;
        info!(?path, "output written");
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn load_params(params: &str) -> Result<Map<String, Value>> {
    let params = if params.ends_with(".json") {
        fs::read_to_string(params)
            .with_context(|| format!("Failed to read params file: {}", params))?
    } else {
        params.to_string()
    };

    serde_json::from_str::<Map<String, Value>>(&params).context("Failed to parse params")
}

fn load_solution(solution: &str) -> Result<Solution> {
    let content = read_input(solution)?;
    if solution.ends_with(".json") {
        let map = serde_json::from_str::<Map<String, Value>>(&content)
            .context("Failed to parse solution json")?;
        Solution::try_from(map).context("Invalid solution json")
    } else {
        content
            .parse::<Solution>()
            .context("Failed to parse solution")
    }
}
