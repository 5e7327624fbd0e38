//! `veritas`: command-line front end for the verification engine.
//!
//! Exit codes: 0 when everything passed, 1 when verification found invariant
//! violations or a run failed, 2 on usage errors (unknown algorithm,
//! inapplicable mutation rule, malformed input).

use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use veritas_core::{
    catalog, execute, mutated_source, reference, Category, HarnessError, MutationRule,
    Registry, TestInput, VerificationResult, Verifier, VerifierConfig,
};

const EXIT_FAILURES: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "veritas",
    about = "Algorithm correctness observatory: reference implementations, \
             property verification, and a planted-bug catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every registered algorithm, grouped by category.
    List {
        /// Emit the registry as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Verify the reference implementation, or a cataloged mutant of it.
    Verify {
        /// Registered algorithm name.
        name: String,

        /// Verify the cataloged mutant under this rule instead of the
        /// reference.
        #[arg(long, value_name = "RULE")]
        mutant: Option<String>,

        /// Number of random cases on top of the fixed battery.
        #[arg(long, default_value_t = 100)]
        cases: usize,

        /// Battery seed; equal seeds give equal batteries.
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,

        /// Emit the full result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the mutated source for an algorithm under a mutation rule.
    Mutate {
        /// Registered algorithm name.
        name: String,

        /// Mutation rule tag (for example `comparison-flip`).
        rule: String,
    },

    /// Execute one algorithm on a JSON-shaped input and print the output.
    Run {
        /// Registered algorithm name.
        name: String,

        /// Input as JSON, matching the algorithm's input shape.
        #[arg(long)]
        input: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::List { json } => list(json),
        Commands::Verify {
            name,
            mutant,
            cases,
            seed,
            json,
        } => verify(&name, mutant.as_deref(), cases, seed, json),
        Commands::Mutate { name, rule } => mutate(&name, &rule),
        Commands::Run { name, input } => run_once(&name, &input),
    }
}

fn list(json: bool) -> ExitCode {
    let registry = Registry::builtin();
    if json {
        let specs: Vec<_> = registry.iter().collect();
        match serde_json::to_string_pretty(&specs) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(EXIT_FAILURES);
            }
        }
        return ExitCode::SUCCESS;
    }
    for category in Category::ALL {
        let mut specs: Vec<_> = registry.list_by_category(category).collect();
        if specs.is_empty() {
            continue;
        }
        specs.sort_by_key(|spec| spec.id.as_str().to_owned());
        println!("{category}:");
        for spec in specs {
            println!("  {:<30} {}", spec.id.as_str(), spec.complexity_note);
        }
    }
    ExitCode::SUCCESS
}

fn parse_rule(tag: &str) -> Result<MutationRule, ExitCode> {
    MutationRule::from_str(tag).map_err(|err| {
        eprintln!("error: {err}");
        eprintln!(
            "known rules: {}",
            MutationRule::ALL
                .iter()
                .map(|rule| rule.tag())
                .collect::<Vec<_>>()
                .join(", ")
        );
        ExitCode::from(EXIT_USAGE)
    })
}

fn verify(name: &str, mutant_tag: Option<&str>, cases: usize, seed: u64, json: bool) -> ExitCode {
    let config = VerifierConfig {
        cases,
        seed,
        ..VerifierConfig::default()
    };
    let verifier = Verifier::new(Registry::builtin(), config);
    log::info!(
        "verifying {name}{} with {cases} random cases, seed {seed:#x}",
        mutant_tag
            .map(|tag| format!(" (mutant: {tag})"))
            .unwrap_or_default()
    );

    let result = match mutant_tag {
        None => verifier.verify(name),
        Some(tag) => match parse_rule(tag) {
            Ok(rule) => verifier.verify_mutant(name, rule),
            Err(code) => return code,
        },
    };
    match result {
        Ok(result) => report(&result, json),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn report(result: &VerificationResult, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(EXIT_FAILURES);
            }
        }
    } else {
        println!("{}", result.summary());
        for failure in &result.failures {
            println!("  [{}] {}", failure.invariant, failure.detail);
            if let Some(rule) = failure.suspected {
                println!("    suspected bug class: {rule}");
            }
            match serde_json::to_string(&failure.input) {
                Ok(shrunk) => println!("    shrunk input: {shrunk}"),
                Err(_) => println!("    shrunk input unavailable"),
            }
        }
    }
    if result.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURES)
    }
}

fn mutate(name: &str, rule_tag: &str) -> ExitCode {
    let rule = match parse_rule(rule_tag) {
        Ok(rule) => rule,
        Err(code) => return code,
    };
    if let Err(err) = Registry::builtin().get(name) {
        eprintln!("error: {err}");
        return ExitCode::from(EXIT_USAGE);
    }
    match mutated_source(name, rule) {
        Some(source) => {
            println!("{source}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("error: no {rule} mutant is cataloged for {name}");
            let applicable: Vec<String> = catalog()
                .into_iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, rule)| rule.tag().to_owned())
                .collect();
            if applicable.is_empty() {
                eprintln!("{name} has no cataloged mutants");
            } else {
                eprintln!("applicable rules for {name}: {}", applicable.join(", "));
            }
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run_once(name: &str, input_json: &str) -> ExitCode {
    if let Err(err) = Registry::builtin().get(name) {
        eprintln!("error: {err}");
        return ExitCode::from(EXIT_USAGE);
    }
    let imp = match reference(name) {
        Some(imp) => imp,
        None => {
            eprintln!("error: no implementation for {name}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let input: TestInput = match serde_json::from_str(input_json) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: malformed input: {err}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    match execute(&imp, &input) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::from(EXIT_FAILURES)
            }
        },
        Err(err @ HarnessError::InvalidInput(_)) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_USAGE)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FAILURES)
        }
    }
}
