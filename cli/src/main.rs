use clap::Parser;
use std::fs;
use std::path::PathBuf;

use dapgen_compiler::{compile_schema, generate_rust};
use dapgen_compiler::error::GenError;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dapgen")]
#[command(about = "Generate Rust types from the Debug Adapter Protocol JSON schema", long_about = None)]
struct Cli {
    /// Input schema file (debugProtocol.json)
    input: PathBuf,

    /// Output `.rs` file (if omitted, prints to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the verified intermediate model as JSON instead of Rust source
    #[arg(long)]
    dump_model: bool,

    /// Log each generation step to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), GenError> {
    let text = fs::read_to_string(&cli.input)?;
    info!(input = %cli.input.display(), "read schema");

    let output = if cli.dump_model {
        let schema = compile_schema(&text)?;
        serde_json::to_string_pretty(&schema)? + "\n"
    } else {
        generate_rust(&text)?
    };

    if let Some(out_path) = &cli.output {
        fs::write(out_path, &output)?;
        info!(output = %out_path.display(), "wrote generated source");
    } else {
        print!("{}", output);
    }
    Ok(())
}
