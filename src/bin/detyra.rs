use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "detyra", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce a JSON definition and print the result.
    Produce(ProduceArgs),
    /// Produce one student's assignment.
    Assignment(AssignmentArgs),
}

#[derive(Parser, Debug)]
struct ProduceArgs {
    /// Input definition JSON.
    #[arg(long)]
    def: PathBuf,

    /// Base seed.
    #[arg(long)]
    seed: String,

    /// Environment entry as `key=value` (repeatable).
    #[arg(long = "env", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,

    /// Pretty-print the output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct AssignmentArgs {
    /// Student id.
    #[arg(long)]
    id: String,

    /// Student name.
    #[arg(long)]
    name: String,

    /// Assignment definition JSON (defaults to the bundled first assignment).
    #[arg(long)]
    def: Option<PathBuf>,

    /// Print the whole assignment as JSON instead of the description.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Produce(args) => cmd_produce(args),
        Command::Assignment(args) => cmd_assignment(args),
    }
}

fn cmd_produce(args: ProduceArgs) -> anyhow::Result<()> {
    let spec = detyra::spec_from_path(&args.def)?;
    let producer = args
        .env
        .into_iter()
        .fold(detyra::Producer::new(args.seed), |p, (k, v)| p.env_var(k, v));
    let value = producer
        .produce(&spec)
        .with_context(|| format!("produce '{}'", args.def.display()))?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_assignment(args: AssignmentArgs) -> anyhow::Result<()> {
    let config = detyra::PortalConfig::from_env();
    let spec = match &args.def {
        Some(path) => detyra::spec_from_path(path)?,
        None => detyra::first_assignment().to_spec(),
    };
    let assignment = detyra::produce_assignment(&config, &spec, &args.id, &args.name)
        .with_context(|| format!("produce assignment for '{}'", args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assignment)?);
    } else {
        println!("{}", assignment.description);
    }
    Ok(())
}
