#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod cmd;

#[derive(Parser)]
#[command(name = "onecast", about = "Schema-directed JSON casting tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Cast a JSON document into an instance of a schema.
	Cast {
		/// Input JSON file, or `-` for stdin.
		input: PathBuf,
		#[arg(long)]
		schema: String,
		#[arg(long)]
		catalog: Option<PathBuf>,
		/// Cast each element of a top-level array.
		#[arg(long)]
		each: bool,
		#[arg(long)]
		compact: bool,
	},
	/// List schemas, or show one schema's property descriptors.
	Schema {
		#[arg(long)]
		catalog: Option<PathBuf>,
		#[arg(long)]
		schema: Option<String>,
		#[arg(long)]
		json: bool,
	},
	/// Print the qualified name a schema name resolves to.
	Resolve {
		name: String,
		#[arg(long)]
		catalog: Option<PathBuf>,
	},
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> onecast::cast::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Cast {
			input,
			schema,
			catalog,
			each,
			compact,
		} => cmd::cast::run(input, schema, catalog, cmd::cast::CastArgs { each, compact }),
		Commands::Schema { catalog, schema, json } => cmd::schema::run(catalog, schema, json),
		Commands::Resolve { name, catalog } => cmd::resolve::run(name, catalog),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}
