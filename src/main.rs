use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use table2json::{JoinTree, load_catalog};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a SQL statement that returns one JSON document per row.
#[derive(Parser, Debug)]
#[command(name = "table2json", version, about)]
struct Cli {
    /// "show create table" output files, or directories holding `.sql` files
    #[arg(short, long = "schema", required = true, num_args = 1..)]
    schema: Vec<PathBuf>,

    /// Join tree describing the output shape (JSON)
    #[arg(short, long)]
    join_tree: Option<PathBuf>,

    /// Print the parsed tables to stderr
    #[arg(long)]
    dump_schema: bool,

    /// Skip tables whose definition does not parse instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.join_tree.is_none() && !cli.dump_schema {
        bail!("nothing to do: pass --join-tree and/or --dump-schema");
    }

    let catalog = load_catalog(&cli.schema, cli.skip_invalid).context("loading schema")?;
    info!(tables = catalog.len(), "schema loaded");

    if cli.dump_schema {
        for name in catalog.list_tables() {
            eprintln!("{}", catalog.get_table(name)?);
        }
    }

    if let Some(path) = &cli.join_tree {
        let tree = JoinTree::from_path(path)
            .with_context(|| format!("reading join tree {}", path.display()))?;
        let query = tree
            .compile(&catalog)
            .with_context(|| format!("compiling join tree for '{}'", tree.root))?;
        println!("{}", query);
    }

    Ok(())
}
