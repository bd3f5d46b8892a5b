//! Converts a phyloreference test suite in JSON into JSON-LD, adding the
//! nodes of every phylogeny together with their labeled node data.

use clap::Parser;
use flexi_logger::Logger;
use log::{debug, error};
use phylogroup::error::LoadResult;
use phylogroup::phyloref::{PhyloreferenceTestSuite, TreeLoader};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Context added to the exported document unless given on the command line.
const DEFAULT_CONTEXT: &str = "../paper-context.json";

/// Convert a phyloreference test suite into JSON-LD with node information
#[derive(Parser, Debug)]
#[command(name = "phylogroup", version, about)]
struct Cli {
    /// Input JSON file to convert to JSON-LD (default: stdin)
    #[arg(value_name = "paper.json")]
    input: Option<PathBuf>,

    /// JSON-LD file to write out (default: stdout)
    #[arg(short, long, value_name = "output.json")]
    output: Option<PathBuf>,

    /// Value of `@context` in the exported document
    #[arg(long, value_name = "IRI", default_value = DEFAULT_CONTEXT)]
    context: String,

    /// Display verbose information
    #[arg(long)]
    verbose: bool,

    /// Keep underscores in unquoted Newick labels instead of reading them as spaces
    #[arg(long)]
    preserve_underscores: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let _logger = match Logger::try_with_env_or_str(level).and_then(|l| l.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Could not initialize logging: {err}");
            None
        }
    };

    let input_name = cli
        .input
        .as_deref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    debug!("Input file: {input_name}");
    debug!(
        "Output file: {}",
        cli.output.as_deref().map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
    );

    let document = match convert(&cli) {
        Ok(document) => document,
        Err(err) => {
            error!("Could not read '{input_name}': {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = write_document(&document, cli.output.as_deref()) {
        error!("Could not write output: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Reads the test suite and exports it with the requested context.
fn convert(cli: &Cli) -> LoadResult<Value> {
    let (contents, base_dir) = match &cli.input {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let base_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf);
            (contents, base_dir)
        }
        None => {
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            (contents, None)
        }
    };

    let mut loader = TreeLoader::new();
    if let Some(base_dir) = base_dir {
        loader = loader.with_base_dir(base_dir);
    }
    if cli.preserve_underscores {
        loader = loader.with_preserve_underscores();
    }

    let doc: Value = serde_json::from_str(&contents)?;
    let suite = PhyloreferenceTestSuite::load_from_document(&doc, &loader)?;
    debug!("Loaded test suite, id: {}", suite.id());

    let mut exported = suite.export_to_jsonld_document();
    if let Value::Object(map) = &mut exported {
        map.insert("@context".to_string(), Value::String(cli.context.clone()));
    }
    Ok(exported)
}

/// Writes the document pretty-printed with four-space indentation.
fn write_document(document: &Value, output: Option<&Path>) -> io::Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    document.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
