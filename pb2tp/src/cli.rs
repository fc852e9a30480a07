use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pb2tp")]
#[command(about = "Convert Pathbuilder 2e characters into Tableplop character sheets")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Pathbuilder build into a Tableplop document
    Convert(ConvertArgs),

    /// Renumber the property IDs of an existing Tableplop export
    Renumber {
        /// Tableplop document to read
        input: PathBuf,

        /// Where to write the renumbered document
        output: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ConvertArgs {
    /// Pathbuilder share ID to fetch
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub id: Option<String>,

    /// Local Pathbuilder JSON (a saved json.php response or a bare build)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output file, or a directory to place the default file name in
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the first N properties after converting
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Write the document to stdout instead of a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}
