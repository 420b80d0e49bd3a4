use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(about, version)]
pub struct Cli {
    #[arg(value_name = "BOARD FILE",
	  help = "Specify the board snapshot (*.json) to compute airwires for")]
    pub input: PathBuf,
    #[arg(short, long, value_name = "AIRWIRES FILE",
	  help = "Specify the file the airwires are written to as JSON. Standard output is used by default")]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_name = "SETTINGS FILE",
	  help = "JSON file with airwire settings; missing fields take their defaults")]
    pub config: Option<PathBuf>,
    #[arg(short, long, help = "Ignore plane fragments and only consider tracks as existing copper")]
    pub fast: bool,
    #[arg(short, long = "net", value_name = "NET NAME",
	  help = "Only recompute the named net. May be given several times; all nets are recomputed by default")]
    pub nets: Vec<String>,
}
