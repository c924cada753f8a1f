use std::path::PathBuf;

use clap::Parser;
use scatter_creator::{AxisSelection, LoadOptions};

#[derive(Parser, Debug)]
#[command(name = "scatter-creator")]
#[command(version, about = "Scatter plots with a regression line for numeric CSV columns", long_about = None)]
pub struct Cli {
    /// Delimited text file to open
    pub file: Option<PathBuf>,

    /// Column for the X axis (runs headless)
    #[arg(short, long)]
    pub x: Option<String>,

    /// Column for the Y axis (runs headless)
    #[arg(short, long)]
    pub y: Option<String>,

    /// Field delimiter, e.g. ';' or 'tab' (defaults by file extension)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Print the plot descriptor as JSON
    #[arg(long)]
    pub json: bool,

    /// Stay in the terminal; without --x/--y, list the numerical columns
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.headless || self.x.is_some() || self.y.is_some()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }

    pub fn selection(&self) -> AxisSelection {
        AxisSelection {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
        },
    }
}
