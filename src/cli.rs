use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "idcheck")]
#[command(
    about = "Validates Swedish personal, coordination and organisation numbers and lists the invalid ones"
)]
pub struct Cli {
    /// Identifiers to validate, e.g. 141206-2380 or 201701102384
    #[arg(value_name = "NUMBER", required_unless_present_any = ["file", "csv"])]
    pub numbers: Vec<String>,

    /// Text file with one identifier per line (blank lines and lines starting with '#' are skipped)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// CSV file to read identifiers from
    #[arg(long, value_name = "FILE")]
    pub csv: Option<String>,

    /// Column holding the identifiers when using --csv
    #[arg(long, value_name = "NAME", default_value = "number")]
    pub column: String,

    /// Write a per-identifier CSV report to this path
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<String>,

    /// Show detailed validation statistics
    #[arg(long)]
    pub stats: bool,

    /// Exit with status 1 if any identifier is invalid
    #[arg(long)]
    pub fail_on_invalid: bool,
}
