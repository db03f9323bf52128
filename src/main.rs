use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use idcheck::{BatchRunner, BatchStats, Cli};

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut runner = BatchRunner::new();
    runner.add_candidates(cli.numbers.iter().map(String::as_str));

    if let Some(path) = cli.file.as_deref() {
        runner.read_list_file(path)?;
    }

    if let Some(path) = cli.csv.as_deref() {
        runner.read_csv_file(path, &cli.column)?;
    }

    if runner.is_empty() {
        anyhow::bail!("No identifiers provided. Pass them as arguments or use --file/--csv");
    }

    let outcome = runner.run();
    println!("{}", outcome.format_invalid_list());

    if let Some(report) = cli.report.as_deref() {
        outcome.write_report(report)?;
        println!("Report written to: {}", report);
    }

    if cli.stats {
        print_detailed_stats(&outcome.stats);
    }

    if cli.fail_on_invalid && outcome.stats.invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging() {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_target(false)
        .try_init();
}

fn print_detailed_stats(stats: &BatchStats) {
    println!("\nDetailed Statistics:");
    println!("- Identifiers checked: {}", stats.total);
    println!("- Valid: {}", stats.valid);
    println!("- Invalid: {}", stats.invalid);

    if !stats.by_category.is_empty() {
        println!(
            "  Categories: {}",
            stats
                .by_category
                .iter()
                .map(|(category, count)| format!("{} {}", category, count))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if !stats.by_failure.is_empty() {
        println!(
            "  Failures: {}",
            stats
                .by_failure
                .iter()
                .map(|(kind, count)| format!("{} {}", kind, count))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}
