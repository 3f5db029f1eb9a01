// AutoCollection CLI entry point

use autocollection_cli::output::{OutputStyle, Tone};
use autocollection_cli::runner::{self, Cli};
use clap::Parser;
use tracing_subscriber::fmt;

fn main() {
    let cli = Cli::parse();

    fmt()
        .with_max_level(cli.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let style = OutputStyle::default();
    let summary = match runner::run(&cli) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", style.line(Tone::Failure, &format!("{:#}", e)));
            std::process::exit(1);
        }
    };

    for (contract, paths) in &summary.written {
        let verb = if cli.dry_run { "would write" } else { "wrote" };
        let msg = format!("{}: {} {} units", contract, verb, paths.len());
        println!("{}", style.line(Tone::Done, &msg));
        for path in paths {
            println!("  {}", path.display());
        }
    }

    for diagnostic in &summary.diagnostics {
        println!("{}", style.diagnostic(diagnostic));
    }

    for (contract, reason) in &summary.failures {
        eprintln!("{}", style.line(Tone::Failure, &format!("{}: {}", contract, reason)));
    }

    if summary.has_errors() {
        std::process::exit(1);
    }
}
