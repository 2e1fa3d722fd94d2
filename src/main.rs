use clap::Parser;
use results_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // The registry is only written at the end of a command, so an interrupted
    // run leaves the previous snapshot in place.
    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => Err(anyhow::anyhow!("Interrupted by user, registry left unchanged")),
                Err(e) => Err(anyhow::anyhow!("Failed to listen for CTRL+C: {}", e)),
            },
        }
    });

    match result {
        Ok(stats) if stats.has_failures() => process::exit(2),
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Results Processor - Race Result Importer");
    println!("========================================");
    println!();
    println!("Import published running-race result pages and link every finisher");
    println!("to a persistent racer using name and age-category birth windows.");
    println!();
    println!("USAGE:");
    println!("    results-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse        Parse one page and print its rows");
    println!("    import       Import result pages into the registry (main command)");
    println!("    races        List imported races (--imports for import history)");
    println!("    results      Show results of a race by position");
    println!("    racer        Show a racer's profile and races");
    println!("    merge        Merge one racer into another");
    println!("    delete-race  Delete a race and its results");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>          Configuration file (TOML)");
    println!("    -s, --store <FILE>           Registry snapshot path");
    println!("        --output-format <FMT>    human or json");
    println!("    -v, --verbose                Increase logging verbosity");
    println!("    -q, --quiet                  Only report errors");
    println!("    -h, --help                   Show help information");
    println!("    -V, --version                Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a season of pages, four at a time:");
    println!("    results-processor import 'pages/2015/*.html' -j 4");
    println!();
    println!("    # Import straight from the web:");
    println!("    results-processor import http://www.nlaa.ca/results/2015/flat-out.html");
    println!();
    println!("    # Check how a page parses before importing it:");
    println!("    results-processor parse pages/harbour-run.html");
    println!();
    println!("    # Look up a racer as JSON:");
    println!("    results-processor racer 42 --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    results-processor <COMMAND> --help");
}
