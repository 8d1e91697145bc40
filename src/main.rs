// Crunch - asset compressor
// Entry point with clean separation of concerns

use crunch::cli::CliHandler;

fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run() {
        eprintln!("{}", e.format_detailed());
        std::process::exit(1);
    }
}
