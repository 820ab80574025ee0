use guess_the_word::cli::parse_cli;
use guess_the_word::logging::init_logging;
use guess_the_word::provider::{FileWordProvider, HttpWordProvider, WordProvider};
use guess_the_word::tui;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging();

    let provider: Arc<dyn WordProvider> = if let Some(path) = &cli.word_file {
        match FileWordProvider::from_file(path) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                eprintln!("Failed to load word file '{path}': {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if cli.offline {
        Arc::new(FileWordProvider::embedded())
    } else {
        Arc::new(HttpWordProvider::new(&cli.api_url))
    };

    if let Err(e) = tui::run(provider, &cli.name) {
        eprintln!("Terminal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
