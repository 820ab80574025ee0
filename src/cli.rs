use crate::provider::DEFAULT_API_URL;
use clap::Parser;

/// Guess the Word CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Player name shown in the welcome banner
    #[arg(short, long, default_value = "Player")]
    pub name: String,

    /// Word service endpoint returning a JSON array of words
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Path to a newline-delimited word file for offline play
    #[arg(short = 'i', long = "input")]
    pub word_file: Option<String>,

    /// Play offline using the embedded word bank
    #[arg(long)]
    pub offline: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["guess-the-word"]);
        assert_eq!(cli.name, "Player");
        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert_eq!(cli.word_file, None);
        assert!(!cli.offline);
    }

    #[test]
    fn test_word_file_option() {
        let cli = Cli::parse_from(["guess-the-word", "-i", "words.txt"]);
        assert_eq!(cli.word_file, Some("words.txt".to_string()));
    }

    #[test]
    fn test_name_and_offline_options() {
        let cli = Cli::parse_from(["guess-the-word", "--name", "Bryan", "--offline"]);
        assert_eq!(cli.name, "Bryan");
        assert!(cli.offline);
    }
}
