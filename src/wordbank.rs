use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

fn is_playable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| is_playable(word))
        .collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if is_playable(&word) {
            words.push(word);
        }
    }
    Ok(words)
}

pub fn random_word(words: &[String]) -> Option<&String> {
    words.choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_words_from_str_filters_and_lowercases() {
        let data = "Banish\n  cool  \n\nnot a word\nx1y2z\nhi\n";
        let words = load_words_from_str(data);
        assert_eq!(words, vec!["banish", "cool", "hi"]);
    }

    #[test]
    fn test_embedded_wordbank_is_playable() {
        let words = load_words_from_str(EMBEDDED_WORDBANK);
        assert!(!words.is_empty());
        assert!(words.iter().all(|w| is_playable(w)));
    }

    #[test]
    fn test_random_word_comes_from_the_list() {
        let words = vec!["amber".to_string(), "sonar".to_string()];
        for _ in 0..10 {
            let word = random_word(&words).unwrap();
            assert!(words.contains(word));
        }
    }

    #[test]
    fn test_random_word_from_empty_list_is_none() {
        assert!(random_word(&[]).is_none());
    }
}
