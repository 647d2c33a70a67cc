use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifesync", version, about = "Personality quiz scoring and profile history")]
pub struct Args {
    /// Data directory (defaults to $LIFESYNC_DATA_DIR or <config dir>/lifesync)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the quiz questions
    Questions,
    /// Score a quiz and store the resulting profile
    Take {
        /// Scores (1-5) for the questions in bank order, comma separated
        #[arg(long, value_delimiter = ',')]
        scores: Vec<i64>,
        /// Answer a single question as ID=SCORE; later answers replace earlier ones
        #[arg(long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, i64)>,
        /// Match dominant pairs in either order
        #[arg(long)]
        unordered_pairs: bool,
    },
    /// Show the current profile
    Current {
        #[arg(long)]
        json: bool,
    },
    /// List stored profiles, newest first
    History {
        /// Maximum number of profiles to show
        #[arg(long, default_value = "20")]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Compare two stored profiles (defaults to the two most recent)
    Compare {
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete all stored profiles
    Reset,
}

fn parse_answer(s: &str) -> Result<(String, i64), String> {
    let (id, score) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=SCORE, got '{}'", s))?;
    let score = score
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid score in '{}': {}", s, e))?;
    Ok((id.trim().to_string(), score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("3=4").unwrap(), ("3".to_string(), 4));
        assert_eq!(parse_answer(" 10 = 2").unwrap(), ("10".to_string(), 2));
        assert!(parse_answer("3").is_err());
        assert!(parse_answer("3=high").is_err());
    }

    #[test]
    fn test_take_arguments() {
        let args = Args::parse_from([
            "lifesync", "take", "--scores", "5,3,4", "--answer", "1=2", "--answer", "2=5",
        ]);
        match args.command {
            Commands::Take { scores, answers, unordered_pairs } => {
                assert_eq!(scores, vec![5, 3, 4]);
                assert_eq!(answers, vec![("1".to_string(), 2), ("2".to_string(), 5)]);
                assert!(!unordered_pairs);
            }
            _ => panic!("expected take"),
        }
    }

    #[test]
    fn test_global_data_dir() {
        let args = Args::parse_from(["lifesync", "history", "--data-dir", "/tmp/ls", "--json"]);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/ls")));
        assert!(matches!(args.command, Commands::History { json: true, limit: 20 }));
    }
}
