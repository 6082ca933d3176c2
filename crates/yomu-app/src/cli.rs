use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "yomu",
    version,
    about = "Page through Japanese text with furigana and translations on demand",
    long_about = None
)]
pub struct Cli {
    /// Use a specific JSON configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Analyzer endpoint, e.g. http://127.0.0.1:8080/analyze
    #[clap(long, value_name = "URL")]
    pub url: Option<String>,

    /// Page size in characters
    #[clap(long, value_name = "CHARS")]
    pub page_size: Option<usize>,

    /// Number of pages fetched ahead in the background
    #[clap(long, value_name = "PAGES")]
    pub prefetch: Option<usize>,

    /// Open a local text file
    #[clap(short, long, value_name = "PATH", conflicts_with = "preset")]
    pub file: Option<PathBuf>,

    /// Open a preset book by number or file name
    #[clap(short, long, value_name = "BOOK")]
    pub preset: Option<String>,

    /// Print the first page and exit
    #[clap(short, long)]
    pub dump: bool,

    /// Emit logs as JSON
    #[clap(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "yomu",
            "--url",
            "http://localhost:9000/analyze",
            "--page-size",
            "500",
            "--preset",
            "2",
            "--dump",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:9000/analyze"));
        assert_eq!(cli.page_size, Some(500));
        assert_eq!(cli.preset.as_deref(), Some("2"));
        assert!(cli.dump);
        assert!(cli.file.is_none());
    }

    #[test]
    fn file_and_preset_conflict() {
        let result = Cli::try_parse_from(["yomu", "--file", "a.txt", "--preset", "1"]);
        assert!(result.is_err());
    }
}
