use std::path::PathBuf;

use clap::Parser;

use super::config::DownloadFormat;

#[derive(Debug, Parser)]
#[command(name = "tubefetch", author, version)]
#[command(about = "Submit a media download to a tubefetch server and follow its log")]
pub struct Args {
    /// Media URL to download (prompted for when omitted)
    pub url: Option<String>,

    /// Download server address, e.g. http://127.0.0.1:5000
    #[arg(short, long)]
    pub server: Option<String>,

    /// Keep the video or only its audio track
    #[arg(short, long, value_enum)]
    pub format: Option<DownloadFormat>,

    /// Extra form field forwarded to the server as-is (name=value)
    #[arg(short = 'o', long = "option", value_parser = parse_field)]
    pub options: Vec<(String, String)>,

    /// Milliseconds between two log polls
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// RON config file (default: ./tubefetch.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Mirror the diagnostic log on the terminal
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got `{raw}`")),
    }
}
