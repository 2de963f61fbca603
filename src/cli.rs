use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "weartube",
    about = "Search and browse YouTube from the terminal",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: text (default), json
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show resolved configuration and request details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search videos by relevance
    Search {
        /// Search terms
        query: String,

        /// Continuation token from a previous page
        #[arg(short, long)]
        page_token: Option<String>,
    },

    /// Browse popular videos
    Trending {
        /// Continuation token from a previous page
        #[arg(short, long)]
        page_token: Option<String>,
    },

    /// Show details, channel and top comments for a video
    Video {
        /// YouTube video URL or video ID
        url: String,
    },

    /// List comment threads for a video
    Comments {
        /// YouTube video URL or video ID
        url: String,

        /// Continuation token from a previous page
        #[arg(short, long)]
        page_token: Option<String>,
    },

    /// Show channel details
    Channel {
        /// Channel ID (UC...)
        id: String,
    },

    /// Print the embedded player URL for a video
    Embed {
        /// YouTube video URL or video ID
        url: String,

        /// Start playback immediately
        #[arg(long)]
        autoplay: bool,
    },

    /// Format an ISO-8601 duration such as PT4M13S
    Duration {
        iso8601: String,
    },
}
