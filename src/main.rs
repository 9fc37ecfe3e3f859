use clap::{Parser, Subcommand};
use reddit_client::{RedditClientConfig, RedditHotClient, DEFAULT_USER_AGENT};
use std::time::Duration;

mod commands;

#[derive(Parser)]
#[command(
    name = "subtally",
    version,
    about = "Scan a subreddit's hot listing and tally keyword mentions"
)]
struct Cli {
    /// User-Agent header sent with every request
    #[arg(
        long,
        global = true,
        env = "SUBTALLY_USER_AGENT",
        default_value = DEFAULT_USER_AGENT
    )]
    user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the titles of the first ten hot posts
    Top {
        /// Subreddit to query
        community: String,
    },
    /// Print the title of every hot post, paginating to the end
    Titles {
        /// Subreddit to query
        community: String,
    },
    /// Count keyword mentions across every hot post title
    Count {
        /// Subreddit to query
        community: String,
        /// Whitespace-separated keywords, e.g. "python java javascript"
        keywords: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only titles and tally lines.
    tracing_subscriber::fmt()
        .with_env_filter("subtally=info,reddit_client=info")
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RedditClientConfig::new(cli.user_agent, Duration::from_secs(cli.timeout_secs));
    let client = RedditHotClient::new(config)?;

    let output = match cli.command {
        Command::Top { community } => commands::top(&client, &community).await,
        Command::Titles { community } => commands::titles(&client, &community).await,
        Command::Count {
            community,
            keywords,
        } => commands::count(&client, &community, &keywords).await,
    };
    print!("{}", output);

    Ok(())
}
