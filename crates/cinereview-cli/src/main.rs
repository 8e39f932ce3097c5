use clap::{ArgAction, Parser, Subcommand};
use commands::movie::ReviewArgs;
use commands::{config, movie, movies};
use std::path::PathBuf;

mod commands;
mod components;
mod loading;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinereview")]
#[command(about = "CineReview - Discover and review the greatest films of all time")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Also write logs to this file (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all movies with their overall ratings
    #[command(long_about = "List every movie, newest release first, with its average rating and number of reviews.")]
    Movies,

    /// Show a movie's synopsis and reviews
    #[command(long_about = "Show a movie's details, its overall rating and all of its reviews, newest first.")]
    Movie {
        /// Movie ID (shown in `cinereview movies`)
        id: String,
    },

    /// Write a review for a movie
    #[command(long_about = "Submit a review for a movie. Values not given as flags are prompted for when running in a terminal. The name is optional and defaults to Anonymous; the review must be at least 10 characters long.")]
    Review {
        /// Movie ID (shown in `cinereview movies`)
        id: String,

        /// Your name (leave out to post as Anonymous)
        #[arg(long)]
        name: Option<String>,

        /// Rating from 1 to 5 stars
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,

        /// Review text (10 to 1000 characters)
        #[arg(long)]
        text: Option<String>,
    },

    /// Configure the store connection
    #[command(long_about = "Manage the connection to the hosted store. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the anon key)
    Show {
        /// Show the anon key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set the store URL, anon key and table names
    #[command(long_about = "Configure the hosted store. The URL goes to config.toml and the anon key to credentials.toml. Missing values are prompted for.")]
    Store {
        /// Project URL, e.g. https://<project>.supabase.co
        #[arg(long)]
        url: Option<String>,

        /// Anonymous (publishable) API key
        #[arg(long)]
        anon_key: Option<String>,

        /// Name of the movies table
        #[arg(long)]
        movies_table: Option<String>,

        /// Name of the reviews table
        #[arg(long)]
        reviews_table: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movies => movies::run_movies(&output).await,
        Commands::Movie { id } => movie::run_movie(id, &output).await,
        Commands::Review { id, name, rating, text } => {
            movie::run_review(id, ReviewArgs { name, rating, text }, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
