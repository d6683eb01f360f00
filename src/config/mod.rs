pub mod command;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use std::path::PathBuf;
use url::Url;

pub use command::Command;

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Base URL of the blog backend
    #[arg(long, env = "BLOG_API_URL", default_value = "http://localhost:3000")]
    server: Url,
    /// Where the signed-in session is kept
    #[arg(long, env = "BLOG_SESSION", default_value = "./.blog/session.json")]
    session: PathBuf,
    /// Answer yes to confirmation prompts
    #[arg(short, long)]
    yes: bool,
    #[command(subcommand)]
    pub command: Command,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub const fn server(&self) -> &Url {
        &self.server
    }
    pub const fn session(&self) -> &PathBuf {
        &self.session
    }
    pub const fn assume_yes(&self) -> bool {
        self.yes
    }
}
