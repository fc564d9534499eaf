use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[clap(
    name = "specforge",
    author,
    version = "0.1.0",
    about = "Chat with the backend specification generator"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[clap(
        id = "api-url",
        long = "api-url",
        help = "Base URL of the specification API [default: https://v0-coder.onrender.com]"
    )]
    pub api_url: Option<String>,

    #[clap(
        id = "timeout",
        long = "timeout",
        help = "Request timeout in milliseconds [default: 120000]"
    )]
    pub timeout: Option<String>,

    #[clap(
        id = "log-level",
        long = "log-level",
        value_parser = ["error", "warn", "info", "debug", "trace"],
        help = "Log level [default: info]"
    )]
    pub log_level: Option<String>,

    #[clap(
        id = "config-file",
        long = "config-file",
        help = "Path to configuration file"
    )]
    pub config_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session (default command)
    Chat,
    /// Send a single prompt and print the generated specification
    Ask {
        /// Prompt describing the backend to generate
        prompt: String,
    },
    /// Inspect configuration
    Config {
        #[clap(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print a config file with every default value
    Default,
    /// Print the config file location in use
    Path,
}
