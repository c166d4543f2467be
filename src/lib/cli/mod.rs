use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "browser-agent",
    version,
    about = "Run one natural-language browser task through an LLM agent and an MCP tool server"
)]
pub struct Cli {
    /// TOML configuration file (defaults to config/agent.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Environment file loaded before reading configuration
    #[arg(long)]
    pub env_file: Option<PathBuf>,
    /// Task instruction; prompts on the terminal when omitted
    #[arg(long)]
    pub task: Option<String>,
    /// Where to write the final answer
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Log every agent step
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_interactive_defaults() {
        let cli = Cli::try_parse_from(["browser-agent"]).expect("parse");
        assert!(cli.config.is_none());
        assert!(cli.task.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn accepts_task_output_and_verbose_flags() {
        let cli = Cli::try_parse_from([
            "browser-agent",
            "--task",
            "open example.com",
            "--output",
            "answer.txt",
            "--config",
            "agent.toml",
            "-v",
        ])
        .expect("parse");
        assert_eq!(cli.task.as_deref(), Some("open example.com"));
        assert_eq!(cli.output, Some(PathBuf::from("answer.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("agent.toml")));
        assert!(cli.verbose);
    }
}
