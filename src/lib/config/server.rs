use super::defaults::{
    DEFAULT_DISPLAY, DEFAULT_SERVER_ARGS, DEFAULT_SERVER_COMMAND, DEFAULT_SERVER_NAME,
};
use super::env::Environment;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Launch description for one MCP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub workdir: Option<PathBuf>,
}

impl ServerConfig {
    /// The Playwright MCP server launched through `npx`, rendering on display `:1`.
    pub fn playwright() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            command: PathBuf::from(DEFAULT_SERVER_COMMAND),
            args: DEFAULT_SERVER_ARGS.iter().map(|arg| arg.to_string()).collect(),
            env: HashMap::from([("DISPLAY".to_string(), DEFAULT_DISPLAY.to_string())]),
            workdir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawServer {
    pub(crate) name: String,
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: HashMap<String, String>,
    workdir: Option<String>,
}

impl RawServer {
    /// Expand `${VAR}` references against `vars` and a leading `~` against the home directory.
    pub(crate) fn resolve(self, vars: &Environment) -> ServerConfig {
        let expand = |s: &str| -> String {
            let substituted = shellexpand::env_with_context_no_errors(s, |key| vars.get(key));
            shellexpand::tilde(&substituted).into_owned()
        };

        ServerConfig {
            name: self.name,
            command: PathBuf::from(expand(&self.command)),
            args: self.args.iter().map(|arg| expand(arg)).collect(),
            env: self
                .env
                .into_iter()
                .map(|(key, value)| (key, expand(&value)))
                .collect(),
            workdir: self.workdir.map(|dir| PathBuf::from(expand(&dir))),
        }
    }
}

/// The set of tool servers a run connects to, keyed by unique server name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    servers: Vec<ServerConfig>,
}

impl ConnectionDescriptor {
    pub fn new(servers: Vec<ServerConfig>) -> Self {
        Self { servers }
    }

    pub fn servers(&self) -> &[ServerConfig] {
        &self.servers
    }

    pub fn get(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|server| server.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        Self::new(vec![ServerConfig::playwright()])
    }
}
