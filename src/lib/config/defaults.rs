pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

pub const DEFAULT_MAX_STEPS: usize = 20;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

pub const DEFAULT_SERVER_NAME: &str = "playwright";
pub const DEFAULT_SERVER_COMMAND: &str = "npx";
pub const DEFAULT_SERVER_ARGS: &[&str] = &["@playwright/mcp@latest"];
pub const DEFAULT_DISPLAY: &str = ":1";
