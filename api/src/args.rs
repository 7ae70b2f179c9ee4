use clap::{Args as ClapArgs, Parser};
use menulens_core::domain::{
    common::{
        AnalysisConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig, MenuLensConfig,
    },
    menu_analysis::value_objects::SchemaVersion,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "menulens-api", version, about = "MenuLens API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(
        long = "gemini-api-key",
        env = "GEMINI_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = DEFAULT_GEMINI_BASE_URL
    )]
    pub gemini_base_url: String,

    #[arg(long = "schema-version", env = "SCHEMA_VERSION", default_value = "rich")]
    pub schema_version: SchemaVersion,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(
        long = "log-filter",
        env = "RUST_LOG",
        default_value = "menulens=info,menulens_api=info,menulens_core=info,tower_http=info"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for MenuLensConfig {
    fn from(args: Args) -> Self {
        MenuLensConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            analysis: AnalysisConfig {
                schema_version: args.llm.schema_version,
            },
        }
    }
}
