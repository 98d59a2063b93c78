use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "lens")]
#[command(about = "Guided minimalist reflection on a photo, powered by Gemini", long_about = None)]
pub struct Args {
    #[arg(long = "history", help = "List archived sessions")]
    pub history: bool,

    #[arg(long = "show", value_name = "ID", help = "Show one archived session")]
    pub show: Option<String>,

    #[arg(long = "delete", value_name = "ID", help = "Delete one archived session")]
    pub delete: Option<String>,

    #[arg(long = "clear", help = "Clear all archived sessions")]
    pub clear_history: bool,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt for --clear")]
    pub yes: bool,

    #[arg(long = "lang", value_name = "LANG", help = "Set the interface language (en, zh)")]
    pub lang: Option<String>,

    #[arg(long = "model", help = "Override the Gemini model")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., https://generativelanguage.googleapis.com/v1beta)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "config-init", help = "Write an example config file")]
    pub config_init: bool,

    #[arg(short = 'v', long = "verbose", help = "Print diagnostics to stderr")]
    pub verbose: bool,

    #[arg(help = "Photo of the item or space to reflect on")]
    pub image: Option<PathBuf>,
}
