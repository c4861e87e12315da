use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "runpad", about = "Terminal code runner backed by a Piston service", version)]
pub struct Cli {
    /// Language to start with (see --list-languages).
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Editor theme to start with (see --list-themes).
    #[arg(short = 't', long)]
    pub theme: Option<String>,

    /// Base URL of the execution service.
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// List supported languages and exit.
    #[arg(long = "list-languages", visible_alias = "ll")]
    pub list_languages: bool,

    /// List available themes and exit.
    #[arg(long = "list-themes", visible_alias = "lt")]
    pub list_themes: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
