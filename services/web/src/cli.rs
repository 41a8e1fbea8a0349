use crate::commands::{run_languages, run_translate, TranslateArgs};
use crate::server;
use ai_translator::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AI Translator",
    about = "Translate English text into 25+ languages using Gemini AI",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the web form and JSON API (default command)
    Serve(ServeArgs),
    /// Translate a single piece of text and print the result
    Translate(TranslateArgs),
    /// List the supported target languages
    Languages,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Translate(args) => run_translate(args).await,
        Command::Languages => {
            run_languages();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["ai-translator-web"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_translate_arguments() {
        let cli = Cli::try_parse_from([
            "ai-translator-web",
            "translate",
            "--to",
            "Italian",
            "Good",
            "evening",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Translate(args)) => {
                assert_eq!(args.language, "Italian");
                assert_eq!(args.text(), "Good evening");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn translate_requires_target_language() {
        let result = Cli::try_parse_from(["ai-translator-web", "translate", "Hello"]);
        assert!(result.is_err());
    }
}
