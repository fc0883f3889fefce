use clap::{Parser, Subcommand, ValueEnum};

use crate::translation::Format;

#[derive(Parser, Debug)]
#[command(name = "gptl")]
#[command(about = "Translate plain text and EditorJS documents with OpenAI chat completions")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<String>,

    /// Source locale (e.g., en, en-US)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target locale (e.g., ja, de-DE)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Declared format of the input
    #[arg(long, value_enum, default_value_t = FormatArg::Plain)]
    pub format: FormatArg,

    /// Treat the input as a JSON array of strings and print a JSON array
    #[arg(short = 'b', long)]
    pub batch: bool,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Completion token limit per item (overrides OPENAI_MAX_TOKENS)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Extra instruction appended to every prompt (overrides OPENAI_GENERAL_PROMPT)
    #[arg(short = 'p', long = "prompt")]
    pub general_prompt: Option<String>,

    /// Suppress the spinner and warnings
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the provider usage report
    Usage,
    /// Show the resolved configuration
    Config {
        /// Write a starter config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Plain,
    Editorjs,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Editorjs => Self::EditorJs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_translate_args() {
        let args = Args::parse_from([
            "gptl", "--from", "en", "--to", "ja", "--format", "editorjs", "--batch", "doc.json",
        ]);
        assert_eq!(args.from.as_deref(), Some("en"));
        assert_eq!(args.to.as_deref(), Some("ja"));
        assert_eq!(Format::from(args.format), Format::EditorJs);
        assert!(args.batch);
        assert_eq!(args.file.as_deref(), Some("doc.json"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_subcommand() {
        let args = Args::parse_from(["gptl", "config", "--init", "-q"]);
        assert!(matches!(args.command, Some(Command::Config { init: true })));
        assert!(args.quiet);
    }
}
