use clap::{Parser, ValueEnum};
use shared::settings::FrontendKind;
use shared::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pause-dialog",
    version,
    about = "Ask a human to make a decision on behalf of an agent"
)]
pub struct Cli {
    /// Decision request as JSON: {"decision_context": .., "options": [..], "default_action": ..}
    pub request: Option<String>,

    /// Presentation layer (defaults to the settings file, then "window")
    #[arg(long, value_enum)]
    pub frontend: Option<FrontendArg>,

    /// Directory holding the preference and history files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// How the answer is printed
    #[arg(long, value_enum, default_value_t = FormatArg::Plain)]
    pub format: FormatArg,

    /// Web front-end only: print the URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontendArg {
    Window,
    Web,
}

impl From<FrontendArg> for FrontendKind {
    fn from(arg: FrontendArg) -> Self {
        match arg {
            FrontendArg::Window => FrontendKind::Window,
            FrontendArg::Web => FrontendKind::Web,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// CANCELLED or <response>|||<mode>
    Plain,
    /// {"status": .., "response": .., "thinking_mode": ..}
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_optional_positional() {
        let cli = Cli::try_parse_from(["pause-dialog"]).unwrap();
        assert!(cli.request.is_none());

        let cli = Cli::try_parse_from(["pause-dialog", r#"{"decision_context": "x"}"#]).unwrap();
        assert_eq!(cli.request.as_deref(), Some(r#"{"decision_context": "x"}"#));
        assert_eq!(cli.format, FormatArg::Plain);
        assert!(cli.frontend.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "pause-dialog",
            "{}",
            "--frontend",
            "web",
            "--format",
            "json",
            "--data-dir",
            "/tmp/pause",
            "--no-browser",
        ])
        .unwrap();
        assert_eq!(cli.frontend, Some(FrontendArg::Web));
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pause")));
        assert!(cli.no_browser);
    }

    #[test]
    fn test_unknown_frontend_is_rejected() {
        assert!(Cli::try_parse_from(["pause-dialog", "{}", "--frontend", "tui"]).is_err());
    }
}
