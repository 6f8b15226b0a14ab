use crate::interpreter::DEFAULT_PROMPT;
use argh::FromArgs;
use log::LevelFilter;
use std::str::FromStr;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_ENV: &str = "LSH_LOG";

#[derive(FromArgs, Debug)]
/// A minimal interactive command interpreter.
/// Runs the builtins cd, help and exit; everything else is started as a program.
pub struct Config {
    /// text written before each line is read
    #[argh(option, default = "DEFAULT_PROMPT.to_owned()")]
    pub prompt: String,

    /// read lines through a line editor with history instead of plain stdin
    #[argh(switch)]
    pub editor: bool,

    /// diagnostic log level written to stderr: off, error, warn, info, debug or trace
    #[argh(option)]
    pub log_level: Option<LevelFilter>,
}

impl Config {
    /// Log level from the command line, then from [`LOG_ENV`], else off.
    ///
    /// An unparsable environment value is ignored.
    pub fn log_level(&self, env_value: Option<&str>) -> LevelFilter {
        self.log_level
            .or_else(|| env_value.and_then(|v| LevelFilter::from_str(v.trim()).ok()))
            .unwrap_or(LevelFilter::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, argh::EarlyExit> {
        Config::from_args(&["lsh"], args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.prompt, "> ");
        assert!(!config.editor);
        assert_eq!(config.log_level(None), LevelFilter::Off);
    }

    #[test]
    fn test_options() {
        let config = parse(&["--prompt", "$ ", "--editor", "--log-level", "debug"]).unwrap();
        assert_eq!(config.prompt, "$ ");
        assert!(config.editor);
        assert_eq!(config.log_level(Some("error")), LevelFilter::Debug);
    }

    #[test]
    fn test_log_level_from_environment() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.log_level(Some("INFO")), LevelFilter::Info);
        assert_eq!(config.log_level(Some("loud")), LevelFilter::Off);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let err = parse(&["--log-level", "loud"]).unwrap_err();
        assert!(err.status.is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        assert!(parse(&["--pipes"]).unwrap_err().status.is_err());
    }
}
