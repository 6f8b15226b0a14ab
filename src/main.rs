use lsh::config::{Config, LOG_ENV};
use lsh::reader::{EditorReader, LineSource, PromptedReader};
use lsh::{Interpreter, Streams};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config: Config = argh::from_env();
    let env_level = std::env::var(LOG_ENV).ok();
    if let Err(e) = lsh::logger::init(config.log_level(env_level.as_deref())) {
        eprintln!("lsh: {e}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lsh: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let sh = Interpreter::default().with_prompt(config.prompt.as_str());
    let mut source: Box<dyn LineSource> = if config.editor {
        Box::new(EditorReader::new()?)
    } else {
        Box::new(PromptedReader::new(io::stdin().lock(), io::stdout()))
    };

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut streams = Streams {
        stdout: &mut stdout,
        stderr: &mut stderr,
    };
    sh.repl(source.as_mut(), &mut streams)
}
