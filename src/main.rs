// pseudopy: pseudocode to Python translator

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use pseudopy::runner::{Executor, ProgramInput, PythonRunner, RunnerConfig, RuntimeError};
use pseudopy::ui::App;
use pseudopy::{tokenize, translate};

#[derive(Parser)]
#[command(name = "pseudopy")]
#[command(about = "Translate structured pseudocode into Python")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a pseudocode file to Python
    Translate {
        /// Input pseudocode file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the generated code here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Translate a pseudocode file and run the result
    Run {
        /// Input pseudocode file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Feed this file to the program's stdin instead of the terminal
        #[arg(long, value_name = "FILE")]
        stdin: Option<PathBuf>,

        #[command(flatten)]
        runner: RunnerArgs,
    },

    /// Lexically analyze a pseudocode file
    Lex {
        /// Input pseudocode file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token locations
        #[arg(short, long)]
        locations: bool,
    },

    /// Open the interactive viewer
    Tui {
        /// Input pseudocode file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        runner: RunnerArgs,
    },
}

#[derive(Args)]
struct RunnerArgs {
    /// Python interpreter (default: $PSEUDOPY_PYTHON or python3)
    #[arg(long, value_name = "BIN")]
    python: Option<String>,

    /// Kill the program after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl RunnerArgs {
    fn config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env();
        if let Some(python) = &self.python {
            config = config.with_python(python.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Translate { input, output } => translate_file(input, output.as_deref()),
        Commands::Run {
            input,
            stdin,
            runner,
        } => run_file(input, stdin.as_deref(), runner.config()),
        Commands::Lex { input, locations } => lex_file(input, *locations),
        Commands::Tui { input, runner } => run_tui(input, runner.config()),
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("Failed to read '{}'", input.display()))
}

fn translate_source(input: &Path) -> Result<String> {
    let source = read_source(input)?;
    debug!("translating {}", input.display());
    translate(&source).with_context(|| format!("Failed to translate '{}'", input.display()))
}

fn translate_file(input: &Path, output: Option<&Path>) -> Result<()> {
    let code = translate_source(input)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", code))
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", code),
    }

    Ok(())
}

fn run_file(input: &Path, stdin: Option<&Path>, config: RunnerConfig) -> Result<()> {
    let code = translate_source(input)?;

    let program_input = match stdin {
        Some(path) => ProgramInput::Text(read_source(path)?),
        None => ProgramInput::Inherit,
    };

    let runner = PythonRunner::new(config);
    let result = runner.execute(&code, &program_input);

    // a failure's stderr is already part of its error message
    let (stdout, stderr) = match &result {
        Ok(output) => (output.stdout.as_str(), output.stderr.as_str()),
        Err(RuntimeError::Failed { stdout, .. }) | Err(RuntimeError::Timeout { stdout, .. }) => {
            (stdout.as_str(), "")
        }
        Err(_) => ("", ""),
    };
    io::stdout().write_all(stdout.as_bytes())?;
    io::stderr().write_all(stderr.as_bytes())?;

    result.map(|_| ()).context("Runtime error")
}

fn lex_file(input: &Path, locations: bool) -> Result<()> {
    let source = read_source(input)?;
    let tokens = tokenize(&source)
        .with_context(|| format!("Failed to tokenize '{}'", input.display()))?;

    for token in tokens {
        if locations {
            println!("{:>4}:{:<3} {}", token.location.line, token.location.column, token);
        } else {
            println!("{}", token);
        }
    }

    Ok(())
}

fn run_tui(input: &Path, config: RunnerConfig) -> Result<()> {
    let source = read_source(input)?;
    let mut app = App::new(input.to_path_buf(), source, Box::new(PythonRunner::new(config)));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")
}
