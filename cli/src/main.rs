use anyhow::anyhow;
use clap::Parser;
use cli::{driver, repl};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script file with definitions and a goal
    file: Option<String>,

    /// Target function to induct on (term syntax)
    #[arg(long)]
    target: Option<String>,

    /// One entry of the argument pattern (repeat per argument)
    #[arg(long = "arg")]
    args: Vec<String>,

    /// Start an interactive session
    #[arg(long)]
    repl: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.file {
        Some(file) if !cli.repl => {
            let target = cli
                .target
                .ok_or_else(|| anyhow!("--target is required when running a script"))?;
            driver::run_file(&file, &target, &cli.args)
        }
        _ => {
            repl::start();
            Ok(())
        }
    }
}
