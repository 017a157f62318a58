use std::process;

use voxmerge_cli::args::{parse_args, Command, USAGE};
use voxmerge_cli::commands;
use voxmerge_cli::report;
use voxmerge_cli::JobError;
use voxmerge_core::MaterialTable;
use voxmerge_merge::LogProgress;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        if matches!(e, JobError::Usage(_)) {
            eprintln!("\n{USAGE}");
        }
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), JobError> {
    let command = parse_args(args)?;
    let materials = MaterialTable::builtin()?;

    match command {
        Command::Help => eprintln!("{USAGE}"),
        Command::Merge { job, json } => {
            let report = commands::run_merge(&job, &materials, LogProgress)?;
            println!("{}", report::format_summary(&report));
            if let Some(path) = json {
                report::save_report(&path, &report)?;
                log::info!("saved report to {}", path.display());
            }
        }
        Command::Generate(generate) => {
            let volume = commands::run_generate(&generate, &materials)?;
            println!(
                "wrote {} ({} filled cells)",
                generate.out.display(),
                volume.filled_cell_count()
            );
        }
        Command::Inspect { path } => {
            print!("{}", commands::run_inspect(&path, &materials)?);
        }
    }

    Ok(())
}
