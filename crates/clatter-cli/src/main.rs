mod cli_args;
mod commands;
mod wav;

use std::process::ExitCode;

use clap::Parser;

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<clatter::Error>() {
        Some(clatter::Error::BadArgument { .. }) => ExitCode::from(2),
        Some(clatter::Error::UnknownMaterial(_)) => ExitCode::from(3),
        Some(clatter::Error::MaterialNotLoaded(_)) => ExitCode::from(3),
        Some(clatter::Error::BundleCorrupt(_)) => ExitCode::from(4),
        Some(clatter::Error::Io(_)) => ExitCode::from(4),
        _ => ExitCode::from(4),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = cli_args::CliArgs::parse();
    match commands::dispatch_command(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    }
}
