pub mod cli;
pub mod export;
pub mod formats;
pub mod model;
pub mod profile;
pub mod render;
pub mod runtime;
pub mod segment;
pub mod ui;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
