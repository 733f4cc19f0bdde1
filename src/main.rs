#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    env_logger::init();

    let result = if std::env::args_os().count() <= 1 {
        cellseg_rs::ui::run(None)
    } else {
        cellseg_rs::run_cli()
    };

    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
