//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Err(err) = fivestar_cli::run() {
        eprintln!("fivestar: {err}");
        std::process::exit(1);
    }
}
