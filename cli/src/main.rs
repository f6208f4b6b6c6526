//! Binary entrypoint for specimen.

fn main() {
    if let Err(err) = specimen_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
