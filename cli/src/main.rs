//! Binary entrypoint for yurimerge

fn main() {
    if let Err(err) = yurimerge_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
