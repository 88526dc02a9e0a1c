fn main() {
    if let Err(err) = wordgrep::cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
