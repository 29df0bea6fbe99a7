fn main() {
    if let Err(e) = tick::tui::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
