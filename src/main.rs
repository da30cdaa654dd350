use std::process;

fn main() {
    if let Err(e) = herochat::cli::main() {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}
