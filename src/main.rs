use clap::Parser;
use scafstitch::{run_stitch, Args};

fn main() {
    let args = Args::parse();
    if let Err(err) = run_stitch(&args) {
        eprintln!("scafstitch: {}", err);
        std::process::exit(1);
    }
}
