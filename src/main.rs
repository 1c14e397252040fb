use clap::Parser;
use miniexam::config::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match miniexam::run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
