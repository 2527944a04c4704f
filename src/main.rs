use clap::Parser;
use splitwiser::api::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    match cli.command {
        Some(Command::Serve { port }) => {
            if let Err(e) = splitwiser::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = splitwiser::api::run_cli(cli.split) {
                tracing::debug!(error = ?e, "split failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
