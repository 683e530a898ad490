use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fiscal-roi",
    about = "ROI projection API for finance automation (credit recovery, statement reconciliation, transaction analysis)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = fiscal_roi::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
