use clap::Parser;
use wealth_projection::api::{
    self,
    cli::{Cli, CliError, Command, calculate},
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Serve(args) => api::run_http_server(args.socket_addr())
            .await
            .map_err(CliError::from),
        Command::Calculate(calculation) => calculate(&calculation).map(|output| {
            println!("{output}");
        }),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
