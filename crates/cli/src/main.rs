use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    bharatshop_cli::run().await
}
