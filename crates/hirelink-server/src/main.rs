use clap::Parser;
use hirelink_server::args::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    hirelink_server::run(args).await
}
