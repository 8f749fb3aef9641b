// This main function is the entry point when running `cargo run -p web-server`.
// It loads the configuration and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configuration::init_tracing()?;
    let settings = configuration::load_settings()?;
    web_server::run_server(&settings).await
}
