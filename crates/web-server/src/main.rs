// Entry point for `cargo run -p web-server`. Loads configuration, sets up
// tracing and hands over to the library's `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    web_server::run_server(&settings).await
}
