#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront::start_server().await
}
