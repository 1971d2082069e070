#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wallboard_backend::run().await
}
