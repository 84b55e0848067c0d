#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bloglist_server::run().await
}
