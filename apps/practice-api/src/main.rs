#[tokio::main]
async fn main() -> anyhow::Result<()> {
    latex_drill_api::run().await
}
