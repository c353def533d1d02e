#[tokio::main]
async fn main() -> anyhow::Result<()> {
    design_extractor_lib::run().await
}
