#[tokio::main]
async fn main() -> std::io::Result<()> {
    robots_server::run_with_config().await
}
