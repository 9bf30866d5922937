#[tokio::main(flavor = "current_thread")]
async fn main() {
    cardboard::run_cli().await;
}
