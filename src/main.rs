#[tokio::main]
async fn main() {
    expresso::start_server().await;
}
