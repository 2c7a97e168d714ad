#[tokio::main]
async fn main() {
    if let Err(e) = rolodex_demo::run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
