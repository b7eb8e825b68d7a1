use checkers_link::web;

#[tokio::main]
async fn main() {
    println!("Checkers Link - Shareable-Link Checkers");
    println!("========================================\n");

    if let Err(e) = web::run_server().await {
        eprintln!("server error: {}", e);
        std::process::exit(1);
    }
}
