const USAGE: &str = "Usage: wishwall [--version | --help]

Environment:
  WISHWALL_DATABASE  sqlx SQLite URL (default sqlite://wishes.db)
  WISHWALL_ADDR      listen address (default 127.0.0.1:5000)
  RUST_LOG           tracing filter (default info)";

#[tokio::main]
async fn main() {
  match std::env::args().nth(1).as_deref() {
    Some("--version" | "-V") => {
      println!("wishwall {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    Some("--help" | "-h") => {
      eprintln!("{USAGE}");
      return;
    }
    Some(other) => {
      eprintln!("unknown argument: {other}\n\n{USAGE}");
      std::process::exit(2);
    }
    None => {}
  }

  if let Err(e) = wishwall::app::run().await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
