//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::load_engine_config;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let engine = load_engine_config(config_path)?;

    println!("🚀 Starting Fathom API server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(path) = config_path {
        println!("   Config: {}", path.display());
    }
    if allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = fathom_server::ServerConfig { allowed_origins };
    fathom_server::serve_with_config(engine, host, port, config).await?;

    Ok(())
}
