//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context};
    use log::{info, warn};

    const PORT: &str = "8000";

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("building wasm package");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => bail!("wasm-pack exited with {status}"),
        Err(e) => warn!("wasm-pack not available ({e}); serving whatever is in static/pkg"),
    }

    info!("serving static/ at http://127.0.0.1:{PORT}");
    let status = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .status()
        .context("failed to start http server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
