/// FC3D Terminal - Four Corners states extruded over a base grid
///
/// Controls:
///   - Left/Right arrows: Step the camera around the scene (keys mode)
///   - Mouse drag / wheel: Orbit and zoom (orbit mode)
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use fc3d_terminal::{cli::Cli, TerminalApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Cli::parse()
        .into_config()
        .context("failed to read the view configuration")?;

    let mut app = TerminalApp::new(config).context("cannot start the terminal viewer")?;
    app.run().context("terminal viewer stopped")?;

    Ok(())
}
