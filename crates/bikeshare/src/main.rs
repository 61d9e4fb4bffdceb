mod bootstrap;
mod session;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_ui::prompt::Console;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    settings.validate()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    session::run(&mut console, &settings)?;

    tracing::info!("Bikeshare explorer finished");
    Ok(())
}
