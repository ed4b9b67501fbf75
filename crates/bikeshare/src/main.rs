mod bootstrap;

use std::io;

use anyhow::Result;
use bikeshare_core::options::LinePrompter;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data directory: {}, clear screen: {}",
        settings.data_dir.display(),
        settings.clear_screen()
    );

    bootstrap::check_data_dir(&settings.data_dir);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let prompter = LinePrompter::new(stdin.lock(), stdout.lock());
    let mut session = Session::new(prompter, settings.data_dir.clone(), settings.clear_screen());

    match session.run() {
        Ok(()) => Ok(()),
        Err(err) if err.is_abort() => {
            tracing::info!("session ended by user");
            println!();
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
