use std::io::{self, BufRead, Write};

use bikeshare_core::formatting::format_count;
use bikeshare_core::settings::Settings;
use bikeshare_data::filter::apply_filters;
use bikeshare_data::reader::load_dataset;
use bikeshare_ui::pager::page_through;
use bikeshare_ui::prompt::Console;
use bikeshare_ui::report::print_reports;
use tracing::{info, warn};

/// Run rounds until the user declines to restart or input runs out.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, settings: &Settings) -> io::Result<()> {
    loop {
        if let Err(err) = run_round(console, settings) {
            return end_of_input(err);
        }
        match console.ask_restart() {
            Ok(true) => continue,
            Ok(false) => return Ok(()),
            Err(err) => return end_of_input(err),
        }
    }
}

/// One prompt → load → filter → page → report cycle.
///
/// Data errors end the round with a message; only console I/O errors are
/// returned.
pub fn run_round<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    settings: &Settings,
) -> io::Result<()> {
    let filters = console.get_filters()?;
    let path = settings.source_path(filters.city);

    // Reloaded every round so no filter state carries over.
    let dataset = match load_dataset(&path, filters.city) {
        Ok(dataset) => dataset,
        Err(err) => {
            warn!("Round aborted for {}: {}", filters.city, err);
            writeln!(
                console.output(),
                "Could not load {} data: {}",
                filters.city,
                err
            )?;
            return Ok(());
        }
    };

    let selection = apply_filters(&dataset, filters.month, filters.day);
    info!(
        "{}: month={} day={} selected {} of {} trips",
        filters.city,
        filters.month,
        filters.day,
        selection.len(),
        dataset.len()
    );
    writeln!(
        console.output(),
        "{} of {} {} trips match (month: {}, day: {}).",
        format_count(selection.len()),
        format_count(dataset.len()),
        filters.city,
        filters.month,
        filters.day
    )?;

    page_through(console, &selection, settings.page_size())?;
    print_reports(console.output(), &selection)
}

/// Closed input is a normal way to leave; anything else is a real failure.
fn end_of_input(err: io::Error) -> io::Result<()> {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        info!("Input closed; exiting");
        Ok(())
    } else {
        Err(err)
    }
}
