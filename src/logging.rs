use log::{Level, LevelFilter};
use std::io;

const LOG_FILE: &str = "/tmp/autoinst.log";

/// Installs the logger used while the devices are planned.
///
/// Every record is handed to the callback, so that front ends may display
/// the progress of the proposal, and is also written to stderr and log files.
pub fn log<F>(callback: F) -> Result<(), fern::InitError>
where
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    fern::Dispatch::new()
        .level(LevelFilter::Debug)
        // Front end progress
        .chain(fern::Output::call(move |record| {
            callback(record.level(), &format!("{}", record.args()))
        }))
        // Terminal and log files
        .chain({
            let mut logger = fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} autoinst{}] {}",
                        record.level(),
                        match (record.file(), record.line()) {
                            (Some(file), Some(line)) => format!(":{}:{}", file, line),
                            _ => "".into(),
                        },
                        message
                    ))
                })
                .chain(io::stderr());

            match fern::log_file(LOG_FILE) {
                Ok(log) => logger = logger.chain(log),
                Err(why) => {
                    eprintln!("failed to create log file at {}: {}", LOG_FILE, why);
                }
            };

            // A copy in the home directory, when there is one.
            if let Some(home) = dirs::home_dir() {
                match fern::log_file(&home.join("autoinst.log")) {
                    Ok(log) => logger = logger.chain(log),
                    Err(why) => {
                        eprintln!("failed to set up logging for the home directory: {}", why);
                    }
                }
            }

            logger
        })
        .apply()?;

    info!("logging enabled");
    Ok(())
}
