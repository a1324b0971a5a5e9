use tracing_subscriber::EnvFilter;

use crate::cli::LogFormatArg;

/// Installs the global subscriber. Logs go to stderr so stdout only
/// carries command output.
pub fn init(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Pretty => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}
