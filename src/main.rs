// SPDX-License-Identifier: MPL-2.0
use iced_resize::app::{self, config, paths, Flags};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
iced_resize - upload an image to a resize service and fetch the result

USAGE:
  iced_resize [OPTIONS] [FILE]

OPTIONS:
  --lang <LANG>          UI language (e.g. en-US, fr)
  --config-dir <DIR>     Directory holding settings.toml
  --upload-url <URL>     Upload endpoint, overrides [service] upload_url
  --storage-url <URL>    Artifact storage base, overrides [service] storage_base_url
  -h, --help             Print this help

ARGS:
  <FILE>                 Image to preselect
";

/// Parses the command line; `Ok(None)` means help was requested.
fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        upload_url: args.opt_value_from_str("--upload-url")?,
        storage_url: args.opt_value_from_str("--storage-url")?,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    }))
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iced_resize=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    match config::write_default_if_missing(None) {
        Ok(true) => tracing::info!("default settings written"),
        Ok(false) => {}
        Err(err) => tracing::warn!(error = %err, "default settings could not be written"),
    }

    app::run(flags)
}
