extern crate qrcode;

#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use std::path::Path;

use crate::error::ProcessError;
use crate::notify::{Console, Notifier};

mod error;
mod notify;
mod transform;

const USAGE: &str = "Drag and drop a .conf file onto this executable\n\
                     Or run: wg-iosready <config_file.conf>";

fn cli() -> clap::Command<'static> {
    clap::Command::new("wg-iosready")
        .version("0.1.0")
        .about("Makes WireGuard .conf files iOS-ready and renders them as QR codes")
        .arg(
            clap::Arg::new("config")
                .help("WireGuard .conf file to process")
                .value_name("FILE")
                .required(true),
        )
}

/// Validates the argument and runs the transform, turning every outcome into
/// a notification. Exit status stays 0 throughout; failures are for the user
/// to read, not for scripts to branch on.
fn run(notifier: &dyn Notifier) {
    let args = match cli().try_get_matches() {
        Ok(args) => args,
        Err(_) => {
            notifier.info("Usage", USAGE);
            return;
        }
    };

    // required arg, present whenever parsing succeeded
    let config_file = Path::new(args.value_of("config").unwrap());

    if !config_file.exists() {
        let err = ProcessError::NotFound(config_file.to_path_buf());
        notifier.error("File Not Found", &format!("Error: {}", err));
        return;
    }

    let is_conf = config_file
        .extension()
        .map(|e| e.eq_ignore_ascii_case("conf"))
        .unwrap_or(false);
    if !is_conf {
        let err = ProcessError::BadExtension(config_file.to_path_buf());
        notifier.error("Invalid File Type", &format!("Error: {}", err));
        return;
    }

    match transform::process(config_file) {
        Ok(artifacts) => notifier.info(
            "Success!",
            &format!(
                "\u{2713} Configuration processed successfully!\n\
                 \u{2713} iOS-ready config created: {}\n\
                 \u{2713} QR code generated for easy import: {}",
                artifacts.conf_path.display(),
                artifacts.qr_path.display()
            ),
        ),
        Err(err) => {
            warn!("Processing failed: {}", err);
            notifier.error(
                "Processing Failed",
                &format!("\u{2717} Processing failed: {}", err),
            );
        }
    }
}

fn main() {
    pretty_env_logger::init();
    run(&Console);
}
