//! Command implementations.

pub mod process;
pub mod process_all;
pub mod status;
pub mod verify;

use std::path::PathBuf;

use milon::provider::{ProviderSettings, Services};

/// Build the service bundle from an optional settings file and the
/// offline override flag.
pub(crate) fn services(
    settings: Option<PathBuf>,
    offline: bool,
) -> Result<Services, Box<dyn std::error::Error>> {
    let mut settings = match settings {
        Some(path) => ProviderSettings::load(path)?,
        None => ProviderSettings::default(),
    };
    if offline {
        settings.offline = true;
    }
    tracing::debug!(
        translation = ?settings.translation,
        sentences = ?settings.sentences,
        offline = settings.offline,
        "Provider settings resolved"
    );
    Ok(Services::new(settings))
}
