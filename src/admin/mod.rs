//! Administrative console commands

use eyre::Result;

pub mod lstraits;

use crate::console::ConsoleHost;
use crate::server::ServerData;
use lstraits::LsTraits;

/// Register every admin command against the loaded server data
pub fn register_all<'a>(host: &mut ConsoleHost<'a>, data: &'a ServerData) -> Result<()> {
    host.register(Box::new(LsTraits::new(
        &data.sessions,
        &data.preferences,
        &data.prototypes,
        &data.locale,
    )))?;
    Ok(())
}
