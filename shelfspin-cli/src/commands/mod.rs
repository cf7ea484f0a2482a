//! CLI command implementations.

pub mod context;
pub mod list;
pub mod pick;
pub mod shell;

use shelfspin_core::CoreError;
use shelfspin_fetch::FetchError;

/// The one-line message shown to the user for a failed command.
pub fn describe_error(err: &anyhow::Error) -> String {
    if let Some(fetch) = err.downcast_ref::<FetchError>() {
        fetch.user_message()
    } else if let Some(core) = err.downcast_ref::<CoreError>() {
        core.to_string()
    } else {
        format!("{err:#}")
    }
}
