//! CLI command implementations.

pub mod config;
pub mod play;
pub mod replay;

use jass_sync_core::Notice;

/// Terminal line for a notice, if it has one.
///
/// Server errors already arrive as an "Error: ..." message line.
pub fn describe(notice: &Notice) -> Option<String> {
    match notice {
        Notice::Message(line) => Some(line.clone()),
        Notice::Rejected(rejection) => Some(format!("Not allowed: {}", rejection)),
        Notice::Inconsistency(issue) => Some(format!("(repaired) {}", issue)),
        Notice::StateChanged | Notice::ServerError(_) => None,
    }
}
