pub mod group;
pub mod item;
pub mod view;

use crate::output;
use banktabs_domain::CommandOutcome;

/// Report a rejected command as a CLI error.
pub(crate) fn ensure_applied(outcome: CommandOutcome) {
    if let CommandOutcome::Rejected(reason) = outcome {
        output::output_error(&reason);
    }
}
