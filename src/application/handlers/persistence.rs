//! Proposal save and event publish steps shared by the command handlers.

use crate::domain::foundation::{ErrorCode, EventEnvelope};
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::{EventPublisher, ProposalRepository};

/// Attempts before a save gives up on a proposal that keeps changing underneath it.
pub(crate) const SAVE_ATTEMPTS: usize = 5;

/// Applies `change` to `proposal` and saves it.
///
/// When another writer saved first, the proposal is reloaded and `change`
/// is applied again to the fresh copy, so neither write is lost. Errors
/// returned by `change` (for example `AlreadyPushed` on a reloaded copy)
/// stop the save.
pub(crate) async fn save_proposal<F>(
    repository: &dyn ProposalRepository,
    mut proposal: Proposal,
    mut change: F,
) -> Result<Proposal, ProposalError>
where
    F: FnMut(&mut Proposal) -> Result<(), ProposalError> + Send,
{
    let proposal_id = proposal.id();
    let mut attempt = 1;
    loop {
        change(&mut proposal)?;

        match repository.update(&proposal).await {
            Ok(()) => {
                proposal.mark_saved();
                return Ok(proposal);
            }
            Err(err) if err.code == ErrorCode::ConcurrencyConflict && attempt < SAVE_ATTEMPTS => {
                tracing::warn!(
                    proposal_id = %proposal_id,
                    revision = proposal.revision(),
                    attempt,
                    "Proposal changed concurrently, reloading"
                );
                proposal = repository
                    .find_by_id(&proposal_id)
                    .await
                    .map_err(|e| ProposalError::from_port("reload proposal", e))?
                    .ok_or_else(|| ProposalError::not_found("Proposal", proposal_id))?;
                attempt += 1;
            }
            Err(err) => return Err(ProposalError::from_port("update proposal", err)),
        }
    }
}

/// Publishes an event for a change that is already committed.
///
/// The write stands either way, so a failed publish is logged rather than
/// reported to the caller.
pub(crate) async fn publish_or_log(publisher: &dyn EventPublisher, event: EventEnvelope) {
    let event_type = event.event_type.clone();
    let aggregate_id = event.aggregate_id.clone();
    if let Err(err) = publisher.publish(event).await {
        tracing::error!(
            event_type = %event_type,
            aggregate_id = %aggregate_id,
            error = %err,
            "Event publish failed after commit"
        );
    }
}
