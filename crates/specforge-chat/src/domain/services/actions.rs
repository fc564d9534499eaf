use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::PendingExchange;
use crate::domain::models::SpecClientBox;

async fn request_spec(
    spec_client: &SpecClientBox,
    pending: PendingExchange,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let outcome = spec_client.generate_spec(&pending.prompt).await;
    event_tx.send(Event::SpecResponse(pending.complete(outcome)))?;

    Ok(())
}

/// Runs endpoint requests off the caller's loop and reports their replies as events.
///
/// Requests are never cancelled. A reply for an exchange the caller has since
/// abandoned is still delivered, and the chat state discards it by generation.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        spec_client: SpecClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let spec_client_arc = Arc::new(spec_client);

        while let Some(action) = rx.recv().await {
            match action {
                Action::SpecRequest(pending) => {
                    let client_worker = spec_client_arc.clone();
                    let worker_event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        if let Err(err) =
                            request_spec(&client_worker, pending, &worker_event_tx).await
                        {
                            tracing::error!(error = ?err, "failed to deliver spec response");
                        }
                    });
                }
            }
        }

        Ok(())
    }
}
