use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use folio_core::submit::{ContactClient, ContactPayload};

#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub endpoint: String,
    pub payload: ContactPayload,
}

/// Posts contact submissions one at a time and reports each outcome back
/// to the UI. The client is rebuilt only when the endpoint changes.
pub async fn run_relay(requests: Receiver<RelayRequest>, tx: Sender<AppEvent>) {
    let mut client: Option<ContactClient> = None;

    while let Ok(request) = requests.recv().await {
        let active = match client.take() {
            Some(c) if c.endpoint() == request.endpoint => c,
            _ => ContactClient::new(request.endpoint.clone()),
        };

        let outcome = active.submit(&request.payload).await;
        if outcome.is_delivered() {
            log::info!("Contact message delivered to {}", active.endpoint());
        }
        client = Some(active);

        if tx.send(AppEvent::SubmissionFinished(outcome)).await.is_err() {
            break;
        }
    }
}
