use crate::api::ApiClient;
use crate::app::{Completion, FetchOutcome, FetchRequest};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub(super) type CompletionTx = UnboundedSender<Completion>;
pub(super) type CompletionRx = UnboundedReceiver<Completion>;

pub(super) fn completion_channel() -> (CompletionTx, CompletionRx) {
    mpsc::unbounded_channel()
}

/// Run `request` on its own task. The outcome comes back over `done` and is
/// applied by the event loop; fetches are never cancelled.
pub(super) fn spawn_fetch(client: &ApiClient, request: FetchRequest, done: &CompletionTx) {
    let client = client.clone();
    let done = done.clone();
    tokio::spawn(async move {
        let outcome = execute(&client, &request).await;
        let _ = done.send(Completion { request, outcome });
    });
}

pub(super) async fn execute(client: &ApiClient, request: &FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Status => FetchOutcome::Status(client.get_status().await),
        FetchRequest::StreamLatest { after } => {
            FetchOutcome::StreamLatest(client.stream_latest(after).await)
        }
        FetchRequest::RecentTransactions { limit } => {
            FetchOutcome::RecentTransactions(client.recent_transactions(*limit).await)
        }
        FetchRequest::Transaction { id } => FetchOutcome::Transaction(client.transaction(id).await),
        FetchRequest::TopCategories { limit } => {
            FetchOutcome::TopCategories(client.top_categories(*limit).await)
        }
        FetchRequest::TopMerchants { category, limit } => {
            FetchOutcome::TopMerchants(client.top_merchants(category, *limit).await)
        }
        FetchRequest::SpendingRange { days } => {
            FetchOutcome::SpendingRange(client.spending_range(*days).await)
        }
        FetchRequest::Search { query, limit } => {
            FetchOutcome::Search(client.search(query, *limit).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawned_fetch_reports_its_request() {
        let client = ApiClient::dev().unwrap();
        let (done, mut rx) = completion_channel();
        let request = FetchRequest::TopCategories { limit: 3 };

        spawn_fetch(&client, request.clone(), &done);
        let completion = rx.recv().await.expect("completion");

        assert_eq!(completion.request, request);
        match completion.outcome {
            FetchOutcome::TopCategories(Ok(top)) => assert!(top.body.categories.len() <= 3),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn stream_request_starts_from_cursor() {
        let client = ApiClient::dev().unwrap();
        let outcome = execute(&client, &FetchRequest::StreamLatest { after: "0".into() }).await;

        match outcome {
            FetchOutcome::StreamLatest(Ok(latest)) => {
                assert_ne!(latest.stream_id, "0");
                assert!(latest.transaction.is_some());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
