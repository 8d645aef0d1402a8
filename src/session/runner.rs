use crate::client::QueryClient;
use crate::session::commands::{Command, QueryJob};
use crate::session::controller::SessionController;
use crate::session::events::Message;

/// Run one query job to completion and wrap the outcome as the message the
/// controller expects. The adapter call is the only suspension point.
pub async fn execute<C: QueryClient>(client: &C, job: QueryJob) -> Message {
    match client.query(&job.criteria).await {
        Ok(page) => Message::SearchCompleted(job.generation, page),
        Err(e) => Message::SearchFailed(job.generation, format!("{e:#}")),
    }
}

/// Feed a message into the controller and keep executing the commands it
/// returns until the session settles. With a single caller this serializes
/// requests; overlapping submits are only possible when multiple dispatches
/// are raced deliberately.
pub async fn dispatch<C: QueryClient>(
    controller: &mut SessionController,
    client: &C,
    msg: Message,
) {
    let mut command = controller.update(msg);
    while let Command::ExecuteSearch(job) = command {
        let reply = execute(client, job).await;
        command = controller.update(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{Criteria, SearchTarget};
    use crate::schemas::{Comment, Page};
    use crate::session::controller::Status;
    use anyhow::{Result, anyhow};
    use std::sync::Mutex;

    struct StubClient {
        responses: Mutex<Vec<Result<Page>>>,
    }

    impl StubClient {
        fn new(responses: Vec<Result<Page>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    impl QueryClient for StubClient {
        fn query(
            &self,
            _criteria: &Criteria,
        ) -> impl std::future::Future<Output = Result<Page>> + Send {
            let next = self.responses.lock().unwrap().remove(0);
            async move { next }
        }
    }

    fn comment(id: &str, created_utc: i64) -> Comment {
        Comment {
            author: "a".to_string(),
            body: "b".to_string(),
            created_utc,
            id: id.to_string(),
            score: 0,
            subreddit: "rust".to_string(),
            permalink: None,
            link_id: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_search_success() {
        let client = StubClient::new(vec![Ok(Page::Comments(vec![comment("c1", 100)]))]);
        let mut controller = SessionController::new();

        dispatch(&mut controller, &client, Message::SearchRequested).await;

        let state = controller.state();
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.last_error, None);
        assert_eq!(state.results.as_ref().map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn test_dispatch_search_failure_sets_error() {
        let client = StubClient::new(vec![Err(anyhow!("connection refused"))]);
        let mut controller = SessionController::new();

        dispatch(&mut controller, &client, Message::SearchRequested).await;

        let state = controller.state();
        assert_eq!(state.status, Status::Idle);
        let err = state.last_error.as_ref().expect("error recorded");
        assert!(err.message.contains("connection refused"));
        assert!(state.results.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_more_appends() {
        let client = StubClient::new(vec![
            Ok(Page::Comments(vec![comment("c1", 300), comment("c2", 200)])),
            Ok(Page::Comments(vec![comment("c3", 100)])),
        ]);
        let mut controller = SessionController::new();

        dispatch(&mut controller, &client, Message::SearchRequested).await;
        assert!(controller.can_load_more());
        dispatch(&mut controller, &client, Message::MoreRequested).await;

        let state = controller.state();
        assert_eq!(state.results.as_ref().map(|p| p.len()), Some(3));
        assert_eq!(
            state.results.as_ref().map(|p| p.target()),
            Some(SearchTarget::Comments)
        );
    }
}
