//! Request Routing
//!
//! One utterance in, one classification, one outbound call, one response
//! out. The router keeps no state across turns; its collaborators are
//! injected at construction so it stays testable without a live server.

use crate::agent_client::{AgentBackend, AgentError};
use crate::classify::{IntentClassifier, RequestClassification};
use crate::turn::{AgentResponse, Utterance};
use std::sync::Arc;
use tracing::info;

/// Dispatches each utterance to exactly one of the home agent's endpoints.
pub struct RequestRouter {
    classifier: Arc<dyn IntentClassifier>,
    backend: Arc<dyn AgentBackend>,
}

impl RequestRouter {
    pub fn new(classifier: Arc<dyn IntentClassifier>, backend: Arc<dyn AgentBackend>) -> Self {
        Self {
            classifier,
            backend,
        }
    }

    /// Routes one utterance and relays the agent's response unmodified.
    ///
    /// Exactly one outbound call happens per invocation; any backend error
    /// is returned to the caller as-is.
    pub async fn route(&self, utterance: &Utterance) -> Result<AgentResponse, AgentError> {
        let classification = self.classifier.classify(utterance).await;
        info!(%classification, prompt = %utterance, "Routing utterance");
        match classification {
            RequestClassification::Simple => self.backend.simple_request(utterance).await,
            RequestClassification::Complex => self.backend.complex_request(utterance).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_client::MockAgentBackend;
    use crate::classify::HeuristicClassifier;
    use async_trait::async_trait;

    struct FixedClassifier(RequestClassification);

    #[async_trait]
    impl IntentClassifier for FixedClassifier {
        async fn classify(&self, _utterance: &Utterance) -> RequestClassification {
            self.0
        }
    }

    fn response(text: &str) -> AgentResponse {
        AgentResponse {
            text: text.to_string(),
            state: None,
        }
    }

    #[tokio::test]
    async fn simple_utterances_hit_only_the_simple_endpoint() {
        let mut backend = MockAgentBackend::new();
        backend
            .expect_simple_request()
            .times(1)
            .returning(|_| Ok(response("The kitchen lights are off.")));
        backend.expect_complex_request().times(0);

        let router = RequestRouter::new(
            Arc::new(FixedClassifier(RequestClassification::Simple)),
            Arc::new(backend),
        );
        let reply = router
            .route(&Utterance::new("turn off the kitchen lights").unwrap())
            .await
            .unwrap();
        assert_eq!(reply.text, "The kitchen lights are off.");
    }

    #[tokio::test]
    async fn complex_utterances_hit_only_the_complex_endpoint() {
        let mut backend = MockAgentBackend::new();
        backend.expect_simple_request().times(0);
        backend
            .expect_complex_request()
            .times(1)
            .returning(|_| Ok(response("Morning routine created.")));

        let router = RequestRouter::new(
            Arc::new(FixedClassifier(RequestClassification::Complex)),
            Arc::new(backend),
        );
        let reply = router
            .route(
                &Utterance::new(
                    "set up a morning routine that opens the blinds and starts coffee at 7am",
                )
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(reply.text, "Morning routine created.");
    }

    #[tokio::test]
    async fn heuristic_routing_relays_the_simple_reply_verbatim() {
        let mut backend = MockAgentBackend::new();
        backend
            .expect_simple_request()
            .times(1)
            .returning(|_| Ok(response("Done.")));
        backend.expect_complex_request().times(0);

        let router = RequestRouter::new(Arc::new(HeuristicClassifier::new()), Arc::new(backend));
        let reply = router
            .route(&Utterance::new("turn off the kitchen lights").unwrap())
            .await
            .unwrap();
        assert_eq!(reply.text, "Done.");
    }

    #[tokio::test]
    async fn ambiguous_utterances_default_to_the_complex_endpoint() {
        let mut backend = MockAgentBackend::new();
        backend.expect_simple_request().times(0);
        backend
            .expect_complex_request()
            .times(1)
            .returning(|_| Ok(response("Setting a warm scene.")));

        let router = RequestRouter::new(Arc::new(HeuristicClassifier::new()), Arc::new(backend));
        let reply = router
            .route(&Utterance::new("make it cozy in here").unwrap())
            .await
            .unwrap();
        assert_eq!(reply.text, "Setting a warm scene.");
    }

    #[tokio::test]
    async fn backend_errors_pass_through_unchanged() {
        let mut backend = MockAgentBackend::new();
        backend.expect_simple_request().times(1).returning(|_| {
            Err(AgentError::UnexpectedStatus {
                status: 502,
                body: "bad gateway".to_string(),
            })
        });

        let router = RequestRouter::new(
            Arc::new(FixedClassifier(RequestClassification::Simple)),
            Arc::new(backend),
        );
        let error = router
            .route(&Utterance::new("is the door locked").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AgentError::UnexpectedStatus { status: 502, .. }
        ));
    }
}
