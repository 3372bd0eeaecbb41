//! Console Dialog Loop
//!
//! The in-repo stand-in for the voice pipeline: one line of input per turn,
//! one routed call, one spoken line of output, strictly sequentially. A
//! failed turn is spoken as a failure notice and the loop keeps accepting
//! input; only end of input or an exit word ends the session.

use anyhow::Result;
use cosmo_core::{Command, router::RequestRouter, turn::Utterance};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

/// Words that end the session.
const EXIT_WORDS: &[&str] = &["exit", "quit", "goodbye"];

/// What the user hears when a turn fails. The session itself keeps going.
pub const FAILURE_NOTICE: &str = "Sorry, I couldn't reach the home agent. Please try again.";

/// Runs one dialog turn against the router.
///
/// Returns `None` for blank input (no outbound call happens), otherwise the
/// command the runtime should carry out. Backend failures become a spoken
/// failure notice rather than an error, so one bad turn never ends the
/// session.
pub async fn run_turn(router: &RequestRouter, line: &str) -> Option<Command> {
    let utterance = Utterance::new(line)?;
    if EXIT_WORDS.contains(&utterance.as_str().to_lowercase().as_str()) {
        return Some(Command::SessionComplete("Goodbye.".to_string()));
    }
    match router.route(&utterance).await {
        Ok(response) => Some(Command::SpeakText(response.text)),
        Err(err) => {
            error!(error = %err, "Dialog turn failed");
            Some(Command::SpeakText(FAILURE_NOTICE.to_string()))
        }
    }
}

/// Reads utterances from stdin until end of input or an exit word.
pub async fn run_dialog_loop(router: RequestRouter) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_input_marker()?;
    while let Some(line) = lines.next_line().await? {
        match run_turn(&router, &line).await {
            Some(Command::SpeakText(text)) => println!("cosmo> {text}"),
            Some(Command::SessionComplete(text)) => {
                println!("cosmo> {text}");
                return Ok(());
            }
            None => {}
        }
        print_input_marker()?;
    }
    Ok(())
}

fn print_input_marker() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "you> ")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cosmo_core::agent_client::{AgentBackend, AgentError};
    use cosmo_core::classify::HeuristicClassifier;
    use cosmo_core::turn::AgentResponse;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` calls, then answers normally. Counts every
    /// outbound call it sees.
    struct FlakyBackend {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FlakyBackend {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }

        fn respond(&self) -> Result<AgentResponse, AgentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(AgentError::UnexpectedStatus {
                    status: 503,
                    body: "agent offline".to_string(),
                })
            } else {
                Ok(AgentResponse {
                    text: "Done.".to_string(),
                    state: None,
                })
            }
        }
    }

    #[async_trait]
    impl AgentBackend for FlakyBackend {
        async fn simple_request(
            &self,
            _utterance: &Utterance,
        ) -> Result<AgentResponse, AgentError> {
            self.respond()
        }

        async fn complex_request(
            &self,
            _utterance: &Utterance,
        ) -> Result<AgentResponse, AgentError> {
            self.respond()
        }

        async fn check_health(&self) -> Result<(), AgentError> {
            Ok(())
        }
    }

    fn router(backend: Arc<FlakyBackend>) -> RequestRouter {
        RequestRouter::new(Arc::new(HeuristicClassifier::new()), backend)
    }

    #[tokio::test]
    async fn successful_turns_speak_the_agent_reply() {
        let backend = Arc::new(FlakyBackend::new(0));
        let router = router(backend.clone());

        let command = run_turn(&router, "turn off the kitchen lights").await;
        assert_eq!(command, Some(Command::SpeakText("Done.".to_string())));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_turns_speak_a_notice_and_the_loop_continues() {
        let backend = Arc::new(FlakyBackend::new(1));
        let router = router(backend.clone());

        let first = run_turn(&router, "turn off the kitchen lights").await;
        assert_eq!(
            first,
            Some(Command::SpeakText(FAILURE_NOTICE.to_string()))
        );

        // The next utterance is processed normally.
        let second = run_turn(&router, "turn off the kitchen lights").await;
        assert_eq!(second, Some(Command::SpeakText("Done.".to_string())));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_lines_make_no_outbound_call() {
        let backend = Arc::new(FlakyBackend::new(0));
        let router = router(backend.clone());

        assert_eq!(run_turn(&router, "   ").await, None);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn exit_words_end_the_session_without_a_call() {
        let backend = Arc::new(FlakyBackend::new(0));
        let router = router(backend.clone());

        let command = run_turn(&router, "goodbye").await;
        assert_eq!(
            command,
            Some(Command::SessionComplete("Goodbye.".to_string()))
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
