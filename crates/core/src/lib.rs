pub mod agent_client;
pub mod classify;
pub mod llm_client;
pub mod router;
pub mod tools;
pub mod turn;

/// Represents commands that the core logic issues to an external runtime.
///
/// This enum is the primary API for decoupling the per-turn routing outcome
/// from the runtime's execution of side effects (like speaking text or
/// ending the dialog session).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Command the runtime to speak the given text to the user.
    SpeakText(String),
    /// Command indicating the session is complete, with a final message.
    SessionComplete(String),
}
