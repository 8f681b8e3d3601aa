use crate::snake::Position;

/// Notifications emitted by the session for audio/UI collaborators.
///
/// Subscribers registered with [`crate::GameSession::subscribe`] receive
/// each event synchronously during the tick that produced it; no return
/// value is expected from them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    /// The snake ate the food at `position` this tick.
    FoodEaten { position: Position },
    /// The session transitioned to game over with the final `score`.
    GameOver { score: u32 },
}
