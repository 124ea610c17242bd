pub mod deck;
pub mod difficulty;
pub mod session;
pub mod shuffle;
pub mod timer;

pub use deck::{build_deck, Arrange, Card, CardStatus, InOrder, Shuffled};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use session::{ClickOutcome, Completion, PendingUnflip, Phase, Session, MISMATCH_DELAY};
pub use shuffle::shuffle;
pub use timer::{GameTimer, TimerToken};
