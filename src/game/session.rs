use std::time::Duration;

use super::deck::{lay_out_pairs, Arrange, Card, CardStatus, Shuffled};
use super::difficulty::{Difficulty, DifficultyConfig};
use super::timer::{GameTimer, TimerToken};
use crate::error::{ConfigError, InputError};

pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneSelected,
    Resolving,
    Won,
}

/// Result of a finished board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub moves: u32,
    pub seconds_elapsed: u32,
    pub difficulty: Difficulty,
    pub grid_size: usize,
}

impl Completion {
    pub fn message(&self) -> String {
        format!(
            "🎉 You won in {} moves and {} seconds!",
            self.moves, self.seconds_elapsed
        )
    }
}

/// A mismatched pair waiting to be turned back over. Only the session that
/// produced it can resolve it; a reset in between makes it stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingUnflip {
    generation: u64,
    pub first: usize,
    pub second: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// First card of a pair. `timer` is set when this click started the clock.
    Revealed {
        index: usize,
        timer: Option<TimerToken>,
    },
    Matched {
        first: usize,
        second: usize,
        completion: Option<Completion>,
    },
    Mismatched(PendingUnflip),
}

/// Turn state machine for one board. Rendering is left to whoever drives it.
pub struct Session {
    difficulty: Difficulty,
    config: DifficultyConfig,
    order: Box<dyn Arrange>,
    cards: Vec<Card>,
    first_selection: Option<usize>,
    second_selection: Option<usize>,
    locked: bool,
    matched_pairs: usize,
    move_count: u32,
    timer: GameTimer,
    timer_started: bool,
    won: bool,
    generation: u64,
    mismatch_delay: Duration,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Result<Self, ConfigError> {
        Self::with_order(
            difficulty,
            difficulty.config(),
            Box::new(Shuffled(rand::rng())),
        )
    }

    pub fn with_order(
        difficulty: Difficulty,
        config: DifficultyConfig,
        order: Box<dyn Arrange>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            difficulty,
            config,
            order,
            cards: Vec::new(),
            first_selection: None,
            second_selection: None,
            locked: false,
            matched_pairs: 0,
            move_count: 0,
            timer: GameTimer::new(),
            timer_started: false,
            won: false,
            generation: 0,
            mismatch_delay: MISMATCH_DELAY,
        };
        session.reset();
        Ok(session)
    }

    pub fn set_mismatch_delay(&mut self, delay: Duration) {
        self.mismatch_delay = delay;
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    /// Starts a fresh board with the current difficulty. Pending unflips and
    /// timer ticks from before the reset are invalidated.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.timer.reset();
        self.timer_started = false;
        self.won = false;
        self.first_selection = None;
        self.second_selection = None;
        self.locked = false;
        self.matched_pairs = 0;
        self.move_count = 0;
        self.cards = lay_out_pairs(&self.config, self.order.as_mut());
        tracing::debug!(
            difficulty = self.difficulty.key(),
            cards = self.cards.len(),
            generation = self.generation,
            "dealt new board"
        );
    }

    /// Switches preset and deals a new board. Returns `false` when `difficulty`
    /// is already active, in which case nothing changes.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<bool, ConfigError> {
        if difficulty == self.difficulty {
            return Ok(false);
        }
        let config = difficulty.config();
        config.validate()?;
        self.difficulty = difficulty;
        self.config = config;
        self.reset();
        Ok(true)
    }

    pub fn select_difficulty(&mut self, key: &str) -> Result<bool, ConfigError> {
        let difficulty = Difficulty::from_key(key)?;
        self.set_difficulty(difficulty)
    }

    pub fn click(&mut self, index: usize) -> Result<ClickOutcome, InputError> {
        let len = self.cards.len();
        let Some(card) = self.cards.get(index) else {
            return Err(InputError::CardOutOfRange { index, len });
        };
        if self.won || self.locked || card.is_face_up() {
            return Ok(ClickOutcome::Ignored);
        }

        self.cards[index].status = CardStatus::FaceUp;

        let Some(first) = self.first_selection else {
            self.first_selection = Some(index);
            let timer = if self.timer_started {
                None
            } else {
                self.timer_started = true;
                Some(self.timer.start())
            };
            return Ok(ClickOutcome::Revealed { index, timer });
        };

        self.second_selection = Some(index);
        self.locked = true;
        self.move_count = self.move_count.saturating_add(1);

        if self.cards[first].symbol != self.cards[index].symbol {
            return Ok(ClickOutcome::Mismatched(PendingUnflip {
                generation: self.generation,
                first,
                second: index,
            }));
        }

        self.cards[first].status = CardStatus::Matched;
        self.cards[index].status = CardStatus::Matched;
        self.matched_pairs += 1;
        self.clear_selection();

        let completion = if self.matched_pairs == self.total_pairs() {
            self.won = true;
            self.timer.stop();
            let completion = Completion {
                moves: self.move_count,
                seconds_elapsed: self.timer.seconds_elapsed(),
                difficulty: self.difficulty,
                grid_size: self.config.grid_size,
            };
            tracing::info!(
                moves = completion.moves,
                seconds = completion.seconds_elapsed,
                difficulty = self.difficulty.key(),
                "board cleared"
            );
            Some(completion)
        } else {
            None
        };

        Ok(ClickOutcome::Matched {
            first,
            second: index,
            completion,
        })
    }

    /// Turns a mismatched pair face down again. Returns `false` and leaves
    /// everything untouched when `pending` belongs to an earlier board or turn.
    pub fn resolve_mismatch(&mut self, pending: &PendingUnflip) -> bool {
        if pending.generation != self.generation
            || !self.locked
            || self.first_selection != Some(pending.first)
            || self.second_selection != Some(pending.second)
        {
            return false;
        }
        for idx in [pending.first, pending.second] {
            if let Some(card) = self.cards.get_mut(idx)
                && card.status == CardStatus::FaceUp
            {
                card.status = CardStatus::Hidden;
            }
        }
        self.clear_selection();
        true
    }

    pub fn tick_timer(&mut self, token: TimerToken) -> Option<u32> {
        self.timer.tick(token)
    }

    fn clear_selection(&mut self) {
        self.first_selection = None;
        self.second_selection = None;
        self.locked = false;
    }

    pub fn phase(&self) -> Phase {
        if self.won {
            Phase::Won
        } else if self.locked {
            Phase::Resolving
        } else if self.first_selection.is_some() {
            Phase::OneSelected
        } else {
            Phase::Idle
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn total_pairs(&self) -> usize {
        self.config.total_pairs()
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.timer.seconds_elapsed()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
