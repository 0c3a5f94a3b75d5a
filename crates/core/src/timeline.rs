//! Timeline - branchable history of well states plus the move log
//!
//! The timeline owns every state a game has passed through, the moves that
//! produced them and a cursor into both. Undo and redo only move the cursor;
//! a move that disagrees with the log at the cursor truncates the future.
//!
//! # Modes
//!
//! ```text
//! NotStarted --start--> Playing <--undo/replay exhausted-- Replaying
//!                          |                                   |
//!                          +-----------> GameOver <------------+
//! ```
//!
//! `start` and the replay loaders are accepted in every mode.
//!
//! # Playback
//!
//! A loaded replay advances one move per playback interval. The host calls
//! [`Timeline::tick`] with the elapsed time, exactly like the fixed-timestep
//! game loop drives gravity in a conventional falling-block game. At most one
//! timer is outstanding; `start`, the loaders and `undo` cancel it before they
//! touch any state.
//!
//! # Example
//!
//! ```
//! use hatetris_core::{Hatetris, Rules, Timeline};
//! use hatetris_types::{Mode, Move};
//!
//! let mut timeline = Timeline::new(Rules::classic(), Box::new(Hatetris::default()));
//! timeline.start();
//! assert_eq!(timeline.mode(), Mode::Playing);
//!
//! timeline.apply_move(Move::Left).unwrap();
//! timeline.undo().unwrap();
//! assert_eq!(timeline.position(), Some(0));
//! assert!(timeline.undo().is_err());
//! assert_eq!(timeline.take_diagnostics().len(), 1);
//! ```

use std::mem;

use log::{debug, info, warn};

use crate::error::IgnoredInput;
use crate::rules::Rules;
use crate::selector::PieceSelector;
use crate::types::{Mode, Move, REPLAY_STEP_MS};
use crate::well::{CoreState, WellState};

/// Countdown to the next scripted replay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTimer {
    remaining_ms: u32,
}

impl PlaybackTimer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            remaining_ms: delay_ms,
        }
    }

    /// Count down; returns true once the deadline has passed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}

pub struct Timeline {
    rules: Rules,
    selector: Box<dyn PieceSelector>,
    first_state: WellState,
    history: Vec<WellState>,
    moves: Vec<Move>,
    position: Option<usize>,
    mode: Mode,
    timer: Option<PlaybackTimer>,
    step_ms: u32,
    diagnostics: Vec<IgnoredInput>,
}

impl Timeline {
    /// Create an unstarted timeline. The opening state is computed here, once.
    pub fn new(rules: Rules, selector: Box<dyn PieceSelector>) -> Self {
        let well = rules.empty_well();
        let first_piece = rules.try_spawn(&well, selector.select_piece(&rules, &well));
        let first_state = WellState {
            core: CoreState::new(well),
            piece: first_piece,
        };

        Self {
            rules,
            selector,
            first_state,
            history: Vec::new(),
            moves: Vec::new(),
            position: None,
            mode: Mode::NotStarted,
            timer: None,
            step_ms: REPLAY_STEP_MS,
            diagnostics: Vec::new(),
        }
    }

    /// Set the delay between scripted replay moves.
    pub fn with_replay_step_ms(mut self, step_ms: u32) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Begin a new game from the opening state.
    pub fn start(&mut self) {
        self.timer = None;
        self.history = vec![self.first_state.clone()];
        self.moves.clear();
        self.position = Some(0);
        self.mode = self.opening_mode(Mode::Playing);
        info!("new game with {} selector", self.selector.name());
    }

    /// Decode hex replay text and schedule its playback.
    pub fn load_replay(&mut self, text: &str) {
        let moves = hatetris_replay::decode(text);
        debug!("decoded replay: {} moves", moves.len());
        self.load_moves(moves);
    }

    /// Reset to the opening state and schedule playback of `moves`.
    pub fn load_moves(&mut self, moves: Vec<Move>) {
        self.timer = None;
        self.history = vec![self.first_state.clone()];
        self.moves = moves;
        self.position = Some(0);

        if self.moves.is_empty() {
            self.mode = self.opening_mode(Mode::Playing);
        } else {
            self.mode = self.opening_mode(Mode::Replaying);
            if self.mode == Mode::Replaying {
                self.timer = Some(PlaybackTimer::new(self.step_ms));
            }
        }
        info!("loaded replay of {} moves", self.moves.len());
    }

    /// Apply one player move at the cursor.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), IgnoredInput> {
        if !self.mode.accepts_moves() {
            return self.ignore(IgnoredInput::Move { mv, mode: self.mode });
        }
        let i = self.position.unwrap_or_default();

        if self.moves.get(i) != Some(&mv) {
            self.moves.truncate(i);
            self.moves.push(mv);
            self.history.truncate(i + 1);
        }

        if self.history.len() <= i + 1 {
            let mut next = self.rules.apply_move(&self.history[i], mv);
            if next.piece.is_none() && !self.rules.is_game_over(&next.core.well) {
                let id = self.selector.select_piece(&self.rules, &next.core.well);
                next.piece = self.rules.try_spawn(&next.core.well, id);
                if next.piece.is_none() {
                    debug!("piece {} blocked at spawn", id);
                }
            }
            self.history.push(next);
        }

        self.position = Some(i + 1);

        let state = &self.history[i + 1];
        if self.rules.is_terminal(state) {
            info!("game over, score {}", state.core.score);
            self.mode = Mode::GameOver;
        } else if self.mode == Mode::Replaying && self.moves.len() <= i + 1 {
            self.mode = Mode::Playing;
        }
        if self.mode != Mode::Replaying {
            self.timer = None;
        }
        Ok(())
    }

    /// Step the cursor back one state. Always lands in `Playing`.
    pub fn undo(&mut self) -> Result<(), IgnoredInput> {
        self.timer = None;
        match self.position {
            Some(i) if i > 0 => {
                self.position = Some(i - 1);
                self.mode = Mode::Playing;
                Ok(())
            }
            _ => self.ignore(IgnoredInput::UndoAtStart),
        }
    }

    /// Replay the logged move at the cursor.
    pub fn redo(&mut self) -> Result<(), IgnoredInput> {
        if !self.mode.accepts_moves() {
            return self.ignore(IgnoredInput::RedoWhile(self.mode));
        }
        let i = self.position.unwrap_or_default();
        match self.moves.get(i) {
            Some(&mv) => self.apply_move(mv),
            None => self.ignore(IgnoredInput::RedoAtEnd),
        }
    }

    /// Advance the playback timer. Returns true if a replay step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if !timer.advance(elapsed_ms) {
            return false;
        }
        self.timer = None;
        self.replay_step();
        true
    }

    fn replay_step(&mut self) {
        if self.mode != Mode::Replaying {
            let _ = self.ignore(IgnoredInput::StepWhile(self.mode));
            return;
        }
        if self.redo().is_err() {
            return;
        }
        let more = self
            .position
            .is_some_and(|i| i < self.moves.len());
        if self.mode == Mode::Replaying && more {
            self.timer = Some(PlaybackTimer::new(self.step_ms));
        }
    }

    /// Play every remaining replay move immediately. Returns the steps taken.
    pub fn run_replay_to_end(&mut self) -> usize {
        self.timer = None;
        let mut steps = 0;
        while self.mode == Mode::Replaying {
            if self.redo().is_err() {
                break;
            }
            steps += 1;
        }
        steps
    }

    /// `GameOver` if even the opening piece cannot enter the well.
    fn opening_mode(&self, mode: Mode) -> Mode {
        if self.rules.is_terminal(&self.first_state) {
            info!("opening piece is blocked");
            Mode::GameOver
        } else {
            mode
        }
    }

    fn ignore(&mut self, event: IgnoredInput) -> Result<(), IgnoredInput> {
        warn!("{} ({})", event, event.code());
        self.diagnostics.push(event);
        Err(event)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cursor into the history; `None` before the first game.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&WellState> {
        self.position.and_then(|i| self.history.get(i))
    }

    pub fn score(&self) -> u32 {
        self.current().map_or(0, WellState::score)
    }

    pub fn history(&self) -> &[WellState] {
        &self.history
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    /// Hex replay of the full move log, available once the game is over.
    pub fn encoded_replay(&self) -> Option<String> {
        if self.mode == Mode::GameOver && !self.moves.is_empty() {
            Some(hatetris_replay::encode(&self.moves))
        } else {
            None
        }
    }

    pub fn has_pending_step(&self) -> bool {
        self.timer.is_some()
    }

    /// Drain the ignored-input events recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<IgnoredInput> {
        mem::take(&mut self.diagnostics)
    }
}
