//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, shape generator and scoring.
//! It owns gravity timing, player commands, locking, and the game lifecycle.
//!
//! Locking sequence (gravity block or hard drop):
//! 1. write the current piece into the board
//! 2. clear full lines and score them
//! 3. promote the next piece to current, at [`SPAWN_ROW`]
//! 4. draw a new next piece at the spawn column
//! 5. if anything sits in row 0, the game is over

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_level, calculate_score, gravity_delay_for_level};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Most events a single lock can record: lines, level up, game over
pub const MAX_LOCK_EVENTS: usize = 3;

/// Events recorded by the most recent lock
pub type LockEvents = ArrayVec<GameEvent, MAX_LOCK_EVENTS>;

/// Complete game state
///
/// Single-threaded: drive it from one loop, call [`GameState::update`] once
/// per frame, and hand [`GameState::snapshot`] values to anything else.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Piece,
    next: Piece,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    status: Status,
    frame_count: u32,
    /// Frames between automatic one-row descents
    gravity_delay: u32,
    /// Monotonic id of the current piece (increments on every promotion).
    piece_id: u32,
    /// Events from the last lock (consumed by observers).
    events: LockEvents,
}

impl GameState {
    /// Create a new game seeded from OS entropy
    ///
    /// # Panics
    ///
    /// Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_generator(Board::new(width, height), PieceGenerator::from_entropy())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(width: usize, height: usize, seed: u32) -> Self {
        Self::from_generator(Board::new(width, height), PieceGenerator::new(seed))
    }

    /// Resume play from an arbitrary board and pieces (puzzles, replays, tests)
    pub fn from_parts(board: Board, current: Piece, next: Piece, seed: u32) -> Self {
        Self {
            board,
            current,
            next,
            generator: PieceGenerator::new(seed),
            score: 0,
            lines: 0,
            status: Status::Playing,
            frame_count: 0,
            gravity_delay: BASE_GRAVITY_DELAY,
            piece_id: 0,
            events: LockEvents::new(),
        }
    }

    fn from_generator(board: Board, mut generator: PieceGenerator) -> Self {
        let spawn_x = Self::spawn_column(board.width());
        let current = Piece::new(generator.next_shape(), spawn_x, SPAWN_ROW, 0);
        let next = Piece::new(generator.next_shape(), spawn_x, SPAWN_ROW, 0);

        Self {
            board,
            current,
            next,
            generator,
            score: 0,
            lines: 0,
            status: Status::Playing,
            frame_count: 0,
            gravity_delay: BASE_GRAVITY_DELAY,
            piece_id: 0,
            events: LockEvents::new(),
        }
    }

    fn spawn_column(width: usize) -> i32 {
        width as i32 / 2 - 2
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    pub fn gravity_delay(&self) -> u32 {
        self.gravity_delay
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Final numbers once the game is over
    pub fn game_over_payload(&self) -> Option<GameOverPayload> {
        self.is_game_over().then(|| self.payload())
    }

    fn payload(&self) -> GameOverPayload {
        GameOverPayload {
            score: self.score,
            lines: self.lines,
            level: self.level(),
        }
    }

    /// Stop gravity and commands. Only acts while playing.
    pub fn pause(&mut self) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        self.status = Status::Paused;
        true
    }

    /// Leave the paused state. Game over is never left.
    pub fn resume(&mut self) -> bool {
        if self.status != Status::Paused {
            return false;
        }
        self.status = Status::Playing;
        true
    }

    /// Advance one frame: count it, and apply gravity every `gravity_delay` frames
    pub fn update(&mut self) {
        if self.status != Status::Playing {
            return;
        }

        self.frame_count += 1;
        if self.frame_count >= self.gravity_delay {
            self.frame_count = 0;
            self.apply_gravity();
        }
    }

    fn apply_gravity(&mut self) {
        if self.board.is_colliding(&self.current, 0, 1) {
            self.lock_current_piece();
        } else {
            self.current.move_down();
        }
    }

    /// Try to move the current piece; the piece is untouched on failure
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.status != Status::Playing || self.board.is_colliding(&self.current, dx, dy) {
            return false;
        }
        self.current.x += dx;
        self.current.y += dy;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move one row down. Never locks, even when blocked.
    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate in place; rejected outright if the new state collides
    pub fn rotate(&mut self) -> bool {
        if self.status != Status::Playing {
            return false;
        }

        let saved = self.current.rotation;
        self.current.rotate();
        if self.board.is_colliding(&self.current, 0, 0) {
            self.current.rotation = saved;
            return false;
        }
        true
    }

    /// Rows the current piece can fall before it rests
    pub fn drop_distance(&self) -> i32 {
        let mut distance = 0;
        while !self.board.is_colliding(&self.current, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Copy of the current piece at its hard drop resting row
    pub fn shadow_piece(&self) -> Piece {
        let mut shadow = self.current;
        shadow.y += self.drop_distance();
        shadow.color = PieceColor::Shadow;
        shadow
    }

    /// Drop the current piece to its resting row and lock it
    ///
    /// Locks even when the piece could not move at all.
    pub fn hard_drop(&mut self) -> bool {
        if self.status != Status::Playing {
            return false;
        }

        while !self.board.is_colliding(&self.current, 0, 1) {
            self.current.move_down();
        }
        self.lock_current_piece();
        true
    }

    /// Lock the current piece onto the board and bring in the next one
    fn lock_current_piece(&mut self) {
        self.events.clear();

        self.board.lock_piece(&self.current);

        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.add_score(cleared);
        }

        self.current = self.next;
        self.current.y = SPAWN_ROW;
        self.piece_id = self.piece_id.wrapping_add(1);
        self.next = Piece::new(
            self.generator.next_shape(),
            Self::spawn_column(self.board.width()),
            SPAWN_ROW,
            0,
        );

        if self.board.is_game_over() {
            self.status = Status::GameOver;
            self.events.push(GameEvent::GameOver(self.payload()));
        }
    }

    fn add_score(&mut self, cleared: usize) {
        let result = calculate_score(cleared, self.lines);

        self.score = self.score.saturating_add(result.points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.events.push(GameEvent::LinesCleared {
            count: cleared as u32,
            points: result.points,
        });

        if result.leveled_up {
            self.gravity_delay = gravity_delay_for_level(result.level);
            self.events.push(GameEvent::LevelUp {
                level: result.level,
            });
        }
    }

    /// Take and clear the events recorded by the last lock.
    ///
    /// The buffer is reset at the start of every lock, so events not taken
    /// before the next lock are lost.
    pub fn take_events(&mut self) -> LockEvents {
        std::mem::take(&mut self.events)
    }

    /// Apply a player command. Returns whether it took effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_rows(),
            current: self.current.into(),
            next: self.next.into(),
            shadow: self.shadow_piece().into(),
            score: self.score,
            lines: self.lines,
            level: self.level(),
            status: self.status,
            frame_count: self.frame_count,
            gravity_delay: self.gravity_delay,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(shape: ShapeKind, x: i32, y: i32, rotation: usize) -> GameState {
        let mut state = GameState::with_seed(10, 20, 12345);
        state.current = Piece::new(shape, x, y, rotation);
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_seed(10, 20, 12345);

        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.gravity_delay, BASE_GRAVITY_DELAY);
        assert_eq!((state.current.x, state.current.y), (3, SPAWN_ROW));
        assert_eq!((state.next.x, state.next.y), (3, SPAWN_ROW));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_level_from_lines() {
        let mut state = GameState::default();
        assert_eq!(state.level(), 0);
        state.lines = 10;
        assert_eq!(state.level(), 1);
        state.lines = 25;
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_add_score_table() {
        for (cleared, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut state = GameState::default();
            state.add_score(cleared);
            assert_eq!(state.score, expected);
            assert_eq!(state.lines, cleared as u32);
            assert_eq!(state.gravity_delay, 48);
        }
    }

    #[test]
    fn test_add_score_level_up_decreases_gravity_delay() {
        let mut state = GameState::default();
        state.lines = 9;
        state.add_score(1);

        assert_eq!(state.score, 100);
        assert_eq!(state.gravity_delay, 46);
        assert_eq!(
            state.events.as_slice(),
            &[
                GameEvent::LinesCleared {
                    count: 1,
                    points: 100
                },
                GameEvent::LevelUp { level: 1 },
            ]
        );
    }

    #[test]
    fn test_gravity_delay_clamped_at_floor() {
        let mut state = GameState::default();

        // Level 19 -> 20 reaches the floor: 48 - 2 * 20 < 10
        state.lines = 199;
        state.add_score(1);
        assert_eq!(state.level(), 20);
        assert_eq!(state.gravity_delay, MIN_GRAVITY_DELAY);

        // Further level-ups stay on the floor
        state.events.clear();
        state.lines = 209;
        state.add_score(1);
        assert_eq!(state.level(), 21);
        assert!(state
            .events
            .contains(&GameEvent::LevelUp { level: 21 }));
        assert_eq!(state.gravity_delay, MIN_GRAVITY_DELAY);
    }

    #[test]
    fn test_repeated_clears_level_up_and_speed_gravity() {
        let mut state = GameState::with_seed(10, 20, 3);
        let mut previous_delay = state.gravity_delay;

        for _ in 0..25 {
            for x in 4..10 {
                state.board.set(x, 19, 1);
            }
            state.current = Piece::new(ShapeKind::I, 0, 0, 0);
            let lines_before = state.lines;
            let score_before = state.score;

            assert!(state.hard_drop());
            assert_eq!(state.lines, lines_before + 1);
            assert_eq!(state.score - score_before, 100 * (lines_before / 10 + 1));

            let events = state.take_events();
            if state.lines % 10 == 0 {
                assert!(state.gravity_delay < previous_delay);
                assert!(events.contains(&GameEvent::LevelUp {
                    level: state.level()
                }));
            } else {
                assert_eq!(state.gravity_delay, previous_delay);
                assert_eq!(events.len(), 1);
            }
            previous_delay = state.gravity_delay;
        }

        assert_eq!(state.level(), 2);
        assert_eq!(state.gravity_delay, 44);
        assert_eq!(state.status, Status::Playing);
    }

    #[test]
    fn test_update_counts_frames_and_applies_gravity() {
        let mut state = state_with(ShapeKind::T, 4, 1, 0);

        state.update();
        assert_eq!(state.frame_count, 1);
        assert_eq!(state.current.y, 1);

        state.frame_count = state.gravity_delay - 1;
        state.update();
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.current.y, 2);
    }

    #[test]
    fn test_update_noop_when_paused_or_over() {
        for status in [Status::Paused, Status::GameOver] {
            let mut state = state_with(ShapeKind::T, 4, 1, 0);
            state.status = status;
            state.frame_count = 50;
            state.update();
            assert_eq!(state.frame_count, 50);
            assert_eq!(state.current.y, 1);
        }
    }

    #[test]
    fn test_gravity_locks_resting_piece() {
        // O cells sit at local rows 1..2, so y = 17 rests on the floor.
        let mut state = state_with(ShapeKind::O, 4, 17, 0);
        let next = state.next;
        state.frame_count = state.gravity_delay - 1;
        state.update();

        assert_eq!(state.board.get(5, 18), Some(PieceColor::Yellow.value()));
        assert_eq!(state.board.get(6, 19), Some(PieceColor::Yellow.value()));
        assert_eq!(state.current, next);
    }

    #[test]
    fn test_move_left_and_right() {
        let mut state = state_with(ShapeKind::O, 5, 0, 0);
        assert!(state.move_left());
        assert_eq!(state.current.x, 4);

        // O occupies local columns 1..2
        let mut state = state_with(ShapeKind::O, -1, 0, 0);
        assert!(!state.move_left());
        assert_eq!(state.current.x, -1);

        let mut state = state_with(ShapeKind::O, 7, 0, 0);
        assert!(!state.move_right());
        assert_eq!(state.current.x, 7);
    }

    #[test]
    fn test_move_down_never_locks() {
        let mut state = state_with(ShapeKind::O, 4, 17, 0);
        assert!(!state.move_down());
        assert_eq!(state.current.y, 17);
        assert!(state.board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_rotate() {
        let mut state = state_with(ShapeKind::T, 4, 1, 0);
        assert!(state.rotate());
        assert_eq!(state.current.rotation, 1);

        // L rotation 2 reaches local column 0, past the left wall
        let mut state = state_with(ShapeKind::L, -1, -1, 1);
        assert!(!state.rotate());
        assert_eq!(state.current.rotation, 1);
        assert_eq!((state.current.x, state.current.y), (-1, -1));
    }

    #[test]
    fn test_hard_drop_locks_at_lowest_row() {
        let mut state = state_with(ShapeKind::O, 4, 0, 0);
        assert_eq!(state.shadow_piece().y, 17);

        assert!(state.hard_drop());
        for (x, y) in [(5, 18), (6, 18), (5, 19), (6, 19)] {
            assert_eq!(state.board.get(x, y), Some(PieceColor::Yellow.value()));
        }
        assert_eq!(state.board.cells().iter().filter(|&&c| c != 0).count(), 4);
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut state = GameState::with_seed(10, 20, 12345);
        let original_next = state.next;
        state.lock_current_piece();

        assert_eq!(state.current.shape, original_next.shape);
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.current.y, SPAWN_ROW);
        assert_eq!(state.next.x, 3);
        assert_eq!(state.next.y, SPAWN_ROW);
    }

    #[test]
    fn test_commands_rejected_unless_playing() {
        let mut state = state_with(ShapeKind::T, 4, 1, 0);
        assert!(state.pause());
        let before = state.current;

        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.move_down());
        assert!(!state.rotate());
        assert!(!state.hard_drop());
        assert_eq!(state.current, before);

        assert!(!state.pause());
        assert!(state.resume());
        assert!(!state.resume());
        assert!(state.move_left());
    }

    #[test]
    fn test_game_over_is_permanent() {
        let mut state = GameState::default();
        state.status = Status::GameOver;
        assert!(!state.pause());
        assert!(!state.resume());
        assert_eq!(state.status, Status::GameOver);
        assert!(state.game_over_payload().is_some());
    }

    #[test]
    fn test_take_events_drains() {
        let mut state = GameState::default();
        state.add_score(2);
        assert_eq!(state.take_events().len(), 1);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = state_with(ShapeKind::T, 4, 1, 0);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.current.x, 5);
        assert!(state.apply_action(GameAction::Rotate));
        assert_eq!(state.current.rotation, 1);
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.is_paused());
        assert!(state.apply_action(GameAction::Resume));
        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.board.cells().iter().any(|&c| c != 0));
    }
}
