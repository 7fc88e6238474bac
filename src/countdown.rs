//! Countdown State
//!
//! Per-task remaining time, advanced one second per tick. Kept apart from
//! the task list so a tick only touches timer displays.

use std::collections::HashMap;

use crate::models::TaskId;

/// Shown in place of the clock once a countdown ends
pub const ELAPSED_LABEL: &str = "Time's up!";

/// Result of advancing a countdown by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Elapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: i64,
    elapsed: bool,
}

impl Countdown {
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            remaining_secs: i64::from(minutes) * 60,
            elapsed: false,
        }
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    pub fn is_elapsed(&self) -> bool {
        self.elapsed
    }

    /// Advance by one second. Returns `None` if already elapsed.
    pub fn tick(&mut self) -> Option<CountdownState> {
        if self.elapsed {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs <= 0 {
            self.elapsed = true;
            return Some(CountdownState::Elapsed);
        }
        Some(CountdownState::Running)
    }

    /// `m:ss`, or the elapsed indicator
    pub fn label(&self) -> String {
        if self.elapsed {
            return ELAPSED_LABEL.to_string();
        }
        format_clock(self.remaining_secs())
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Countdowns of every task that has a timer
#[derive(Debug, Clone, Default)]
pub struct CountdownBoard {
    countdowns: HashMap<TaskId, Countdown>,
}

impl CountdownBoard {
    /// (Re)start a task's countdown from the full duration
    pub fn start(&mut self, id: TaskId, minutes: u32) {
        self.countdowns.insert(id, Countdown::from_minutes(minutes));
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Countdown> {
        self.countdowns.remove(&id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Countdown> {
        self.countdowns.get(&id)
    }

    /// `None` when the task has no countdown or it already ended
    pub fn tick(&mut self, id: TaskId) -> Option<CountdownState> {
        self.countdowns.get_mut(&id)?.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(605), "10:05");
        assert_eq!(format_clock(-4), "0:00");
    }

    #[test]
    fn test_initial_label_shows_full_duration() {
        let countdown = Countdown::from_minutes(2);
        assert_eq!(countdown.remaining_secs(), 120);
        assert_eq!(countdown.label(), "2:00");
    }

    #[test]
    fn test_tick_decrements() {
        let mut countdown = Countdown::from_minutes(1);
        assert_eq!(countdown.tick(), Some(CountdownState::Running));
        assert_eq!(countdown.remaining_secs(), 59);
        assert_eq!(countdown.label(), "0:59");
    }

    #[test]
    fn test_one_minute_elapses_after_sixty_ticks() {
        let mut countdown = Countdown::from_minutes(1);
        for _ in 0..59 {
            assert_eq!(countdown.tick(), Some(CountdownState::Running));
        }
        assert_eq!(countdown.label(), "0:01");
        assert_eq!(countdown.tick(), Some(CountdownState::Elapsed));
        assert!(countdown.is_elapsed());
        assert_eq!(countdown.label(), ELAPSED_LABEL);
    }

    #[test]
    fn test_elapsed_countdown_stops_ticking() {
        let mut countdown = Countdown::from_minutes(1);
        for _ in 0..60 {
            countdown.tick();
        }
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn test_board_countdowns_are_independent() {
        let mut board = CountdownBoard::default();
        board.start(1, 1);
        board.start(2, 2);

        board.tick(1);
        board.tick(1);
        board.tick(2);

        assert_eq!(board.get(1).unwrap().remaining_secs(), 58);
        assert_eq!(board.get(2).unwrap().remaining_secs(), 119);
    }

    #[test]
    fn test_board_tick_after_remove_is_noop() {
        let mut board = CountdownBoard::default();
        board.start(4, 3);
        board.tick(4);
        assert!(board.remove(4).is_some());

        assert_eq!(board.tick(4), None);
        assert!(board.get(4).is_none());
    }

    #[test]
    fn test_board_tick_unknown_task() {
        let mut board = CountdownBoard::default();
        assert_eq!(board.tick(9), None);
    }
}
