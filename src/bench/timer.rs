//! Таймер с управлением через команду

use std::time::{Duration, Instant};

/// Команда таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Сбросить и запустить
    Start,
    /// Вернуть прошедшее время и перейти в режим ожидания
    Stop,
    /// Вернуть прошедшее время без сброса
    Query,
}

impl TimerAction {
    /// Разбирает текстовую команду. Всё, кроме "start" и "stop", считается запросом.
    pub fn from_token(token: &str) -> Self {
        match token {
            "start" => TimerAction::Start,
            "stop" => TimerAction::Stop,
            _ => TimerAction::Query,
        }
    }
}

/// Таймер: либо простаивает, либо помнит момент старта.
///
/// Команда `Stop` или `Query` у простаивающего таймера запускает его и
/// возвращает `0.0`, повторный `Start` перезапускает отсчёт.
#[derive(Debug, Default)]
pub struct Timer {
    started: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выполняет команду, возвращает миллисекунды (с точностью до микросекунды)
    pub fn tick(&mut self, action: TimerAction) -> f64 {
        let now = Instant::now();
        match (self.started, action) {
            (None, _) | (Some(_), TimerAction::Start) => {
                self.started = Some(now);
                0.0
            }
            (Some(start), TimerAction::Stop) => {
                self.started = None;
                as_millis(now.duration_since(start))
            }
            (Some(start), TimerAction::Query) => as_millis(now.duration_since(start)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}

fn as_millis(elapsed: Duration) -> f64 {
    elapsed.as_micros() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn token_parsing() {
        assert_eq!(TimerAction::from_token("start"), TimerAction::Start);
        assert_eq!(TimerAction::from_token("stop"), TimerAction::Stop);
        assert_eq!(TimerAction::from_token(""), TimerAction::Query);
        assert_eq!(TimerAction::from_token("STOP"), TimerAction::Query);
    }

    #[test]
    fn start_returns_zero_and_runs() {
        let mut timer = Timer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.tick(TimerAction::Start), 0.0);
        assert!(timer.is_running());
    }

    #[test]
    fn stop_reports_elapsed_and_resets() {
        let mut timer = Timer::new();
        timer.tick(TimerAction::Start);
        thread::sleep(Duration::from_millis(5));
        let elapsed = timer.tick(TimerAction::Stop);
        assert!(elapsed >= 5.0, "elapsed = {elapsed}");
        assert!(!timer.is_running());
    }

    #[test]
    fn query_does_not_reset() {
        let mut timer = Timer::new();
        timer.tick(TimerAction::Start);
        thread::sleep(Duration::from_millis(2));
        let first = timer.tick(TimerAction::Query);
        let second = timer.tick(TimerAction::Query);
        assert!(first >= 2.0);
        assert!(second >= first);
        assert!(timer.is_running());
    }

    #[test]
    fn idle_stop_and_query_start_the_timer() {
        let mut timer = Timer::new();
        assert_eq!(timer.tick(TimerAction::Stop), 0.0);
        assert!(timer.is_running());

        let mut timer = Timer::new();
        assert_eq!(timer.tick(TimerAction::Query), 0.0);
        assert!(timer.is_running());
    }

    #[test]
    fn second_start_restarts() {
        let mut timer = Timer::new();
        timer.tick(TimerAction::Start);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(timer.tick(TimerAction::Start), 0.0);
        let elapsed = timer.tick(TimerAction::Stop);
        assert!(elapsed < 20.0, "elapsed = {elapsed}");
    }
}
