//! Замер времени выполнения
//!
//! Предоставляет:
//! - Таймер с тремя командами (start / stop / query)
//! - Харнесс, который вызывает операцию N раз и считает среднее время

mod harness;
mod timer;

pub use harness::{bench, run_bench, BenchmarkResult};
pub use timer::{Timer, TimerAction};
