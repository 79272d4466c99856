//! Многократный вызов операции с замером времени

use std::fmt::Debug;

use tracing::info;

use super::timer::{Timer, TimerAction};

/// Результат замера
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult<T> {
    /// Сколько раз была вызвана операция
    pub iterations: usize,
    /// Суммарное время, мс
    pub total_ms: f64,
    /// Среднее время одного вызова, мс (0 при нуле итераций)
    pub mean_ms: f64,
    /// Результат первого вызова
    pub first: Option<T>,
}

/// Вызывает `method` ровно `iterations` раз с одними и теми же `args` и `context`.
///
/// Первая ошибка прерывает цикл и возвращается как есть. Сохраняется только
/// результат первого вызова, остальные отбрасываются сразу.
pub fn run_bench<C, A, T, E, F>(
    mut method: F,
    iterations: usize,
    args: &A,
    context: &C,
) -> Result<BenchmarkResult<T>, E>
where
    C: ?Sized,
    A: ?Sized,
    T: Debug,
    F: FnMut(&C, &A) -> Result<T, E>,
{
    let mut timer = Timer::new();
    let mut first = None;

    timer.tick(TimerAction::Start);
    for _ in 0..iterations {
        let result = method(context, args)?;
        if first.is_none() {
            first = Some(result);
        }
    }
    let total_ms = timer.tick(TimerAction::Stop);

    let mean_ms = if iterations == 0 {
        0.0
    } else {
        total_ms / iterations as f64
    };

    info!("Mean execution time was: {} ms", mean_ms);
    info!("Sum execution time was: {} ms", total_ms);
    if let Some(first) = &first {
        info!("Result of the method call was: {:?}", first);
    }

    Ok(BenchmarkResult {
        iterations,
        total_ms,
        mean_ms,
        first,
    })
}

/// То же, что [`run_bench`], но возвращает только среднее время в миллисекундах
pub fn bench<C, A, T, E, F>(method: F, iterations: usize, args: &A, context: &C) -> Result<f64, E>
where
    C: ?Sized,
    A: ?Sized,
    T: Debug,
    F: FnMut(&C, &A) -> Result<T, E>,
{
    run_bench(method, iterations, args, context).map(|result| result.mean_ms)
}
