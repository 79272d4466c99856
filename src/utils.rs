//! Вспомогательные функции и утилиты

use std::time::{Duration, Instant};

/// Измеряет время выполнения функции
pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

/// Печатает левый верхний угол матрицы `n x n`, как в выводе бинарников
pub fn format_corner(rows: &[Vec<f64>], n: usize) -> String {
    let mut out = String::new();
    for row in rows.iter().take(n) {
        let cells: Vec<String> = row.iter().take(n).map(|v| format!("{v:.1}")).collect();
        out.push_str(&cells.join(" "));
        if row.len() > n {
            out.push_str(" ...");
        }
        out.push('\n');
    }
    if rows.len() > n {
        out.push_str("...\n");
    }
    out
}
