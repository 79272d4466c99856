//! Типы матриц и связанные структуры

use serde::{Deserialize, Serialize};

/// Тип матриц для вычислений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixType {
    /// Матрицы заполненные 1 и 2
    OnesAndTwos,
    /// Матрицы заполненные 3 и 4
    ThreesAndFours,
    /// Случайно заполненные матрицы
    #[default]
    Random,
}
