//! Типы ошибок крейта

use thiserror::Error;

/// Основной тип ошибок бенчмарков
#[derive(Error, Debug)]
pub enum BenchError {
    /// Размер чанка должен быть положительным
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    /// Размерности ядра: одна или две, все ненулевые
    #[error("Invalid kernel dimensions: {0:?}")]
    InvalidDimensions(Vec<usize>),

    /// Аргументы ядра не совпадают с объявленными параметрами
    #[error("Kernel `{kernel}` argument mismatch: {reason}")]
    ArgumentMismatch { kernel: &'static str, reason: String },

    /// Несовместимые формы матриц
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Режим "gpu" недоступен
    #[error("GPU unavailable: {0}")]
    GpuUnavailable(String),

    /// Некорректная конфигурация
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Ошибка OpenCL
    #[error(transparent)]
    OpenCl(#[from] anyhow::Error),
}

/// Result с ошибкой крейта
pub type Result<T> = std::result::Result<T, BenchError>;
