//! Конфигурация демонстрации

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::matrix::MatrixType;

/// Размер квадратных матриц по умолчанию
pub const DEFAULT_MAT_SIZE: usize = 512;
/// Длина векторов по умолчанию
pub const DEFAULT_VEC_SIZE: usize = 200_000;

/// Параметры демонстрации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoConfig {
    /// Сторона квадратных матриц
    pub mat_size: usize,
    /// Длина векторов
    pub vec_size: usize,
    /// Сколько раз вызывать каждую операцию при замере
    pub iterations: usize,
    /// Чем заполнять входные данные
    pub matrix_type: MatrixType,
    /// Зерно генератора; без него используется thread_rng
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mat_size: DEFAULT_MAT_SIZE,
            vec_size: DEFAULT_VEC_SIZE,
            iterations: 1,
            matrix_type: MatrixType::Random,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Загружает конфигурацию из JSON; отсутствующие поля берутся по умолчанию
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать конфигурацию {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Некорректный JSON в {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mat_size == 0 {
            return Err(BenchError::InvalidConfig("matSize must be positive".to_string()));
        }
        if self.vec_size == 0 {
            return Err(BenchError::InvalidConfig("vecSize must be positive".to_string()));
        }
        Ok(())
    }
}
