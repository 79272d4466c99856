//! Режим исполнения и параметры ядра

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Где исполняется ядро
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// OpenCL-устройство
    Gpu,
    /// Последовательный обход на процессоре
    Cpu,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Gpu => f.write_str("gpu"),
            ExecutionMode::Cpu => f.write_str("cpu"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gpu" => Ok(ExecutionMode::Gpu),
            "cpu" => Ok(ExecutionMode::Cpu),
            other => Err(BenchError::InvalidConfig(format!(
                "unknown execution mode `{other}` (expected gpu or cpu)"
            ))),
        }
    }
}

/// Параметры создания ядра
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelOptions {
    /// `[x]` для вектора на выходе, `[x, y]` для матрицы из `y` строк по `x`
    pub dimensions: Vec<usize>,
    pub mode: ExecutionMode,
}

impl KernelOptions {
    pub fn new(dimensions: impl Into<Vec<usize>>, mode: ExecutionMode) -> Self {
        Self {
            dimensions: dimensions.into(),
            mode,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let valid = matches!(self.dimensions.len(), 1 | 2) && self.dimensions.iter().all(|&d| d > 0);
        if valid {
            Ok(())
        } else {
            Err(BenchError::InvalidDimensions(self.dimensions.clone()))
        }
    }

    pub fn width(&self) -> usize {
        self.dimensions.first().copied().unwrap_or(0)
    }

    /// Для одномерного выхода высота равна 1
    pub fn height(&self) -> usize {
        self.dimensions.get(1).copied().unwrap_or(1)
    }
}
