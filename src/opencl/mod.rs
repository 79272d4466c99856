//! Модуль для работы с OpenCL
//!
//! Содержит низкоуровневые привязки и обёртки с освобождением ресурсов в Drop

pub mod bindings;
pub mod types;
mod device;

pub use device::{OpenClDevice, OpenClKernel};
