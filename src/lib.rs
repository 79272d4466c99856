//! Сравнение GPU и CPU на умножении матриц и сложении векторов

pub mod bench;
pub mod compute;
pub mod config;
pub mod demo;
pub mod error;
pub mod matrix;
#[cfg(feature = "opencl")]
pub mod opencl;
pub mod report;
pub mod utils;

#[cfg(feature = "opencl")]
#[macro_use]
mod macros {
    /// Макрос для обработки ошибок OpenCL (коды возврата)
    #[macro_export]
    macro_rules! cl_check {
        ($expr:expr) => {{
            let code = $expr;
            if code != $crate::opencl::types::CL_SUCCESS {
                Err(anyhow::anyhow!(
                    "OpenCL error code {} in {}",
                    code,
                    stringify!($expr)
                ))
            } else {
                Ok(()) as anyhow::Result<()>
            }
        }};
    }

    /// Макрос для функций OpenCL, создающих объект: дописывает `errcode_ret`
    /// и проверяет и код, и указатель
    #[macro_export]
    macro_rules! cl_create {
        ($func:ident($($arg:expr),* $(,)?)) => {{
            let mut errcode: $crate::opencl::types::cl_int = 0;
            let obj = $func($($arg,)* &mut errcode);
            if obj.is_null() || errcode != $crate::opencl::types::CL_SUCCESS {
                Err(anyhow::anyhow!(
                    "Failed to create OpenCL object: {} (code {})",
                    stringify!($func),
                    errcode
                ))
            } else {
                Ok(obj)
            }
        }};
    }
}

// Реэкспорт основных типов для удобства
pub use bench::{bench, run_bench, BenchmarkResult, Timer, TimerAction};
pub use compute::{Compute, ExecutionMode, KernelOptions, KernelOutput};
pub use error::{BenchError, Result};
pub use matrix::{split_array, MatrixType};
