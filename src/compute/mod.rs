//! Исполнение ядер в режимах "gpu" и "cpu"
//!
//! [`Compute`] создаётся один раз вызывающим кодом и передаётся явно.
//! Режим "gpu" работает через OpenCL и доступен только с фичей `opencl`.

mod function;
mod mode;

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;
#[cfg(feature = "opencl")]
use tracing::{info, warn};

use crate::error::{BenchError, Result};
#[cfg(feature = "opencl")]
use crate::matrix::split_array;

pub use function::{ArgKind, KernelArg, KernelFunction, Thread};
pub use mode::{ExecutionMode, KernelOptions};

/// Дескриптор вычислительной библиотеки
pub struct Compute {
    #[cfg(feature = "opencl")]
    device: Option<crate::opencl::OpenClDevice>,
}

impl Compute {
    /// Ищет GPU через OpenCL; при неудаче остаётся только режим "cpu"
    pub fn new() -> Self {
        #[cfg(feature = "opencl")]
        {
            let device = match crate::opencl::OpenClDevice::new() {
                Ok(device) => {
                    info!("OpenCL GPU device initialised");
                    Some(device)
                }
                Err(e) => {
                    warn!("OpenCL GPU unavailable: {e:#}");
                    None
                }
            };
            Self { device }
        }
        #[cfg(not(feature = "opencl"))]
        {
            Self::cpu_only()
        }
    }

    /// Без поиска устройства
    pub fn cpu_only() -> Self {
        Self {
            #[cfg(feature = "opencl")]
            device: None,
        }
    }

    pub fn gpu_available(&self) -> bool {
        #[cfg(feature = "opencl")]
        {
            self.device.is_some()
        }
        #[cfg(not(feature = "opencl"))]
        {
            false
        }
    }

    /// Готовит ядро к запуску в выбранном режиме. В режиме "gpu" здесь же
    /// компилируется программа OpenCL.
    pub fn create_kernel(&self, function: &KernelFunction, options: KernelOptions) -> Result<Kernel<'_>> {
        options.validate()?;
        if function.square && options.width() != options.height() {
            return Err(BenchError::InvalidDimensions(options.dimensions));
        }
        let backend = match options.mode {
            ExecutionMode::Cpu => Backend::Cpu(PhantomData),
            ExecutionMode::Gpu => self.gpu_backend(function)?,
        };
        debug!(
            kernel = function.name,
            mode = %options.mode,
            dimensions = ?options.dimensions,
            "kernel created"
        );
        Ok(Kernel {
            function: *function,
            options,
            backend,
        })
    }

    #[cfg(feature = "opencl")]
    fn gpu_backend(&self, function: &KernelFunction) -> Result<Backend<'_>> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| BenchError::GpuUnavailable("no OpenCL GPU device".to_string()))?;
        let kernel = device.build(function.opencl_source, function.name)?;
        Ok(Backend::Gpu(kernel))
    }

    #[cfg(not(feature = "opencl"))]
    fn gpu_backend(&self, _function: &KernelFunction) -> Result<Backend<'_>> {
        Err(BenchError::GpuUnavailable(
            "built without the `opencl` feature".to_string(),
        ))
    }
}

impl Default for Compute {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compute")
            .field("gpu_available", &self.gpu_available())
            .finish()
    }
}

enum Backend<'c> {
    Cpu(PhantomData<&'c Compute>),
    #[cfg(feature = "opencl")]
    Gpu(crate::opencl::OpenClKernel<'c>),
}

/// Ядро, готовое к запуску
pub struct Kernel<'c> {
    function: KernelFunction,
    options: KernelOptions,
    backend: Backend<'c>,
}

impl Kernel<'_> {
    pub fn mode(&self) -> ExecutionMode {
        self.options.mode
    }

    /// Запускает ядро по всем элементам выхода
    pub fn run(&self, args: &[KernelArg<'_>]) -> Result<KernelOutput> {
        self.check_args(args)?;
        match &self.backend {
            Backend::Cpu(_) => Ok(self.run_cpu(args)),
            #[cfg(feature = "opencl")]
            Backend::Gpu(kernel) => {
                let inputs: Vec<Vec<f64>> = args.iter().map(KernelArg::to_flat).collect();
                let flat = kernel.launch(&inputs, self.options.width(), self.options.height())?;
                self.shape(flat)
            }
        }
    }

    fn check_args(&self, args: &[KernelArg<'_>]) -> Result<()> {
        let expected = self.function.params;
        if args.len() != expected.len() {
            return Err(self.mismatch(format!(
                "expected {} arguments, got {}",
                expected.len(),
                args.len()
            )));
        }
        let (width, height) = (self.options.width(), self.options.height());
        for (index, (arg, kind)) in args.iter().zip(expected).enumerate() {
            if arg.kind() != *kind {
                return Err(self.mismatch(format!(
                    "argument {index} must be a {kind}, got a {}",
                    arg.kind()
                )));
            }
            // Буферы устройства читаются по индексам выхода, длины должны совпадать точно
            match *arg {
                KernelArg::Vector(values) if values.len() != width * height => {
                    return Err(self.mismatch(format!(
                        "argument {index} has {} elements, output has {}",
                        values.len(),
                        width * height
                    )));
                }
                KernelArg::Matrix(rows) if rows.len() != height || rows.iter().any(|r| r.len() != width) => {
                    return Err(self.mismatch(format!(
                        "argument {index} must be a {height}x{width} matrix"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn mismatch(&self, reason: String) -> BenchError {
        BenchError::ArgumentMismatch {
            kernel: self.function.name,
            reason,
        }
    }

    fn run_cpu(&self, args: &[KernelArg<'_>]) -> KernelOutput {
        let body = self.function.body;
        let width = self.options.width();
        let row = |y: usize| -> Vec<f64> { (0..width).map(|x| body(&Thread { x, y }, args)).collect() };

        if self.options.dimensions.len() == 1 {
            KernelOutput::Vector(row(0))
        } else {
            KernelOutput::Matrix((0..self.options.height()).map(row).collect())
        }
    }

    #[cfg(feature = "opencl")]
    fn shape(&self, flat: Vec<f64>) -> Result<KernelOutput> {
        if self.options.dimensions.len() == 1 {
            Ok(KernelOutput::Vector(flat))
        } else {
            Ok(KernelOutput::Matrix(split_array(&flat, self.options.width())?))
        }
    }
}

/// Результат запуска ядра
#[derive(Clone, PartialEq)]
pub enum KernelOutput {
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl KernelOutput {
    /// Число элементов
    pub fn len(&self) -> usize {
        match self {
            KernelOutput::Vector(values) => values.len(),
            KernelOutput::Matrix(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_flat(&self) -> Vec<f64> {
        match self {
            KernelOutput::Vector(values) => values.clone(),
            KernelOutput::Matrix(rows) => crate::matrix::flatten(rows),
        }
    }

    /// Строки результата; вектор превращается в одну строку
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        match self {
            KernelOutput::Vector(values) => vec![values],
            KernelOutput::Matrix(rows) => rows,
        }
    }
}

// Полный вывод матрицы 512x512 в лог бесполезен, показываем форму и начало
impl fmt::Debug for KernelOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 4;
        match self {
            KernelOutput::Vector(values) => {
                let head = &values[..values.len().min(PREVIEW)];
                write!(f, "Vector[{}] {:?}", values.len(), head)?;
            }
            KernelOutput::Matrix(rows) => {
                let cols = rows.first().map_or(0, Vec::len);
                let head = rows.first().map_or(&[][..], |r| &r[..r.len().min(PREVIEW)]);
                write!(f, "Matrix[{}x{}] {:?}", rows.len(), cols, head)?;
            }
        }
        if self.len() > PREVIEW {
            f.write_str(" ...")?;
        }
        Ok(())
    }
}
