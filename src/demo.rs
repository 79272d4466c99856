//! Демонстрации: умножение матриц и сложение векторов в двух режимах
//!
//! Каждая демонстрация замеряет режим "gpu", затем "cpu", и превращает
//! результат или ошибку в [`DemoOutcome`]. Создание ядра входит в замер.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::bench::bench;
use crate::compute::{Compute, ExecutionMode, KernelArg, KernelOptions, KernelOutput};
use crate::config::DemoConfig;
use crate::error::Result;
use crate::matrix::{initialize_matrices, initialize_vectors, split_array, MATRIX_MULTIPLY, VECTOR_ADD};
use crate::report::{Comparison, DemoOutcome};

/// Сообщение, которое показывается при любой ошибке демонстрации
pub const GPU_ERROR_MESSAGE: &str = "There was an error running on the GPU.";

/// Входные данные обеих демонстраций
#[derive(Debug, Clone, PartialEq)]
pub struct DemoData {
    pub mat_size: usize,
    pub a_mat: Vec<Vec<f64>>,
    pub b_mat: Vec<Vec<f64>>,
    pub a_vec: Vec<f64>,
    pub b_vec: Vec<f64>,
}

impl DemoData {
    pub fn generate(config: &DemoConfig) -> Result<Self> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::generate_with(config, &mut StdRng::seed_from_u64(seed)),
            None => Self::generate_with(config, &mut rand::thread_rng()),
        }
    }

    fn generate_with<R: Rng + ?Sized>(config: &DemoConfig, rng: &mut R) -> Result<Self> {
        let (a, b) = initialize_matrices(config.matrix_type, config.mat_size, rng);
        let a_mat = split_array(&a, config.mat_size)?;
        let b_mat = split_array(&b, config.mat_size)?;
        let (a_vec, b_vec) = initialize_vectors(config.matrix_type, config.vec_size, rng);

        Ok(Self {
            mat_size: config.mat_size,
            a_mat,
            b_mat,
            a_vec,
            b_vec,
        })
    }
}

/// Какая демонстрация
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    /// Умножение матриц
    Mult,
    /// Сложение векторов
    Vector,
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoKind::Mult => f.write_str("matrix multiply"),
            DemoKind::Vector => f.write_str("vector add"),
        }
    }
}

/// Создаёт ядро умножения `mat_size x mat_size` и запускает его один раз
pub fn benchmark_mult(compute: &Compute, mode: ExecutionMode, data: &DemoData) -> Result<KernelOutput> {
    let options = KernelOptions::new([data.mat_size, data.mat_size], mode);
    let mat_mult = compute.create_kernel(&MATRIX_MULTIPLY, options)?;
    mat_mult.run(&[KernelArg::Matrix(&data.a_mat), KernelArg::Matrix(&data.b_mat)])
}

/// Создаёт ядро сложения векторов длины `vec_size` и запускает его один раз
pub fn benchmark_vector(compute: &Compute, mode: ExecutionMode, data: &DemoData) -> Result<KernelOutput> {
    let options = KernelOptions::new([data.a_vec.len()], mode);
    let vec_add = compute.create_kernel(&VECTOR_ADD, options)?;
    vec_add.run(&[KernelArg::Vector(&data.a_vec), KernelArg::Vector(&data.b_vec)])
}

/// Среднее время одного запуска демонстрации `kind` в режиме `mode`, мс
pub fn time_mode(
    compute: &Compute,
    kind: DemoKind,
    mode: ExecutionMode,
    data: &DemoData,
    iterations: usize,
) -> Result<f64> {
    let method: fn(&Compute, ExecutionMode, &DemoData) -> Result<KernelOutput> = match kind {
        DemoKind::Mult => benchmark_mult,
        DemoKind::Vector => benchmark_vector,
    };
    info!(demo = %kind, %mode, iterations, "benchmark started");
    bench(
        |compute: &Compute, (mode, data): &(ExecutionMode, &DemoData)| method(compute, *mode, data),
        iterations,
        &(mode, data),
        compute,
    )
}

/// Замеряет GPU, затем CPU
pub fn run_demo(compute: &Compute, kind: DemoKind, data: &DemoData, iterations: usize) -> DemoOutcome {
    let label = kind.to_string();
    let timings = time_mode(compute, kind, ExecutionMode::Gpu, data, iterations).and_then(|gpu_ms| {
        let cpu_ms = time_mode(compute, kind, ExecutionMode::Cpu, data, iterations)?;
        Ok((cpu_ms, gpu_ms))
    });

    match timings {
        Ok((cpu_ms, gpu_ms)) => DemoOutcome::Completed(Comparison { label, cpu_ms, gpu_ms }),
        Err(e) => {
            warn!(demo = %kind, "demo failed: {e}");
            DemoOutcome::Failed {
                label,
                message: format!("{GPU_ERROR_MESSAGE} ({e})"),
            }
        }
    }
}

pub fn demo_mult(compute: &Compute, data: &DemoData, iterations: usize) -> DemoOutcome {
    run_demo(compute, DemoKind::Mult, data, iterations)
}

pub fn demo_vector(compute: &Compute, data: &DemoData, iterations: usize) -> DemoOutcome {
    run_demo(compute, DemoKind::Vector, data, iterations)
}
