//! Умножение матриц в одном режиме с проверкой по эталону ndarray

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gpu_bench::compute::{Compute, ExecutionMode};
use gpu_bench::demo::{benchmark_mult, DemoData};
use gpu_bench::matrix::{compare_results, flatten, initialize_matrices, reference_multiply, split_array, MatrixType};
use gpu_bench::run_bench;
use gpu_bench::utils::{format_corner, measure_time};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Execution mode
    #[arg(short, long, value_enum, default_value_t = ExecutionMode::Gpu)]
    mode: ExecutionMode,

    /// Side of the square matrices
    #[arg(short, long, default_value_t = 512)]
    size: usize,

    /// How to fill the inputs
    #[arg(long, value_enum, default_value_t = MatrixType::Random)]
    matrix_type: MatrixType,

    /// Invocations to average over
    #[arg(short, long, default_value_t = 1)]
    iterations: usize,

    /// Allowed absolute difference from the reference
    #[arg(long, default_value_t = 1e-9)]
    epsilon: f64,

    /// RNG seed for reproducible inputs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_target(false).init();

    println!("Размер матриц: {0}x{0}", args.size);
    println!("Режим: {}", args.mode);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (a, b) = initialize_matrices(args.matrix_type, args.size, &mut rng);
    let data = DemoData {
        mat_size: args.size,
        a_mat: split_array(&a, args.size)?,
        b_mat: split_array(&b, args.size)?,
        a_vec: Vec::new(),
        b_vec: Vec::new(),
    };

    println!("\nВходная матрица A:\n{}", format_corner(&data.a_mat, 4));
    println!("Входная матрица B:\n{}", format_corner(&data.b_mat, 4));

    let compute = match args.mode {
        ExecutionMode::Gpu => Compute::new(),
        ExecutionMode::Cpu => Compute::cpu_only(),
    };

    let result = run_bench(
        |compute: &Compute, data: &DemoData| benchmark_mult(compute, args.mode, data),
        args.iterations,
        &data,
        &compute,
    )
    .with_context(|| format!("Ошибка умножения в режиме {}", args.mode))?;

    let Some(output) = result.first else {
        println!("Ноль итераций, проверять нечего");
        return Ok(());
    };
    let c = output.into_rows();
    println!("Результирующая матрица C:\n{}", format_corner(&c, 4));

    let (reference, reference_time) = measure_time(|| reference_multiply(&data.a_mat, &data.b_mat));
    let reference = reference?;
    let comparison = compare_results(&flatten(&c), &flatten(&reference), args.epsilon);

    println!("Итоговая статистика:");
    println!("Среднее время ({}): {:.3} мс", args.mode, result.mean_ms);
    println!("Суммарное время: {:.3} мс", result.total_ms);
    println!("Эталон ndarray: {:?}", reference_time);
    if comparison.matches() {
        println!("Результаты совпадают с эталоном");
    } else {
        println!(
            "Обнаружены расхождения: {} элементов, максимальная разница {}",
            comparison.mismatches, comparison.max_diff
        );
    }

    Ok(())
}
