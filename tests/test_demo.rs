//! Интеграционные тесты демонстраций и ядер
//!
//! Режим "gpu" проверяется только с `--features opencl` на машине с
//! OpenCL GPU, остальное идёт в режиме "cpu".

use gpu_bench::compute::{Compute, ExecutionMode, KernelArg, KernelOptions, KernelOutput};
use gpu_bench::config::DemoConfig;
use gpu_bench::demo::{benchmark_mult, benchmark_vector, run_demo, time_mode, DemoData, DemoKind};
use gpu_bench::matrix::{compare_results, reference_multiply, MatrixType, VECTOR_ADD};
use gpu_bench::report::{render_table, DemoOutcome};

fn config(seed: u64) -> DemoConfig {
    DemoConfig {
        mat_size: 16,
        vec_size: 1000,
        iterations: 2,
        matrix_type: MatrixType::Random,
        seed: Some(seed),
    }
}

#[test]
fn seeded_data_is_reproducible() {
    let first = DemoData::generate(&config(3)).unwrap();
    let second = DemoData::generate(&config(3)).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, DemoData::generate(&config(4)).unwrap());
}

#[test]
fn cpu_mult_matches_ndarray_reference() {
    let data = DemoData::generate(&config(11)).unwrap();
    let out = benchmark_mult(&Compute::cpu_only(), ExecutionMode::Cpu, &data).unwrap();
    let reference = reference_multiply(&data.a_mat, &data.b_mat).unwrap();
    let flat_reference: Vec<f64> = reference.into_iter().flatten().collect();
    let cmp = compare_results(&out.to_flat(), &flat_reference, 1e-9);
    assert!(cmp.matches(), "{cmp:?}");
}

#[test]
fn cpu_vector_add_matches_elementwise_sum() {
    let data = DemoData::generate(&config(12)).unwrap();
    let out = benchmark_vector(&Compute::cpu_only(), ExecutionMode::Cpu, &data).unwrap();
    let expected: Vec<f64> = data.a_vec.iter().zip(&data.b_vec).map(|(a, b)| a + b).collect();
    assert_eq!(out, KernelOutput::Vector(expected));
}

#[test]
fn cpu_timing_through_harness() {
    let data = DemoData::generate(&config(13)).unwrap();
    let compute = Compute::cpu_only();
    for kind in [DemoKind::Mult, DemoKind::Vector] {
        let mean = time_mode(&compute, kind, ExecutionMode::Cpu, &data, 2).unwrap();
        assert!(mean >= 0.0);
    }
}

#[test]
fn kernel_can_be_reused() {
    let compute = Compute::cpu_only();
    let kernel = compute
        .create_kernel(&VECTOR_ADD, KernelOptions::new([2], ExecutionMode::Cpu))
        .unwrap();
    assert_eq!(kernel.mode(), ExecutionMode::Cpu);
    let (a, b) = ([1.0, 2.0], [3.0, 4.0]);
    let first = kernel.run(&[KernelArg::Vector(&a), KernelArg::Vector(&b)]).unwrap();
    let second = kernel.run(&[KernelArg::Vector(&b), KernelArg::Vector(&a)]).unwrap();
    assert_eq!(first, second);
}

#[cfg(not(feature = "opencl"))]
#[test]
fn demos_report_gpu_failure_without_opencl() {
    let data = DemoData::generate(&config(14)).unwrap();
    let compute = Compute::new();
    let outcomes: Vec<DemoOutcome> = [DemoKind::Mult, DemoKind::Vector]
        .into_iter()
        .map(|kind| run_demo(&compute, kind, &data, 1))
        .collect();
    assert!(outcomes.iter().all(|o| !o.is_completed()));
    assert_eq!(outcomes[1].label(), "vector add");

    let json = serde_json::to_value(&outcomes).unwrap();
    assert_eq!(json[0]["status"], "failed");
    assert_eq!(render_table(&outcomes).len(), 2);
}

#[cfg(feature = "opencl")]
#[test]
fn gpu_matches_cpu_when_available() {
    let compute = Compute::new();
    if !compute.gpu_available() {
        return;
    }
    let data = DemoData::generate(&config(15)).unwrap();
    let gpu = benchmark_mult(&compute, ExecutionMode::Gpu, &data).unwrap();
    let cpu = benchmark_mult(&compute, ExecutionMode::Cpu, &data).unwrap();
    assert!(compare_results(&gpu.to_flat(), &cpu.to_flat(), 1e-9).matches());

    match run_demo(&compute, DemoKind::Vector, &data, 1) {
        DemoOutcome::Completed(c) => assert!(c.cpu_ms >= 0.0 && c.gpu_ms >= 0.0),
        other => panic!("unexpected {other:?}"),
    }
}
