//! Сравнение GPU и CPU: умножение матриц и сложение векторов

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use gpu_bench::config::DemoConfig;
use gpu_bench::demo::{run_demo, DemoData, DemoKind};
use gpu_bench::report::{render_table, DemoOutcome};
use gpu_bench::{Compute, MatrixType};

/// Какие демонстрации запускать
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoSelection {
    Mult,
    Vector,
    All,
}

impl DemoSelection {
    fn kinds(self) -> &'static [DemoKind] {
        match self {
            DemoSelection::Mult => &[DemoKind::Mult],
            DemoSelection::Vector => &[DemoKind::Vector],
            DemoSelection::All => &[DemoKind::Mult, DemoKind::Vector],
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path (JSON)
    #[arg(short, long, env = "GPU_BENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Which demo to run
    #[arg(short, long, value_enum, default_value_t = DemoSelection::All)]
    demo: DemoSelection,

    /// Side of the square matrices
    #[arg(long)]
    mat_size: Option<usize>,

    /// Length of the vectors
    #[arg(long)]
    vec_size: Option<usize>,

    /// Invocations per timed mode
    #[arg(short, long)]
    iterations: Option<usize>,

    /// How to fill the inputs
    #[arg(long, value_enum)]
    matrix_type: Option<MatrixType>,

    /// RNG seed for reproducible inputs
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the OpenCL device probe
    #[arg(long)]
    cpu_only: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::from_file(path)?,
            None => DemoConfig::default(),
        };
        if let Some(mat_size) = self.mat_size {
            config.mat_size = mat_size;
        }
        if let Some(vec_size) = self.vec_size {
            config.vec_size = vec_size;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(matrix_type) = self.matrix_type {
            config.matrix_type = matrix_type;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config()?;
    let compute = if cli.cpu_only {
        Compute::cpu_only()
    } else {
        Compute::new()
    };

    let progress = spinner("Подготовка данных...".to_string());
    let data = DemoData::generate(&config).context("Не удалось подготовить входные данные")?;
    progress.finish_and_clear();

    let mut outcomes: Vec<DemoOutcome> = Vec::new();
    for &kind in cli.demo.kinds() {
        let progress = spinner(format!("Выполняется: {kind}"));
        let outcome = run_demo(&compute, kind, &data, config.iterations);
        progress.finish_and_clear();
        outcomes.push(outcome);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!(
            "Матрицы: {0}x{0}, векторы: {1}, итераций: {2}",
            config.mat_size, config.vec_size, config.iterations
        );
        render_table(&outcomes).printstd();
        for outcome in &outcomes {
            if let DemoOutcome::Completed(comparison) = outcome {
                println!("{}: {}", comparison.label, comparison.summary());
            }
        }
    }

    Ok(())
}
