//! Отображение результатов сравнения

use prettytable::{format, row, Table};
use serde::Serialize;

/// Время одной и той же операции в двух режимах
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub label: String,
    pub cpu_ms: f64,
    pub gpu_ms: f64,
}

impl Comparison {
    /// Во сколько раз GPU быстрее; `None`, если не быстрее
    pub fn speedup(&self) -> Option<f64> {
        (self.gpu_ms > 0.0 && self.cpu_ms > self.gpu_ms).then(|| self.cpu_ms / self.gpu_ms)
    }

    pub fn summary(&self) -> String {
        let mut text = format!("CPU: {}ms, GPU: {}ms", self.cpu_ms, self.gpu_ms);
        if let Some(times) = self.speedup() {
            text.push_str(&format!(" ({times:.2} times faster!)"));
        }
        text
    }
}

/// Итог одной демонстрации
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DemoOutcome {
    Completed(Comparison),
    Failed { label: String, message: String },
}

impl DemoOutcome {
    pub fn label(&self) -> &str {
        match self {
            DemoOutcome::Completed(comparison) => &comparison.label,
            DemoOutcome::Failed { label, .. } => label,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DemoOutcome::Completed(_))
    }
}

/// Таблица: демонстрация, CPU, GPU, ускорение
pub fn render_table(outcomes: &[DemoOutcome]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![b => "Demo", "CPU, ms", "GPU, ms", "Speed-up"]);

    for outcome in outcomes {
        match outcome {
            DemoOutcome::Completed(c) => {
                let speedup = c
                    .speedup()
                    .map_or_else(|| "-".to_string(), |times| format!("{times:.2}x"));
                table.add_row(row![c.label, r -> format!("{:.3}", c.cpu_ms), r -> format!("{:.3}", c.gpu_ms), r -> speedup]);
            }
            DemoOutcome::Failed { label, message } => {
                table.add_row(row![label, H3Fr -> message]);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(cpu_ms: f64, gpu_ms: f64) -> Comparison {
        Comparison {
            label: "mult".to_string(),
            cpu_ms,
            gpu_ms,
        }
    }

    #[test]
    fn speedup_only_when_gpu_faster() {
        assert_eq!(comparison(100.0, 25.0).speedup(), Some(4.0));
        assert_eq!(comparison(10.0, 25.0).speedup(), None);
        assert_eq!(comparison(10.0, 10.0).speedup(), None);
        assert_eq!(comparison(10.0, 0.0).speedup(), None);
    }

    #[test]
    fn summary_text() {
        assert_eq!(
            comparison(300.0, 100.0).summary(),
            "CPU: 300ms, GPU: 100ms (3.00 times faster!)"
        );
        assert_eq!(comparison(1.5, 2.0).summary(), "CPU: 1.5ms, GPU: 2ms");
    }

    #[test]
    fn json_is_tagged() {
        let done = serde_json::to_value(DemoOutcome::Completed(comparison(2.0, 1.0))).unwrap();
        assert_eq!(done["status"], "completed");
        assert_eq!(done["cpuMs"], 2.0);

        let failed = serde_json::to_value(DemoOutcome::Failed {
            label: "vector".to_string(),
            message: "no device".to_string(),
        })
        .unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["message"], "no device");
    }

    #[test]
    fn table_has_row_per_outcome() {
        let outcomes = vec![
            DemoOutcome::Completed(comparison(2.0, 1.0)),
            DemoOutcome::Failed {
                label: "vector".to_string(),
                message: "boom".to_string(),
            },
        ];
        let table = render_table(&outcomes);
        assert_eq!(table.len(), 2);
        let text = table.to_string();
        assert!(text.contains("2.00x"));
        assert!(text.contains("boom"));
    }
}
