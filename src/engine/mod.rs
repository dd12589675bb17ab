// ==========================================
// Sistema de Gestão de Turnos - Camada de Motores
// ==========================================
// Responsabilidade: regras de negócio de classificação e agregação
// Linha vermelha: motores sem estado, determinísticos, sem I/O;
// entrada idêntica produz saída idêntica (recálculo a cada polling)
// ==========================================

pub mod classifier;
pub mod cycle_loss;
pub mod shift_metrics;
pub mod stop_summary;

// Reexporta os motores centrais
pub use classifier::EventClassifier;
pub use cycle_loss::CycleLossEstimator;
pub use shift_metrics::ShiftMetricsEngine;
pub use stop_summary::StopSummaryEngine;
