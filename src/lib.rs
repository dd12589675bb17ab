// ==========================================
// Sistema de Gestão de Turnos - Biblioteca Central
// ==========================================
// Motor de Classificação de Paradas e Impacto de Eficiência
// Posicionamento: biblioteca pura invocada de forma síncrona sobre
// lotes já buscados; sem rede, sem arquivo, sem CLI, sem persistência
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de configuração - perfil de classificação
pub mod config;

// Camada de motores - regras de negócio
pub mod engine;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexporta os tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{LineLossPercent, MachineStatus, ShiftImpactPercent};

// Entidades de domínio
pub use domain::{
    CycleLossEstimate, CycleSample, LineCycleLossEntry, MachineEvent, ShiftMetrics,
    StopSummaryEntry, StopTimeSummary,
};

// Configuração
pub use config::{AllowanceRule, ClassificationProfile, ProfileError};

// Motores
pub use engine::{CycleLossEstimator, EventClassifier, ShiftMetricsEngine, StopSummaryEngine};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Sistema de Gestão de Turnos";
