// ==========================================
// Sistema de Gestão de Turnos - Visões Derivadas
// ==========================================
// Responsabilidade: objetos de valor produzidos pelos motores
// Linha vermelha: construídos a cada invocação, nunca mutados depois
// Ciclo de vida: pertencem ao chamador, o motor não guarda estado
// ==========================================

use crate::domain::types::{LineLossPercent, ShiftImpactPercent};
use serde::{Deserialize, Serialize};

// ==========================================
// StopSummaryEntry - Grupo de parada agregado
// ==========================================
// Chave de agrupamento: (motivo, problema, causa)
// Campos não apontados recebem o rótulo sentinela "Não apontado"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSummaryEntry {
    pub reason: String,             // Motivo (ou "Não apontado")
    pub problem: String,            // Problema (ou "Não apontado")
    pub cause: String,              // Causa (ou "Não apontado")
    pub tempo_minutes: f64,         // Duração agregada após desconto de tolerância
    pub impact: ShiftImpactPercent, // Fatia do tempo total do turno
}

// ==========================================
// StopTimeSummary - Resumo ordenado de impacto
// ==========================================
// Saída do StopSummaryEngine; entries ordenadas por tempo decrescente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTimeSummary {
    pub entries: Vec<StopSummaryEntry>, // Grupos + entrada sintética de perda de ciclo
    pub total_stop_minutes: f64,        // Soma das durações descontadas (só impactantes)
    pub total_run_minutes: f64,         // Soma das durações RUNNING do lote original
    pub cycle_loss_minutes: f64,        // Estimativa global de perda de ciclo
}

// ==========================================
// CycleLossEstimate - Estimativa global de perda de ciclo
// ==========================================
// Saída completa do estimador: o déficit e as unidades perdidas
// alimentam o texto da entrada sintética
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleLossEstimate {
    pub loss_minutes: f64,  // Minutos de rodagem perdidos por ciclo baixo
    pub average_rate: f64,  // Ritmo médio observado (ciclos/min)
    pub ideal_rate: f64,    // Ritmo ideal da família de produto
    pub deficit: f64,       // max(0, ideal - média)
    pub lost_units: f64,    // Unidades não produzidas estimadas
}

impl CycleLossEstimate {
    /// Estimativa nula (amostras vazias, ritmo ideal zero ou sem déficit)
    pub fn zero() -> Self {
        Self {
            loss_minutes: 0.0,
            average_rate: 0.0,
            ideal_rate: 0.0,
            deficit: 0.0,
            lost_units: 0.0,
        }
    }
}

// ==========================================
// LineCycleLossEntry - Perda de ciclo por linha
// ==========================================
// Tipo distinto de StopSummaryEntry de propósito: a base percentual
// aqui é a soma das perdas das linhas, não o tempo total do turno
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCycleLossEntry {
    pub line: i32,                // Linha de produção
    pub reason: String,           // "Perda de Ciclo"
    pub problem: String,          // Texto legível com déficit e unidades perdidas
    pub cause: String,            // "Ciclo Baixo"
    pub tempo_minutes: f64,       // Minutos perdidos na linha
    pub impact: LineLossPercent,  // Fatia da perda total entre as linhas
}

// ==========================================
// ShiftMetrics - Estatísticas agregadas do turno
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftMetrics {
    // ===== Totais de tempo =====
    pub total_running_minutes: f64,         // Minutos rodando
    pub total_stopped_minutes: f64,         // Minutos parados
    pub longest_continuous_run_minutes: f64, // Maior sequência contínua rodando
    pub percent_running: f64,               // 0-100, protegido contra denominador zero

    // ===== Contagens =====
    pub total_events: usize,                // Eventos no lote
    pub stop_event_count: usize,            // Eventos STOPPED
    pub impacting_stop_event_count: usize,  // Eventos STOPPED que impactam eficiência

    // ===== Causa dominante =====
    pub dominant_cause: Option<String>,              // Causa com maior tempo impactante
    pub dominant_cause_display_text: Option<String>, // Texto exibido (causa ou problema)
    pub dominant_cause_minutes: f64,                 // Tempo impactante da causa dominante
    pub show_problem_instead_of_cause: bool,         // true quando a causa é genérica
}
