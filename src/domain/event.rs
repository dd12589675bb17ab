// ==========================================
// Sistema de Gestão de Turnos - Eventos de Máquina
// ==========================================
// Responsabilidade: entidades brutas recebidas da camada de coleta
// Uso: camada de coleta escreve, motores apenas leem
// Pré-condição: virada de relógio (end < start) já tratada upstream
// ==========================================

use crate::domain::types::MachineStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MachineEvent - Intervalo de status de uma máquina
// ==========================================
// Um registro por intervalo contínuo RUNNING/STOPPED
// Invariante: eventos RUNNING não carregam semântica de motivo/problema/causa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEvent {
    // ===== Identificação =====
    pub line: i32,                  // Linha de produção
    pub machine_id: String,         // Identificador da unidade física
    pub status: MachineStatus,      // RUNNING / STOPPED

    // ===== Janela de tempo =====
    pub start_time: Option<DateTime<Utc>>, // Início do intervalo
    pub end_time: Option<DateTime<Utc>>,   // Fim do intervalo
    pub duration_minutes_raw: Option<f64>, // Duração informada (campo autoritativo quando presente)

    // ===== Taxonomia de parada (texto livre, histórico) =====
    pub reason: Option<String>,  // Motivo (nível 1)
    pub problem: Option<String>, // Problema (nível 2)
    pub cause: Option<String>,   // Causa (nível 3, mais específica)

    // ===== Override upstream =====
    pub affects_efficiency_flag: Option<i32>, // 0 = conta na eficiência, 1 = excluído upstream
}

impl MachineEvent {
    /// Duração do evento em minutos, nunca negativa
    ///
    /// # Regras
    /// 1. `duration_minutes_raw` presente -> valor autoritativo
    /// 2. Senão, derivada de `end_time - start_time`
    /// 3. Sem janela e sem duração informada -> 0
    pub fn duration_minutes(&self) -> f64 {
        if let Some(raw) = self.duration_minutes_raw {
            return raw.max(0.0);
        }

        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let seconds = end.signed_duration_since(start).num_seconds();
                (seconds as f64 / 60.0).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Evento com a duração substituída (saída do classificador)
    pub fn with_duration(&self, minutes: f64) -> Self {
        let mut event = self.clone();
        event.duration_minutes_raw = Some(minutes.max(0.0));
        event
    }
}

// ==========================================
// CycleSample - Amostra de ritmo por minuto
// ==========================================
// Telemetria de vazão coletada a cada minuto por máquina
// Só conta para a estimativa quando status == sentinela de "rodando"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSample {
    pub line: i32,                  // Linha de produção
    pub machine_id: String,         // Identificador da unidade física
    pub cycle_rate_per_minute: f64, // Unidades produzidas por minuto (>= 0)
    pub product: String,            // Produto em linha (seleciona o ritmo ideal)
    pub status: String,             // Status bruto da amostra (texto da API upstream)
}
