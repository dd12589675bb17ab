// ==========================================
// Sistema de Gestão de Turnos - Tipos de Domínio
// ==========================================
// Responsabilidade: enums e objetos de valor compartilhados
// Linha vermelha: duas bases percentuais distintas, nunca unificar
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Status da Máquina (Machine Status)
// ==========================================
// Formato de serialização: SCREAMING_SNAKE_CASE (alinhado com a API upstream)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    Running, // Máquina rodando
    Stopped, // Máquina parada
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Running => write!(f, "RUNNING"),
            MachineStatus::Stopped => write!(f, "STOPPED"),
        }
    }
}

// ==========================================
// Percentual de Impacto no Turno (Shift Impact Percent)
// ==========================================
// Base: tempo total do turno (parado + perda de ciclo + rodando)
// Linha vermelha: NÃO é a mesma base de LineLossPercent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftImpactPercent(f64);

impl ShiftImpactPercent {
    /// Cria um percentual de impacto, arredondado a 2 casas e limitado a [0, 100]
    pub fn new(raw: f64) -> Self {
        Self(round2(raw).clamp(0.0, 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for ShiftImpactPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

// ==========================================
// Percentual de Perda por Linha (Line Loss Percent)
// ==========================================
// Base: soma dos minutos de perda de ciclo de todas as linhas
// Linha vermelha: NÃO é a mesma base de ShiftImpactPercent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineLossPercent(f64);

impl LineLossPercent {
    /// Cria um percentual de perda por linha, arredondado a 2 casas e limitado a [0, 100]
    pub fn new(raw: f64) -> Self {
        Self(round2(raw).clamp(0.0, 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for LineLossPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Arredonda a 2 casas decimais
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
