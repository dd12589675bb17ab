// ==========================================
// Sistema de Gestão de Turnos - Perfil de Classificação
// ==========================================
// Responsabilidade: tabela de tolerâncias, causas nunca impactantes,
// rótulos sentinela e constantes de ritmo ideal
// Carga: uma vez na inicialização do processo, sem hot-reload
// Linha vermelha: lista ORDENADA avaliada em first-match-wins,
// nunca trocar por mapa hash (a ordem de varredura é contrato)
// ==========================================

use crate::config::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// AllowanceRule - Tolerância por causa
// ==========================================
// Minutos descontados da parada antes de contar contra a eficiência
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceRule {
    pub label: String,              // Substring casada contra motivo/causa/problema
    pub max_discount_minutes: f64,  // Desconto máximo em minutos
}

impl AllowanceRule {
    pub fn new(label: &str, max_discount_minutes: f64) -> Self {
        Self {
            label: label.to_string(),
            max_discount_minutes,
        }
    }
}

// ==========================================
// ClassificationProfile - Configuração do motor
// ==========================================
// Objeto explícito injetado nos motores (substitui constantes globais,
// permitindo fixtures nos testes sem tocar estado do processo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationProfile {
    // ===== Classificação de paradas =====
    #[serde(default = "default_allowances")]
    pub allowances: Vec<AllowanceRule>, // Tolerâncias, varridas em ordem

    #[serde(default = "default_never_impacting")]
    pub never_impacting: Vec<String>, // Substrings que excluem a parada por completo

    #[serde(default = "default_generic_analysis_causes")]
    pub generic_analysis_causes: Vec<String>, // Causas genéricas: exibir o problema no lugar

    // ===== Rótulos sentinela (exibidos ao usuário, comparados verbatim) =====
    #[serde(default = "default_not_reported_label")]
    pub not_reported_label: String, // "Não apontado"

    #[serde(default = "default_unspecified_cause_label")]
    pub unspecified_cause_label: String, // "Não especificada"

    #[serde(default = "default_cycle_loss_reason")]
    pub cycle_loss_reason: String, // "Perda de Ciclo"

    #[serde(default = "default_low_cycle_cause")]
    pub low_cycle_cause: String, // "Ciclo Baixo"

    // ===== Estimativa de perda de ciclo =====
    #[serde(default = "default_running_sample_status")]
    pub running_sample_status: String, // Sentinela de amostra "rodando"

    #[serde(default = "default_ideal_cycle_rate")]
    pub ideal_cycle_rate: f64, // Ritmo ideal da família padrão (ciclos/min)

    #[serde(default = "default_ideal_cycle_rate_small")]
    pub ideal_cycle_rate_small: f64, // Ritmo ideal da família de unidade menor

    #[serde(default = "default_small_unit_marker")]
    pub small_unit_marker: String, // Substring no rótulo do produto que seleciona o ritmo menor
}

fn default_allowances() -> Vec<AllowanceRule> {
    vec![
        AllowanceRule::new("Refeição", 65.0),
        AllowanceRule::new("Troca de Sabor", 20.0),
        AllowanceRule::new("Troca de Turno", 10.0),
        AllowanceRule::new("Ginástica Laboral", 10.0),
    ]
}

fn default_never_impacting() -> Vec<String> {
    vec![
        "Sem Produção".to_string(),
        "Sem Programação".to_string(),
        "Parada Programada".to_string(),
        "Feriado".to_string(),
    ]
}

fn default_generic_analysis_causes() -> Vec<String> {
    vec![
        "Realizar análise de falha".to_string(),
        "Necessidade de análise".to_string(),
    ]
}

fn default_not_reported_label() -> String {
    "Não apontado".to_string()
}

fn default_unspecified_cause_label() -> String {
    "Não especificada".to_string()
}

fn default_cycle_loss_reason() -> String {
    "Perda de Ciclo".to_string()
}

fn default_low_cycle_cause() -> String {
    "Ciclo Baixo".to_string()
}

fn default_running_sample_status() -> String {
    "RODANDO".to_string()
}

fn default_ideal_cycle_rate() -> f64 {
    11.2
}

fn default_ideal_cycle_rate_small() -> f64 {
    8.4
}

fn default_small_unit_marker() -> String {
    "600".to_string()
}

impl Default for ClassificationProfile {
    /// Constantes de produção (trocar exige novo deploy)
    fn default() -> Self {
        Self {
            allowances: default_allowances(),
            never_impacting: default_never_impacting(),
            generic_analysis_causes: default_generic_analysis_causes(),
            not_reported_label: default_not_reported_label(),
            unspecified_cause_label: default_unspecified_cause_label(),
            cycle_loss_reason: default_cycle_loss_reason(),
            low_cycle_cause: default_low_cycle_cause(),
            running_sample_status: default_running_sample_status(),
            ideal_cycle_rate: default_ideal_cycle_rate(),
            ideal_cycle_rate_small: default_ideal_cycle_rate_small(),
            small_unit_marker: default_small_unit_marker(),
        }
    }
}

impl ClassificationProfile {
    /// Carrega um perfil de uma string JSON
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profile: ClassificationProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Carrega um perfil de um arquivo JSON (inicialização do processo)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Valida o perfil carregado
    ///
    /// # Regras
    /// 1. Rótulo de tolerância não pode ser vazio
    /// 2. Desconto não pode ser negativo
    /// 3. Substring nunca-impactante não pode ser vazia
    pub fn validate(&self) -> Result<(), ProfileError> {
        for rule in &self.allowances {
            if rule.label.is_empty() {
                return Err(ProfileError::Validation(
                    "tolerância com rótulo vazio".to_string(),
                ));
            }
            if rule.max_discount_minutes < 0.0 {
                return Err(ProfileError::Validation(format!(
                    "tolerância '{}' com desconto negativo ({})",
                    rule.label, rule.max_discount_minutes
                )));
            }
        }

        for label in &self.never_impacting {
            if label.is_empty() {
                return Err(ProfileError::Validation(
                    "substring nunca-impactante vazia".to_string(),
                ));
            }
        }

        Ok(())
    }
}
