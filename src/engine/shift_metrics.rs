// ==========================================
// Sistema de Gestão de Turnos - Métricas do Turno
// ==========================================
// Responsabilidade: estatísticas agregadas da linha do tempo do turno
// Entrada: lote bruto de eventos (mesma fonte do agregador, visão
// independente, sem estado compartilhado)
// Saída: ShiftMetrics
// ==========================================

use crate::config::ClassificationProfile;
use crate::domain::event::MachineEvent;
use crate::domain::summary::ShiftMetrics;
use crate::domain::types::{round2, MachineStatus};
use crate::engine::classifier::EventClassifier;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// ShiftMetricsEngine - Sumarizador do turno
// ==========================================
pub struct ShiftMetricsEngine {
    profile: Arc<ClassificationProfile>,
    classifier: EventClassifier,
}

impl ShiftMetricsEngine {
    /// Cria um novo sumarizador sobre um perfil de configuração
    pub fn new(profile: Arc<ClassificationProfile>) -> Self {
        Self {
            classifier: EventClassifier::new(Arc::clone(&profile)),
            profile,
        }
    }

    /// Estatísticas agregadas do turno
    ///
    /// # Passos
    /// 1. Passada única sobre o lote ORIGINAL: totais rodando/parado,
    ///    maior sequência contínua rodando (zera a cada parada),
    ///    contagem de paradas
    /// 2. Subconjunto impactante -> mapa de tempo por causa
    ///    (causa ausente recebe "Não especificada")
    /// 3. Causa dominante = maior TEMPO impactante somado (não contagem;
    ///    empate fica com a primeira ocorrência no lote)
    /// 4. Causa genérica de análise -> exibe o problema mais frequente
    ///    da causa no lugar do rótulo
    /// 5. percent_running protegido contra denominador zero
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn summarize(&self, events: &[MachineEvent]) -> ShiftMetrics {
        // === Passo 1: passada única sobre o lote original ===
        let mut total_running_minutes = 0.0;
        let mut total_stopped_minutes = 0.0;
        let mut longest_run = 0.0f64;
        let mut current_run = 0.0f64;
        let mut stop_event_count = 0usize;

        for event in events {
            match event.status {
                MachineStatus::Running => {
                    let minutes = event.duration_minutes();
                    total_running_minutes += minutes;
                    current_run += minutes;
                    longest_run = longest_run.max(current_run);
                }
                MachineStatus::Stopped => {
                    total_stopped_minutes += event.duration_minutes();
                    stop_event_count += 1;
                    current_run = 0.0;
                }
            }
        }

        // === Passo 2: tempo impactante por causa ===
        let impacting = self.classifier.classify_impacting(events);
        let unspecified = &self.profile.unspecified_cause_label;

        let mut cause_order: Vec<String> = Vec::new();
        let mut cause_minutes: HashMap<String, f64> = HashMap::new();

        for event in &impacting {
            let cause = event
                .cause
                .clone()
                .unwrap_or_else(|| unspecified.clone());
            if !cause_minutes.contains_key(&cause) {
                cause_order.push(cause.clone());
            }
            *cause_minutes.entry(cause).or_insert(0.0) += event.duration_minutes();
        }

        // === Passo 3: causa dominante por tempo, empate na primeira ===
        let mut dominant_cause: Option<String> = None;
        let mut dominant_cause_minutes = 0.0;
        for cause in &cause_order {
            let minutes = cause_minutes[cause];
            if minutes > dominant_cause_minutes {
                dominant_cause = Some(cause.clone());
                dominant_cause_minutes = minutes;
            }
        }

        // === Passo 4: drill-down de causa genérica ===
        let mut dominant_cause_display_text = dominant_cause.clone();
        let mut show_problem_instead_of_cause = false;

        if let Some(cause) = &dominant_cause {
            if self.profile.generic_analysis_causes.contains(cause) {
                if let Some(problem) = self.most_frequent_problem(&impacting, cause) {
                    dominant_cause_display_text = Some(problem);
                    show_problem_instead_of_cause = true;
                }
            }
        }

        // === Passo 5: percentual de rodagem ===
        let total = total_running_minutes + total_stopped_minutes;
        let percent_running = if total > 0.0 {
            round2(total_running_minutes / total * 100.0)
        } else {
            0.0
        };

        debug!(
            total_running_minutes,
            total_stopped_minutes,
            dominant_cause = dominant_cause.as_deref().unwrap_or("-"),
            "métricas do turno calculadas"
        );

        ShiftMetrics {
            total_running_minutes,
            total_stopped_minutes,
            longest_continuous_run_minutes: longest_run,
            percent_running,
            total_events: events.len(),
            stop_event_count,
            impacting_stop_event_count: impacting.len(),
            dominant_cause,
            dominant_cause_display_text,
            dominant_cause_minutes,
            show_problem_instead_of_cause,
        }
    }

    /// Problema mais frequente entre os eventos impactantes da causa
    /// (frequência por contagem de eventos; empate na primeira ocorrência)
    fn most_frequent_problem(
        &self,
        impacting: &[MachineEvent],
        cause: &str,
    ) -> Option<String> {
        let unspecified = &self.profile.unspecified_cause_label;
        let not_reported = &self.profile.not_reported_label;

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for event in impacting {
            let event_cause = event.cause.as_deref().unwrap_or(unspecified.as_str());
            if event_cause != cause {
                continue;
            }
            let problem = event
                .problem
                .clone()
                .unwrap_or_else(|| not_reported.clone());
            if !counts.contains_key(&problem) {
                order.push(problem.clone());
            }
            *counts.entry(problem).or_insert(0) += 1;
        }

        let mut best: Option<String> = None;
        let mut best_count = 0usize;
        for problem in &order {
            let count = counts[problem];
            if count > best_count {
                best = Some(problem.clone());
                best_count = count;
            }
        }

        best
    }
}
