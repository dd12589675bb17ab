// ==========================================
// Sistema de Gestão de Turnos - Agregador de Tempo de Parada
// ==========================================
// Responsabilidade: resumo ordenado de impacto por (motivo, problema,
// causa), com entrada sintética de perda de ciclo
// Entrada: lote bruto de eventos + amostras de ciclo (fontes distintas)
// Saída: StopTimeSummary, objeto de valor do chamador
// Linha vermelha: percentual sobre o tempo total do turno; a soma das
// entradas NÃO fecha 100 (a fatia de rodagem fica implícita)
// ==========================================

use crate::config::ClassificationProfile;
use crate::domain::event::{CycleSample, MachineEvent};
use crate::domain::summary::{StopSummaryEntry, StopTimeSummary};
use crate::domain::types::{MachineStatus, ShiftImpactPercent};
use crate::engine::classifier::EventClassifier;
use crate::engine::cycle_loss::{format_cycle_loss_problem, CycleLossEstimator};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// StopSummaryEngine - Agregador de paradas
// ==========================================
pub struct StopSummaryEngine {
    profile: Arc<ClassificationProfile>,
    classifier: EventClassifier,
    estimator: CycleLossEstimator,
}

impl StopSummaryEngine {
    /// Cria um novo agregador sobre um perfil de configuração
    pub fn new(profile: Arc<ClassificationProfile>) -> Self {
        Self {
            classifier: EventClassifier::new(Arc::clone(&profile)),
            estimator: CycleLossEstimator::new(Arc::clone(&profile)),
            profile,
        }
    }

    /// Resumo ordenado de impacto das paradas do turno
    ///
    /// # Passos
    /// 1. Classifica as paradas impactantes (durações já descontadas)
    /// 2. total_stop = soma das durações descontadas
    /// 3. total_run = soma das durações RUNNING do lote ORIGINAL
    /// 4. Perda de ciclo global via estimador
    /// 5. Agrupa por (motivo, problema, causa); campo ausente recebe
    ///    "Não apontado" (rótulo exibido e comparado verbatim)
    /// 6. Perda > 0 injeta a entrada sintética "Perda de Ciclo"
    /// 7. impact = round2(tempo / (stop + perda + run) * 100)
    /// 8. Ordena por tempo decrescente; empate preserva a ordem de
    ///    primeira ocorrência no lote (pré-ordenar por timestamp se o
    ///    chamador precisar de desempate determinístico)
    #[instrument(skip(self, events, samples), fields(event_count = events.len(), sample_count = samples.len()))]
    pub fn aggregate(&self, events: &[MachineEvent], samples: &[CycleSample]) -> StopTimeSummary {
        let impacting = self.classifier.classify_impacting(events);

        let total_stop_minutes: f64 = impacting.iter().map(|e| e.duration_minutes()).sum();
        let total_run_minutes: f64 = events
            .iter()
            .filter(|e| e.status == MachineStatus::Running)
            .map(|e| e.duration_minutes())
            .sum();

        let estimate = self.estimator.estimate(samples, total_run_minutes);
        let cycle_loss_minutes = estimate.loss_minutes;

        // agrupamento preservando a ordem de primeira ocorrência
        let not_reported = &self.profile.not_reported_label;
        let mut index: HashMap<(String, String, String), usize> = HashMap::new();
        let mut groups: Vec<StopSummaryEntry> = Vec::new();

        for event in &impacting {
            let key = (
                event.reason.clone().unwrap_or_else(|| not_reported.clone()),
                event.problem.clone().unwrap_or_else(|| not_reported.clone()),
                event.cause.clone().unwrap_or_else(|| not_reported.clone()),
            );

            match index.get(&key) {
                Some(&at) => groups[at].tempo_minutes += event.duration_minutes(),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(StopSummaryEntry {
                        reason: key.0,
                        problem: key.1,
                        cause: key.2,
                        tempo_minutes: event.duration_minutes(),
                        impact: ShiftImpactPercent::new(0.0), // recalculado abaixo
                    });
                }
            }
        }

        // entrada sintética de perda de ciclo
        if cycle_loss_minutes > 0.0 {
            groups.push(StopSummaryEntry {
                reason: self.profile.cycle_loss_reason.clone(),
                problem: format_cycle_loss_problem(estimate.deficit, estimate.lost_units),
                cause: self.profile.low_cycle_cause.clone(),
                tempo_minutes: cycle_loss_minutes,
                impact: ShiftImpactPercent::new(0.0),
            });
        }

        // base percentual: tempo total do turno
        let shift_total = total_stop_minutes + cycle_loss_minutes + total_run_minutes;
        if shift_total > 0.0 {
            for group in &mut groups {
                group.impact =
                    ShiftImpactPercent::new(group.tempo_minutes / shift_total * 100.0);
            }
        }

        // sort estável: empate mantém a ordem de inserção
        groups.sort_by(|a, b| {
            b.tempo_minutes
                .partial_cmp(&a.tempo_minutes)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            groups = groups.len(),
            total_stop_minutes, total_run_minutes, cycle_loss_minutes, "resumo de paradas agregado"
        );

        StopTimeSummary {
            entries: groups,
            total_stop_minutes,
            total_run_minutes,
            cycle_loss_minutes,
        }
    }
}
