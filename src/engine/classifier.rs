// ==========================================
// Sistema de Gestão de Turnos - Classificador de Eventos
// ==========================================
// Responsabilidade: separar paradas impactantes e não impactantes
// Entrada: lote bruto de MachineEvent
// Saída: novos vetores com duração ajustada, entrada intacta
// Linha vermelha: motor sem estado, funções puras sobre o lote
// ==========================================

use crate::config::{AllowanceRule, ClassificationProfile};
use crate::domain::event::MachineEvent;
use crate::domain::types::MachineStatus;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// EventClassifier - Classificador de paradas
// ==========================================
pub struct EventClassifier {
    profile: Arc<ClassificationProfile>,
}

impl EventClassifier {
    /// Cria um novo classificador sobre um perfil de configuração
    pub fn new(profile: Arc<ClassificationProfile>) -> Self {
        Self { profile }
    }

    /// Paradas que contam contra a eficiência
    ///
    /// # Regras
    /// 1. Eventos RUNNING são descartados
    /// 2. affects_efficiency_flag = 1 -> descartado (exclusão upstream)
    /// 3. Casou substring nunca-impactante -> descartado
    ///    (exceto se affects_efficiency_flag = 0, que força a contagem)
    /// 4. Casou tolerância: duração SUBSTITUÍDA pelo restante
    ///    (duração - desconto); restante <= 0 descarta o evento inteiro
    /// 5. Sem tolerância: mantido com a duração original
    ///
    /// Evento sem motivo/causa/problema cai na regra 5 (totalmente impactante).
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn classify_impacting(&self, events: &[MachineEvent]) -> Vec<MachineEvent> {
        let mut impacting = Vec::new();

        for event in events {
            if event.status != MachineStatus::Stopped {
                continue;
            }

            if event.affects_efficiency_flag == Some(1) {
                continue;
            }

            if self.matches_never_impacting(event) {
                continue;
            }

            match self.find_allowance(event) {
                Some(rule) => {
                    let remaining = event.duration_minutes() - rule.max_discount_minutes;
                    if remaining <= 0.0 {
                        // parada totalmente absorvida pela tolerância
                        debug!(
                            label = %rule.label,
                            duration = event.duration_minutes(),
                            "parada absorvida pela tolerância"
                        );
                        continue;
                    }
                    impacting.push(event.with_duration(remaining));
                }
                None => impacting.push(event.clone()),
            }
        }

        impacting
    }

    /// Paradas permitidas/ignoradas (toggle de exibição do painel)
    ///
    /// União de duas passadas, na ordem, NÃO um filtro único:
    /// (a) paradas que casaram tolerância, com a duração substituída
    ///     pelo próprio desconto (não pelo restante)
    /// (b) paradas que casaram o conjunto nunca-impactante, com a
    ///     duração original completa
    ///
    /// Um evento que casa as duas passadas aparece duas vezes; o
    /// comportamento é contrato com o painel e está fixado em teste.
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn classify_non_impacting(&self, events: &[MachineEvent]) -> Vec<MachineEvent> {
        let mut non_impacting = Vec::new();

        // passada (a): tolerâncias, duração = desconto
        for event in events {
            if event.status != MachineStatus::Stopped {
                continue;
            }
            if let Some(rule) = self.find_allowance(event) {
                non_impacting.push(event.with_duration(rule.max_discount_minutes));
            }
        }

        // passada (b): nunca-impactantes, duração original
        for event in events {
            if event.status != MachineStatus::Stopped {
                continue;
            }
            if self.matches_never_impacting(event) {
                non_impacting.push(event.clone());
            }
        }

        non_impacting
    }

    // ==========================================
    // Casamento de regras
    // ==========================================

    /// Primeira tolerância cuja substring casa o evento
    ///
    /// Ordem de varredura: motivo, depois causa, depois problema;
    /// dentro de cada campo, a lista ordenada de tolerâncias.
    /// First-match-wins: a precedência entre rótulos sobrepostos é
    /// herdada do painel legado e não deve ser "corrigida" aqui.
    fn find_allowance(&self, event: &MachineEvent) -> Option<&AllowanceRule> {
        let fields = [
            event.reason.as_deref(),
            event.cause.as_deref(),
            event.problem.as_deref(),
        ];

        for text in fields.into_iter().flatten() {
            if let Some(rule) = self
                .profile
                .allowances
                .iter()
                .find(|rule| text.contains(&rule.label))
            {
                return Some(rule);
            }
        }

        None
    }

    /// Evento casa o conjunto nunca-impactante (match case-sensitive)
    ///
    /// affects_efficiency_flag = 0 tem precedência sobre o conjunto:
    /// o upstream força a contagem mesmo para causa listada.
    fn matches_never_impacting(&self, event: &MachineEvent) -> bool {
        if event.affects_efficiency_flag == Some(0) {
            return false;
        }

        let fields = [
            event.reason.as_deref(),
            event.cause.as_deref(),
            event.problem.as_deref(),
        ];

        fields.into_iter().flatten().any(|text| {
            self.profile
                .never_impacting
                .iter()
                .any(|label| text.contains(label))
        })
    }
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(
        status: MachineStatus,
        cause: Option<&str>,
        duration_minutes: f64,
    ) -> MachineEvent {
        MachineEvent {
            line: 1,
            machine_id: "ENV-01".to_string(),
            status,
            start_time: None,
            end_time: None,
            duration_minutes_raw: Some(duration_minutes),
            reason: None,
            problem: None,
            cause: cause.map(|c| c.to_string()),
            affects_efficiency_flag: None,
        }
    }

    fn create_classifier() -> EventClassifier {
        EventClassifier::new(Arc::new(ClassificationProfile::default()))
    }

    // ==========================================
    // Teste 1: cenários de tolerância
    // ==========================================

    #[test]
    fn test_allowance_partial_discount() {
        // Refeição de 70 min com tolerância de 65 -> restam 5 impactantes
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("Refeição"),
            70.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 5.0);

        let non_impacting = classifier.classify_non_impacting(&events);
        assert_eq!(non_impacting.len(), 1);
        assert_eq!(non_impacting[0].duration_minutes(), 65.0);
    }

    #[test]
    fn test_allowance_fully_absorbed() {
        // 40 min <= tolerância de 65 -> some do lado impactante
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("Refeição"),
            40.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert!(impacting.is_empty());

        // no lado não impactante a duração vira o próprio desconto
        let non_impacting = classifier.classify_non_impacting(&events);
        assert_eq!(non_impacting.len(), 1);
        assert_eq!(non_impacting[0].duration_minutes(), 65.0);
    }

    #[test]
    fn test_allowance_exact_boundary_dropped() {
        // restante == 0 descarta (fronteira em <= 0, não < 0)
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("Refeição"),
            65.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert!(impacting.is_empty());
    }

    #[test]
    fn test_allowance_field_scan_order() {
        // motivo vence causa: "Troca de Turno" (10) no motivo,
        // "Refeição" (65) na causa -> desconta 10
        let classifier = create_classifier();
        let mut event = create_test_event(MachineStatus::Stopped, Some("Refeição"), 30.0);
        event.reason = Some("Troca de Turno".to_string());

        let impacting = classifier.classify_impacting(&[event]);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 20.0);
    }

    #[test]
    fn test_allowance_substring_match() {
        // rótulo casa por substring, não por igualdade
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("Refeição - turno da noite"),
            70.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 5.0);
    }

    // ==========================================
    // Teste 2: conjunto nunca-impactante
    // ==========================================

    #[test]
    fn test_never_impacting_excluded() {
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("Sem Produção"),
            40.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert!(impacting.is_empty());

        let non_impacting = classifier.classify_non_impacting(&events);
        assert_eq!(non_impacting.len(), 1);
        assert_eq!(non_impacting[0].duration_minutes(), 40.0); // duração completa
    }

    #[test]
    fn test_never_impacting_case_sensitive() {
        // match é case-sensitive: "sem produção" minúsculo não casa
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Stopped,
            Some("sem produção"),
            40.0,
        )];

        let impacting = classifier.classify_impacting(&events);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 40.0);
    }

    // ==========================================
    // Teste 3: override upstream
    // ==========================================

    #[test]
    fn test_flag_one_excludes() {
        let classifier = create_classifier();
        let mut event = create_test_event(MachineStatus::Stopped, Some("Quebra Mecânica"), 30.0);
        event.affects_efficiency_flag = Some(1);

        let impacting = classifier.classify_impacting(&[event]);
        assert!(impacting.is_empty());
    }

    #[test]
    fn test_flag_zero_overrides_never_impacting() {
        // flag = 0 força a contagem mesmo com causa listada
        let classifier = create_classifier();
        let mut event = create_test_event(MachineStatus::Stopped, Some("Sem Produção"), 40.0);
        event.affects_efficiency_flag = Some(0);

        let impacting = classifier.classify_impacting(&[event]);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 40.0);

        let non_impacting = classifier.classify_non_impacting(&[create_test_event(
            MachineStatus::Stopped,
            Some("Sem Produção"),
            40.0,
        )]);
        assert_eq!(non_impacting.len(), 1);
    }

    // ==========================================
    // Teste 4: eventos RUNNING e sem taxonomia
    // ==========================================

    #[test]
    fn test_running_dropped_from_both() {
        let classifier = create_classifier();
        let events = vec![create_test_event(
            MachineStatus::Running,
            Some("Refeição"),
            60.0,
        )];

        assert!(classifier.classify_impacting(&events).is_empty());
        assert!(classifier.classify_non_impacting(&events).is_empty());
    }

    #[test]
    fn test_no_taxonomy_fully_impacting() {
        let classifier = create_classifier();
        let events = vec![create_test_event(MachineStatus::Stopped, None, 33.0)];

        let impacting = classifier.classify_impacting(&events);
        assert_eq!(impacting.len(), 1);
        assert_eq!(impacting[0].duration_minutes(), 33.0);

        assert!(classifier.classify_non_impacting(&events).is_empty());
    }

    // ==========================================
    // Teste 5: semântica de união em duas listas
    // ==========================================

    #[test]
    fn test_union_event_in_both_passes_appears_twice() {
        // causa nunca-impactante + motivo com tolerância: duas entradas
        let classifier = create_classifier();
        let mut event = create_test_event(MachineStatus::Stopped, Some("Sem Produção"), 40.0);
        event.reason = Some("Refeição".to_string());

        let non_impacting = classifier.classify_non_impacting(&[event]);
        assert_eq!(non_impacting.len(), 2);
        assert_eq!(non_impacting[0].duration_minutes(), 65.0); // passada (a), desconto
        assert_eq!(non_impacting[1].duration_minutes(), 40.0); // passada (b), original
    }

    #[test]
    fn test_classifier_is_idempotent() {
        let classifier = create_classifier();
        let events = vec![
            create_test_event(MachineStatus::Stopped, Some("Refeição"), 70.0),
            create_test_event(MachineStatus::Stopped, Some("Sem Produção"), 40.0),
            create_test_event(MachineStatus::Running, None, 120.0),
        ];

        let first = classifier.classify_impacting(&events);
        let second = classifier.classify_impacting(&events);
        assert_eq!(first, second);
    }
}
