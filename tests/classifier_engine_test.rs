// ==========================================
// EventClassifier - testes de integração
// ==========================================
// Objetivo: validar as propriedades contratuais da classificação
// de paradas impactantes e não impactantes
// ==========================================


use gestao_turnos_engine::config::{AllowanceRule, ClassificationProfile};
use gestao_turnos_engine::engine::EventClassifier;
use std::sync::Arc;
use test_helpers::EventBuilder;

fn classifier_with_defaults() -> EventClassifier {
    EventClassifier::new(Arc::new(ClassificationProfile::default()))
}

// ==========================================
// Propriedade: parada coberta pela tolerância
// ==========================================

#[test]
fn test_fully_covered_stop_absent_from_impacting() {
    // duração <= desconto: ausente do impactante, presente no
    // não impactante com a duração do desconto
    let classifier = classifier_with_defaults();
    let events = vec![EventBuilder::stopped(40.0).cause("Refeição").build()];

    assert!(classifier.classify_impacting(&events).is_empty());

    let non_impacting = classifier.classify_non_impacting(&events);
    assert_eq!(non_impacting.len(), 1);
    assert_eq!(non_impacting[0].duration_minutes(), 65.0);
}

#[test]
fn test_partially_covered_stop_split_between_views() {
    // duração > desconto: impactante com (duração - desconto),
    // não impactante com exatamente o desconto
    let classifier = classifier_with_defaults();
    let events = vec![EventBuilder::stopped(70.0).cause("Refeição").build()];

    let impacting = classifier.classify_impacting(&events);
    assert_eq!(impacting.len(), 1);
    assert_eq!(impacting[0].duration_minutes(), 5.0);

    let non_impacting = classifier.classify_non_impacting(&events);
    assert_eq!(non_impacting.len(), 1);
    assert_eq!(non_impacting[0].duration_minutes(), 65.0);
}

// ==========================================
// Propriedade: conjunto nunca-impactante
// ==========================================

#[test]
fn test_never_impacting_full_duration_in_non_impacting() {
    let classifier = classifier_with_defaults();
    let events = vec![EventBuilder::stopped(40.0).cause("Sem Produção").build()];

    assert!(classifier.classify_impacting(&events).is_empty());

    let non_impacting = classifier.classify_non_impacting(&events);
    assert_eq!(non_impacting.len(), 1);
    assert_eq!(non_impacting[0].duration_minutes(), 40.0);
}

#[test]
fn test_never_impacting_matches_any_taxonomy_field() {
    let classifier = classifier_with_defaults();
    let by_reason = vec![EventBuilder::stopped(30.0).reason("Parada Programada").build()];
    let by_problem = vec![EventBuilder::stopped(30.0).problem("Feriado nacional").build()];

    assert!(classifier.classify_impacting(&by_reason).is_empty());
    assert!(classifier.classify_impacting(&by_problem).is_empty());
}

// ==========================================
// Propriedade: janela derivada e precedência de campos
// ==========================================

#[test]
fn test_duration_derived_from_window_when_raw_absent() {
    let classifier = classifier_with_defaults();
    let events = vec![EventBuilder::stopped(0.0)
        .window(10, 35)
        .cause("Quebra Mecânica")
        .build()];

    let impacting = classifier.classify_impacting(&events);
    assert_eq!(impacting.len(), 1);
    assert_eq!(impacting[0].duration_minutes(), 25.0);
}

#[test]
fn test_allowance_scan_prefers_reason_over_problem() {
    // perfil customizado com rótulos sobrepostos: a varredura
    // motivo -> causa -> problema decide qual desconto vale
    let mut profile = ClassificationProfile::default();
    profile.allowances = vec![
        AllowanceRule::new("Troca", 10.0),
        AllowanceRule::new("Troca de Sabor", 30.0),
    ];
    let classifier = EventClassifier::new(Arc::new(profile));

    let events = vec![EventBuilder::stopped(50.0)
        .reason("Troca de Sabor")
        .build()];

    // "Troca" vem primeiro na lista ordenada -> desconto 10, não 30
    let impacting = classifier.classify_impacting(&events);
    assert_eq!(impacting.len(), 1);
    assert_eq!(impacting[0].duration_minutes(), 40.0);
}

// ==========================================
// Propriedade: perfis substituíveis em teste
// ==========================================

#[test]
fn test_fixture_profile_replaces_production_table() {
    let mut profile = ClassificationProfile::default();
    profile.allowances = vec![AllowanceRule::new("Limpeza", 15.0)];
    profile.never_impacting = vec!["Teste de Linha".to_string()];
    let classifier = EventClassifier::new(Arc::new(profile));

    let events = vec![
        EventBuilder::stopped(20.0).cause("Limpeza").build(),
        EventBuilder::stopped(50.0).cause("Teste de Linha").build(),
        EventBuilder::stopped(70.0).cause("Refeição").build(), // sem regra no fixture
    ];

    let impacting = classifier.classify_impacting(&events);
    assert_eq!(impacting.len(), 2);
    assert_eq!(impacting[0].duration_minutes(), 5.0);  // 20 - 15
    assert_eq!(impacting[1].duration_minutes(), 70.0); // Refeição intacta
}

// ==========================================
// Propriedade: entrada original intacta
// ==========================================

#[test]
fn test_input_batch_not_mutated() {
    let classifier = classifier_with_defaults();
    let events = vec![EventBuilder::stopped(70.0).cause("Refeição").build()];
    let snapshot = events.clone();

    let _ = classifier.classify_impacting(&events);
    let _ = classifier.classify_non_impacting(&events);

    assert_eq!(events, snapshot);
}
