// ==========================================
// Inicialização do sistema de logs
// ==========================================
// Usa tracing e tracing-subscriber
// Nível de log configurável por variável de ambiente
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o sistema de logs
///
/// # Variáveis de ambiente
/// - RUST_LOG: filtro de nível de log (padrão: info)
///   Exemplo: RUST_LOG=debug ou RUST_LOG=gestao_turnos_engine=trace
///
/// # Exemplo
/// ```no_run
/// use gestao_turnos_engine::logging;
/// logging::init();
/// ```
pub fn init() {
    // Lê o nível de log do ambiente, padrão info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Configura o formato dos logs
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inicializa o sistema de logs para ambiente de testes
///
/// Usa nível mais detalhado para facilitar a depuração
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
