// ==========================================
// Sistema de Gestão de Turnos - Erros de Configuração
// ==========================================
// Ferramenta: macro derive do thiserror
// Escopo: única superfície falível do crate; os motores são totais
// sobre o domínio de entrada documentado e não retornam Result
// ==========================================

use thiserror::Error;

/// Erros de carga e validação do perfil de classificação
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("falha de leitura do arquivo de perfil: {0}")]
    Io(#[from] std::io::Error),

    #[error("perfil JSON malformado: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("perfil inválido: {0}")]
    Validation(String),
}
