// ==========================================
// Sistema de Gestão de Turnos - Camada de Configuração
// ==========================================
// Responsabilidade: perfil de classificação injetado nos motores
// Armazenamento: constantes de produção em Default, override por JSON
// ==========================================

pub mod classification_profile;
pub mod error;

// Reexporta o núcleo da configuração
pub use classification_profile::{AllowanceRule, ClassificationProfile};
pub use error::ProfileError;
