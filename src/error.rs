//! Códigos de erro da biblioteca.
//!
//! Taxonomia mínima e local, nunca propagada como pânico: toda falha é
//! imediatamente visível ao caller via `Result`. Operações sobre handles
//! inválidos nem chegam aqui — degradam para no-op ou valor default.

use core::fmt;

/// Erros reportados pelo registro de timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Registro além de `MAX_TIMERS`. Sem fila, sem descarte silencioso.
    CapacityExceeded,
    /// Crescimento do armazenamento dinâmico falhou (apenas builds com
    /// `alloc`; o build de array fixo não exibe esta classe).
    AllocationFailed,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::CapacityExceeded => write!(f, "timer registry at capacity"),
            TimerError::AllocationFailed => write!(f, "timer registry allocation failed"),
        }
    }
}
