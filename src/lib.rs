//! SWTimer - Timers de Software Cooperativos.
//!
//! Ponto central de exportação dos módulos da biblioteca.
//! Multiplexa vários timeouts lógicos sobre uma única fonte de ticks,
//! servidos por polling a partir do loop principal do host.
//!
//! # Modelo de uso
//!
//! ```ignore
//! use swtimer::{TimerKind, TimerRegistry};
//!
//! let mut registry = TimerRegistry::new(my_tick_source);
//!
//! let blink = registry
//!     .register(TimerKind::Periodic, 500, Some(Box::new(|_| toggle_led())))
//!     .unwrap();
//! registry.start(blink);
//!
//! loop {
//!     registry.service_all();
//! }
//! ```
//!
//! Tudo é single-threaded e cooperativo: nenhuma operação bloqueia
//! (exceto o helper explícito `wait::block_for`) e nenhum lock é usado.

#![no_std]

// Vec crescível do registry (requer alocador global no host)
#[cfg(feature = "alloc")]
extern crate alloc;

// Testes rodam no host com std disponível
#[cfg(test)]
extern crate std;

// --- Fonte de Tempo ---
pub mod clock; // Adaptador de clock (TickSource, fontes Atomic/MMIO)

// --- Núcleo ---
pub mod registry; // Registry de timers (arena + handles)
pub mod timer; // Registro de timer e máquina de estados

// --- Auxiliares ---
pub mod error; // Código de erros
pub mod wait; // Busy-wait e timer periódico simples

pub(crate) mod logging; // Macros de log zero-overhead

mod tests;

// Re-exportar os tipos principais para acesso fácil no host
pub use crate::clock::{TickSource, RESOLUTION};
pub use crate::error::TimerError;
pub use crate::registry::{TimerHandle, TimerRegistry, MAX_TIMERS};
pub use crate::timer::{TimerCallback, TimerKind};
