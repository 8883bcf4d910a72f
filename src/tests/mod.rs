//! Testes da biblioteca de timers.
//!
//! Rodam no host com um clock determinístico (`FakeClock`): o teste
//! avança o tempo manualmente, sem dormir nem depender de relógio real.
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Executar todos os testes (armazenamento alloc)
//! cargo test
//!
//! # Executar a suíte do armazenamento de array fixo
//! cargo test --no-default-features
//!
//! # Executar testes de um módulo específico
//! cargo test tests::registry
//! cargo test tests::clock
//!
//! # Executar um teste específico
//! cargo test tests::registry::test_single_shot_fires_once
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `clock.rs` - Conversão de resolução, wraparound, fontes concretas
//! - `registry.rs` - Registro, máquina de estados, service_all (requer `alloc`)
//! - `registry_fixed.rs` - Registry de array fixo com callbacks fn (sem `alloc`)
//! - `wait.rs` - Busy-wait com idle hook e timer periódico simples

#![cfg(test)]

use core::cell::Cell;
use std::rc::Rc;

use crate::clock::{TickSource, RESOLUTION};


/// Clock falso compartilhável: o teste segura um clone e avança o tempo
/// enquanto o registry segura o outro.
#[derive(Clone)]
pub struct FakeClock {
    ticks: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            ticks: Rc::new(Cell::new(0)),
        }
    }

    /// Avança o tempo em `ms` ticks normalizados.
    pub fn advance(&self, ms: u64) {
        self.ticks.set(self.ticks.get().wrapping_add(ms));
    }
}

impl TickSource for FakeClock {
    fn raw_ticks(&self) -> u64 {
        self.ticks.get()
    }

    fn ticks_per_second(&self) -> u64 {
        // 1 tick bruto == 1 ms
        RESOLUTION
    }
}
