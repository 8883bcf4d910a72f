//! Arquivo: clock.rs
//!
//! Propósito: Adaptador de Clock (fonte monotônica de ticks).
//! Normaliza o contador da plataforma para a resolução fixa do módulo
//! (milissegundos). É a ÚNICA dependência de tempo de todos os cálculos
//! de timer desta biblioteca.
//!
//! Detalhes de Implementação:
//! - `TickSource` abstrai o contador bruto do hardware (frequência livre).
//! - `now()` converte para ticks normalizados (ms) via RESOLUTION.
//! - Comparações de deadline usam subtração com wrapping e interpretação
//!   com sinal, tolerantes a wraparound do contador normalizado (u64).
//!
//! # Wraparound
//! O contador normalizado tem 64 bits: a 1 kHz ele dá a volta após
//! ~584 milhões de anos. Contadores de hardware mais estreitos (ex: 32
//! bits) devem ser estendidos por software antes de chegar aqui — é o
//! que `AtomicTickSource` faz quando o ISR do host incrementa um
//! `AtomicU64` por tick.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, Ordering};

use volatile::VolatilePtr;

/// Resolução do módulo: ticks normalizados por segundo (1 kHz = 1 ms).
pub const RESOLUTION: u64 = 1000;

/// Fonte monotônica de ticks.
///
/// Implementações devem garantir que `raw_ticks()` seja não-decrescente
/// dentro da largura do contador. Função pura: sem efeitos colaterais,
/// sem modos de falha.
pub trait TickSource {
    /// Valor bruto do contador da plataforma.
    fn raw_ticks(&self) -> u64;

    /// Frequência do contador bruto, em ticks por segundo.
    /// Deve ser >= 1.
    fn ticks_per_second(&self) -> u64;

    /// Ticks normalizados para RESOLUTION (milissegundos).
    fn now(&self) -> u64 {
        let tps = self.ticks_per_second().max(1);
        if tps >= RESOLUTION {
            self.raw_ticks() / (tps / RESOLUTION)
        } else {
            // Contador mais lento que 1 kHz (ex: jiffies a 100 Hz)
            self.raw_ticks() * (RESOLUTION / tps)
        }
    }
}

/// Compara `now` contra `deadline` tolerando wraparound.
///
/// Em vez de `now >= deadline`, usa a diferença com sinal: o deadline é
/// considerado atingido quando `now - deadline` (mod 2^64) é não-negativo.
/// Válido enquanto os dois instantes estiverem a menos de meio período
/// de wrap um do outro.
#[inline]
pub fn deadline_reached(now: u64, deadline: u64) -> bool {
    now.wrapping_sub(deadline) as i64 >= 0
}

/// Fonte de ticks baseada em contador atômico.
///
/// O padrão clássico de timer embarcado: o handler de interrupção do
/// host incrementa um `AtomicU64` global a cada tick do hardware e o
/// loop principal só lê. Ex:
///
/// ```ignore
/// static TICKS: AtomicU64 = AtomicU64::new(0);
/// static CLOCK: AtomicTickSource = AtomicTickSource::new(&TICKS, 1000);
///
/// // No ISR do timer:
/// CLOCK.tick();
/// ```
pub struct AtomicTickSource {
    ticks: &'static AtomicU64,
    ticks_per_second: u64,
}

impl AtomicTickSource {
    /// Cria a fonte sobre um contador estático e sua frequência em Hz.
    pub const fn new(ticks: &'static AtomicU64, ticks_per_second: u64) -> Self {
        Self {
            ticks,
            ticks_per_second,
        }
    }

    /// Incrementa o contador. Chamar APENAS do handler de tick do host.
    #[inline]
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Tempo de atividade em segundos (aproximado).
    pub fn uptime_seconds(&self) -> u64 {
        self.raw_ticks() / self.ticks_per_second.max(1)
    }
}

impl TickSource for AtomicTickSource {
    fn raw_ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}

/// Fonte de ticks lida de um contador free-running mapeado em memória.
///
/// Para plataformas com um registrador de contagem acessível por MMIO
/// (HPET main counter, SysTick estendido, contador de SoC). A leitura é
/// volátil para impedir que o compilador a otimize ou reordene.
pub struct MmioTickSource {
    reg: NonNull<u64>,
    ticks_per_second: u64,
}

impl MmioTickSource {
    /// Cria a fonte sobre o endereço do registrador do contador.
    ///
    /// # Safety
    /// O caller deve garantir que `reg` aponta para um registrador de
    /// 64 bits válido, alinhado e legível durante toda a vida da fonte.
    pub const unsafe fn new(reg: *mut u64, ticks_per_second: u64) -> Self {
        Self {
            reg: NonNull::new_unchecked(reg),
            ticks_per_second,
        }
    }
}

impl TickSource for MmioTickSource {
    fn raw_ticks(&self) -> u64 {
        // Leitura volátil: o valor muda por fora do modelo de memória do Rust
        unsafe { VolatilePtr::new(self.reg) }.read()
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}
