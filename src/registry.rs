//! Arquivo: registry.rs
//!
//! Propósito: Registry de timers — coleção limitada de slots servida
//! por polling. O host é dono do registry e o passa por referência a
//! todas as operações; não existe estado global.
//!
//! Detalhes de Implementação:
//! - Arena de slots com handles estáveis (`TimerHandle`): o registry é
//!   dono dos registros, eliminando referências penduradas do caller.
//! - Ordem de registro define apenas a ordem de iteração do poll; não
//!   há semântica de prioridade.
//! - Armazenamento escolhido em build-time: Vec crescível (feature
//!   `alloc`, com cap rígido) ou array fixo sem alocação. Comportamento
//!   externo idêntico, exceto a classe de falha de alocação.
//! - Handles inválidos: mutações são no-op, consultas retornam default.
//!   Nunca fatal.
//!
//! Registrar o mesmo callback/estado duas vezes produz dois slots
//! independentes (e disparos duplicados) — responsabilidade do caller,
//! não validado.

use crate::clock::TickSource;
use crate::error::TimerError;
use crate::logging::{kdebug, kinfo, ktrace, kwarn};

#[cfg(feature = "alloc")]
use crate::logging::kerror;
use crate::timer::{TimerCallback, TimerKind, TimerSlot};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Número máximo de timers registrados simultaneamente.
pub const MAX_TIMERS: usize = 30;

/// Handle estável para um timer registrado.
///
/// Identifica o slot dentro do registry que o emitiu. Handles nunca são
/// invalidados (não há desregistro); um handle de outro registry apenas
/// produz no-ops/defaults se o índice não existir lá.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(pub(crate) usize);

impl TimerHandle {
    /// Índice do slot na ordem de registro.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Registry de timers dirigido pelo poll do host.
pub struct TimerRegistry<C: TickSource> {
    clock: C,
    #[cfg(feature = "alloc")]
    slots: Vec<TimerSlot>,
    #[cfg(not(feature = "alloc"))]
    slots: [Option<TimerSlot>; MAX_TIMERS],
    #[cfg(not(feature = "alloc"))]
    len: usize,
}

#[cfg(not(feature = "alloc"))]
const EMPTY_SLOT: Option<TimerSlot> = None;

impl<C: TickSource> TimerRegistry<C> {
    /// Cria um registry vazio sobre a fonte de ticks dada.
    #[cfg(feature = "alloc")]
    pub fn new(clock: C) -> Self {
        kinfo!("(Timer) Registry criado (alloc, cap={})", MAX_TIMERS);
        Self {
            clock,
            slots: Vec::new(),
        }
    }

    /// Cria um registry vazio sobre a fonte de ticks dada.
    #[cfg(not(feature = "alloc"))]
    pub fn new(clock: C) -> Self {
        kinfo!("(Timer) Registry criado (array fixo, cap={})", MAX_TIMERS);
        Self {
            clock,
            slots: [EMPTY_SLOT; MAX_TIMERS],
            len: 0,
        }
    }

    /// Fonte de ticks usada por este registry.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ticks normalizados (ms) atuais da fonte.
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Quantidade de timers registrados.
    #[cfg(feature = "alloc")]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Quantidade de timers registrados.
    #[cfg(not(feature = "alloc"))]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacidade máxima configurada.
    pub fn capacity(&self) -> usize {
        MAX_TIMERS
    }

    #[cfg(feature = "alloc")]
    fn slot(&self, index: usize) -> Option<&TimerSlot> {
        self.slots.get(index)
    }

    #[cfg(not(feature = "alloc"))]
    fn slot(&self, index: usize) -> Option<&TimerSlot> {
        self.slots.get(index)?.as_ref()
    }

    #[cfg(feature = "alloc")]
    fn slot_mut(&mut self, index: usize) -> Option<&mut TimerSlot> {
        self.slots.get_mut(index)
    }

    #[cfg(not(feature = "alloc"))]
    fn slot_mut(&mut self, index: usize) -> Option<&mut TimerSlot> {
        self.slots.get_mut(index)?.as_mut()
    }

    #[cfg(feature = "alloc")]
    fn push(&mut self, slot: TimerSlot) -> Result<TimerHandle, TimerError> {
        if self.slots.len() >= MAX_TIMERS {
            kwarn!("(Timer) registro recusado: capacidade esgotada");
            return Err(TimerError::CapacityExceeded);
        }
        if self.slots.try_reserve(1).is_err() {
            kerror!("(Timer) registro recusado: falha de alocação");
            return Err(TimerError::AllocationFailed);
        }
        self.slots.push(slot);
        Ok(TimerHandle(self.slots.len() - 1))
    }

    #[cfg(not(feature = "alloc"))]
    fn push(&mut self, slot: TimerSlot) -> Result<TimerHandle, TimerError> {
        if self.len >= MAX_TIMERS {
            kwarn!("(Timer) registro recusado: capacidade esgotada");
            return Err(TimerError::CapacityExceeded);
        }
        let index = self.len;
        self.slots[index] = Some(slot);
        self.len += 1;
        Ok(TimerHandle(index))
    }

    /// Registra um novo timer SingleShot ou Periodic.
    ///
    /// O timer nasce parado, fase 0, com deadline inicial `now + timeout`.
    /// O callback é opcional (None = nada a fazer na expiração) e recebe
    /// sempre 0 para estes tipos.
    ///
    /// DualState exige os dois limiares e deve passar por
    /// [`register_dual`](Self::register_dual); pedido aqui, vira
    /// SingleShot.
    pub fn register(
        &mut self,
        kind: TimerKind,
        timeout: u64,
        callback: Option<TimerCallback>,
    ) -> Result<TimerHandle, TimerError> {
        let kind = match kind {
            TimerKind::DualState => {
                kwarn!("(Timer) register: DualState sem segundo limiar, tratado como SingleShot");
                TimerKind::SingleShot
            }
            other => other,
        };
        let now = self.clock.now();
        let handle = self.push(TimerSlot::new(kind, timeout, 0, callback, now))?;
        kdebug!(
            "(Timer) registrado: slot={} kind={:?} timeout={}",
            handle.0,
            kind,
            timeout
        );
        Ok(handle)
    }

    /// Registra um novo timer DualState com os dois timeouts.
    ///
    /// O callback recebe 0 quando o primeiro timeout completa e 1 quando
    /// o segundo completa, alternando indefinidamente.
    pub fn register_dual(
        &mut self,
        timeout: u64,
        timeout2: u64,
        callback: Option<TimerCallback>,
    ) -> Result<TimerHandle, TimerError> {
        let now = self.clock.now();
        let handle = self.push(TimerSlot::new(
            TimerKind::DualState,
            timeout,
            timeout2,
            callback,
            now,
        ))?;
        kdebug!(
            "(Timer) registrado: slot={} kind=DualState timeouts=({}, {})",
            handle.0,
            timeout,
            timeout2
        );
        Ok(handle)
    }

    /// Inicia o timer: fase volta a 0 e o deadline é rearmado de agora.
    pub fn start(&mut self, handle: TimerHandle) {
        let now = self.clock.now();
        if let Some(slot) = self.slot_mut(handle.0) {
            slot.start(now);
            ktrace!("(Timer) start: slot={}", handle.0);
        }
    }

    /// Para o timer. Fase e deadline ficam intocados; um `start`
    /// posterior sempre recomeça da fase 0.
    pub fn stop(&mut self, handle: TimerHandle) {
        if let Some(slot) = self.slot_mut(handle.0) {
            slot.stop();
            ktrace!("(Timer) stop: slot={}", handle.0);
        }
    }

    /// O timer está rodando? (false para handle inválido)
    pub fn is_running(&self, handle: TimerHandle) -> bool {
        match self.slot(handle.0) {
            Some(slot) => slot.is_running(),
            None => false,
        }
    }

    /// Primeiro timeout configurado (0 para handle inválido).
    pub fn timeout(&self, handle: TimerHandle) -> u64 {
        match self.slot(handle.0) {
            Some(slot) => slot.timeout,
            None => 0,
        }
    }

    /// Segundo timeout configurado (0 para handle inválido).
    pub fn timeout2(&self, handle: TimerHandle) -> u64 {
        match self.slot(handle.0) {
            Some(slot) => slot.timeout2,
            None => 0,
        }
    }

    /// Quantos ticks normalizados faltam até a próxima expiração.
    /// Retorna 0 se o deadline já passou ou o handle é inválido.
    pub fn next_timeout(&self, handle: TimerHandle) -> u64 {
        let now = self.clock.now();
        match self.slot(handle.0) {
            Some(slot) => {
                let remaining = slot.deadline.wrapping_sub(now) as i64;
                if remaining > 0 {
                    remaining as u64
                } else {
                    0
                }
            }
            None => 0,
        }
    }

    /// Atualiza o timeout e rearma o deadline imediatamente, rodando
    /// ou não.
    pub fn set_timeout(&mut self, handle: TimerHandle, timeout: u64) {
        let now = self.clock.now();
        if let Some(slot) = self.slot_mut(handle.0) {
            slot.set_timeout(now, timeout);
            ktrace!("(Timer) set_timeout: slot={} timeout={}", handle.0, timeout);
        }
    }

    /// Atualiza os dois timeouts de um timer DualState: força a fase de
    /// volta a 0 e rearma a partir do primeiro limiar.
    pub fn set_timeout_dual(&mut self, handle: TimerHandle, timeout: u64, timeout2: u64) {
        let now = self.clock.now();
        if let Some(slot) = self.slot_mut(handle.0) {
            slot.set_timeout_dual(now, timeout, timeout2);
            ktrace!(
                "(Timer) set_timeout_dual: slot={} timeouts=({}, {})",
                handle.0,
                timeout,
                timeout2
            );
        }
    }

    /// Verifica um único timer, executando a transição e o callback se
    /// ele expirou. Retorna true se o timer disparou.
    ///
    /// Útil para monitorar um timer específico sem servir o registry
    /// inteiro.
    pub fn check(&mut self, handle: TimerHandle) -> bool {
        let now = self.clock.now();
        match self.slot_mut(handle.0) {
            Some(slot) => slot.check(now),
            None => false,
        }
    }

    /// Serve todos os timers na ordem de registro.
    ///
    /// Sem saída antecipada, sem reordenação, nunca bloqueia. Seguro de
    /// chamar em loop apertado sem intervalo mínimo. Cada timer lê o
    /// clock no momento do seu check, então callbacks demorados não
    /// atrasam a detecção de expiração dos timers seguintes.
    pub fn service_all(&mut self) {
        for index in 0..self.len() {
            let now = self.clock.now();
            if let Some(slot) = self.slot_mut(index) {
                slot.check(now);
            }
        }
    }
}
