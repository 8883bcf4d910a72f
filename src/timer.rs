//! Arquivo: timer.rs
//!
//! Propósito: Registro de timer e sua máquina de estados.
//! Cada slot acompanha o tempo decorrido contra um ou dois limiares
//! configuráveis e dispara o callback do usuário na expiração.
//!
//! Detalhes de Implementação:
//! - Três tipos: SingleShot, Periodic e DualState.
//! - O deadline é SEMPRE derivado de `now + timeout ativo` (rearm);
//!   nunca é escrito diretamente pelo caller.
//! - O rearm acontece ANTES do callback rodar, em todos os tipos.
//! - Disparo edge-triggered por poll: no máximo um disparo por check,
//!   sem fila de disparos perdidos.

use bitflags::bitflags;

use crate::clock::deadline_reached;
use crate::logging::ktrace;

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

/// Tipo do timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Roda até expirar uma vez e para sozinho.
    SingleShot,
    /// Reinicia a si mesmo a cada expiração, até ser parado.
    Periodic,
    /// Alterna entre dois timeouts; o callback recebe qual fase (0/1)
    /// acabou de completar.
    DualState,
}

bitflags! {
    /// Flags de estado de um slot de timer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimerFlags: u8 {
        /// Timer em execução (start/stop).
        const ENABLED = 1 << 0;
        /// Sub-estado de timers DualState: limpo = fase 0, setado = fase 1.
        /// Sempre limpo para os demais tipos.
        const PHASE = 1 << 1;
    }
}

/// Callback de expiração. Assinatura unificada para todos os tipos:
/// recebe a fase (0/1) que completou; tipos não-duais passam sempre 0.
#[cfg(feature = "alloc")]
pub type TimerCallback = Box<dyn FnMut(u8)>;

/// Callback de expiração (build sem alloc: ponteiro de função puro).
#[cfg(not(feature = "alloc"))]
pub type TimerCallback = fn(u8);

/// Um slot de timer, propriedade do registry.
pub(crate) struct TimerSlot {
    pub(crate) kind: TimerKind,
    pub(crate) flags: TimerFlags,
    /// Primeiro timeout, em ticks normalizados (ms). Usado por todos os tipos.
    pub(crate) timeout: u64,
    /// Segundo timeout. Usado apenas por DualState.
    pub(crate) timeout2: u64,
    /// Tick absoluto da próxima expiração.
    pub(crate) deadline: u64,
    pub(crate) callback: Option<TimerCallback>,
}

impl TimerSlot {
    pub(crate) fn new(
        kind: TimerKind,
        timeout: u64,
        timeout2: u64,
        callback: Option<TimerCallback>,
        now: u64,
    ) -> Self {
        let mut slot = Self {
            kind,
            flags: TimerFlags::empty(),
            timeout,
            timeout2,
            deadline: 0,
            callback,
        };
        slot.rearm(now);
        slot
    }

    /// Fase atual (0 ou 1).
    #[inline]
    pub(crate) fn phase(&self) -> u8 {
        if self.flags.contains(TimerFlags::PHASE) {
            1
        } else {
            0
        }
    }

    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        self.flags.contains(TimerFlags::ENABLED)
    }

    /// Recalcula o deadline a partir de `now` e do timeout da fase ativa.
    pub(crate) fn rearm(&mut self, now: u64) {
        let timeout = if self.flags.contains(TimerFlags::PHASE) {
            self.timeout2
        } else {
            self.timeout
        };
        self.deadline = now.wrapping_add(timeout);
    }

    /// Stopped -> Running. Sempre recomeça da fase 0, nunca retoma
    /// um ciclo pela metade.
    pub(crate) fn start(&mut self, now: u64) {
        self.flags.insert(TimerFlags::ENABLED);
        self.flags.remove(TimerFlags::PHASE);
        self.rearm(now);
    }

    /// Running -> Stopped. Fase e deadline ficam intocados.
    pub(crate) fn stop(&mut self) {
        self.flags.remove(TimerFlags::ENABLED);
    }

    /// Atualiza o primeiro timeout e rearma imediatamente, rodando ou não.
    /// Respeita a fase ativa no rearm.
    pub(crate) fn set_timeout(&mut self, now: u64, timeout: u64) {
        self.timeout = timeout;
        self.rearm(now);
    }

    /// Atualiza os dois timeouts e força a fase de volta a 0.
    pub(crate) fn set_timeout_dual(&mut self, now: u64, timeout: u64, timeout2: u64) {
        self.flags.remove(TimerFlags::PHASE);
        self.timeout = timeout;
        self.timeout2 = timeout2;
        self.rearm(now);
    }

    /// Verifica expiração e executa a transição de estado do tipo.
    ///
    /// No-op se parado ou se o deadline ainda não chegou. Na expiração,
    /// o callback (se houver) recebe a fase que acabou de completar e é
    /// invocado exatamente uma vez. Retorna true se o timer disparou.
    pub(crate) fn check(&mut self, now: u64) -> bool {
        if !self.is_running() || !deadline_reached(now, self.deadline) {
            return false;
        }

        let fired_phase = self.phase();

        match self.kind {
            TimerKind::SingleShot => {
                self.flags.remove(TimerFlags::ENABLED);
            }
            TimerKind::Periodic => {}
            TimerKind::DualState => {
                self.flags.toggle(TimerFlags::PHASE);
            }
        }

        // Rearm antes do callback: a fase recém-ativa define o próximo ciclo
        self.rearm(now);

        ktrace!(
            "(Timer) disparo: kind={:?} fase={} proximo_deadline={}",
            self.kind,
            fired_phase,
            self.deadline
        );

        if let Some(callback) = self.callback.as_mut() {
            callback(fired_phase);
        }

        true
    }
}
