//! Espera bloqueante e timer periódico simples, sem registry.
//!
//! Helpers avulsos sobre o adaptador de clock: um busy-wait explícito
//! (único ponto bloqueante da biblioteca) e um timer periódico ad hoc
//! que dispensa registro.

use crate::clock::{deadline_reached, TickSource};
use crate::logging::ktrace;

/// Bloqueia por `ms` ticks normalizados (busy-wait).
pub fn block_for(clock: &impl TickSource, ms: u64) {
    block_for_with(clock, ms, || {});
}

/// Bloqueia por `ms` ticks normalizados, invocando `idle` a cada volta
/// do spin.
///
/// O hook serve para tarefas essenciais durante a espera (limpar
/// watchdog, I/O cooperativo). Não há cancelamento: a função só retorna
/// quando o tempo passa.
pub fn block_for_with(clock: &impl TickSource, ms: u64, mut idle: impl FnMut()) {
    let deadline = clock.now().wrapping_add(ms);
    ktrace!("(Wait) bloqueando por {} ms", ms);

    while !deadline_reached(clock.now(), deadline) {
        idle();
    }
}

/// Timer periódico reentrante de um só tick de estado.
///
/// O caller mantém a variável `last` (inicializada com `clock.now()`);
/// a função retorna true exatamente uma vez por período, resetando
/// `last` para o instante atual a cada retorno true. Pensado para ser
/// chamado em polling num if:
///
/// ```ignore
/// let mut last = clock.now();
/// loop {
///     if simple_periodic(&clock, &mut last, 1000) {
///         // roda uma vez por segundo
///     }
/// }
/// ```
pub fn simple_periodic(clock: &impl TickSource, last: &mut u64, period: u64) -> bool {
    if deadline_reached(clock.now(), last.wrapping_add(period)) {
        *last = clock.now();
        return true;
    }

    false
}
