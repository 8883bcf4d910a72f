// =============================================================================
// SISTEMA DE LOGS - ZERO OVERHEAD
// =============================================================================
//
// Macros de log internos da biblioteca, com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - Encaminha para a fachada `log`; o host decide o destino (serial,
//   RTT, stdout...) instalando o logger que quiser
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Falhas reportadas ao caller (alocação, capacidade)
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal (criação do registry)
// - DEBUG: Registro de timers
// - TRACE: Detalhes extremos (start, stop, cada disparo)
//
// FEATURES:
// - no_logs:   Remove 100% dos logs (custo zero no binário)
// - log_info:  Apenas ERROR, WARN, INFO
// - log_debug: ERROR, WARN, INFO, DEBUG
// - log_trace: Todos os níveis (padrão)
//
// =============================================================================

#[cfg(not(feature = "no_logs"))]
macro_rules! kerror {
    ($($t:tt)*) => { ::log::error!($($t)*) };
}

#[cfg(feature = "no_logs")]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
macro_rules! kwarn {
    ($($t:tt)*) => { ::log::warn!($($t)*) };
}

#[cfg(feature = "no_logs")]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
macro_rules! kinfo {
    ($($t:tt)*) => { ::log::info!($($t)*) };
}

#[cfg(feature = "no_logs")]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

#[cfg(any(feature = "log_debug", feature = "log_trace"))]
macro_rules! kdebug {
    ($($t:tt)*) => { ::log::debug!($($t)*) };
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

#[cfg(feature = "log_trace")]
macro_rules! ktrace {
    ($($t:tt)*) => { ::log::trace!($($t)*) };
}

#[cfg(not(feature = "log_trace"))]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

pub(crate) use {kdebug, kerror, kinfo, ktrace, kwarn};
