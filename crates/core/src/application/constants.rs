// Application constants (no magic values in worker code)

/// Default number of productions each producer performs per run.
/// Surfaced through `RunConfig::iterations_per_worker` rather than the
/// CLI: the invocation surface stays at the four P/C/N/T parameters.
pub const DEFAULT_WORKER_ITERATIONS: u32 = 200;
