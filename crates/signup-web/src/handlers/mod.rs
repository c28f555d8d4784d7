pub mod calendar;
pub mod names;

use serde::Serialize;
use signup_core::{DateKey, NameRegistry};

/// Body of every successful mutation response.
#[derive(Debug, Serialize)]
pub struct Success {
  pub success: bool,
}

impl Success {
  pub(crate) const OK: Self = Self { success: true };
}

/// Log every sign-up from today onward, one event per date.
///
/// Purely diagnostic: failures are logged and otherwise ignored.
pub(crate) async fn log_state<R: NameRegistry>(registry: &R) {
  if !tracing::enabled!(tracing::Level::DEBUG) {
    return;
  }
  let Some(yesterday) = DateKey::today().pred() else { return };

  match registry.snapshot(yesterday).await {
    Ok(state) => {
      tracing::debug!(dates = state.len(), "current state");
      for (date, names) in &state {
        tracing::debug!(%date, ?names, "sign-ups");
      }
    }
    Err(e) => tracing::warn!(error = %e, "failed to read state snapshot"),
  }
}
