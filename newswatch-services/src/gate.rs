//! Cooldown and duplicate-signature suppression

use crate::state_store::EngineState;

/// Outcome of the emission gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Emit,
    /// The ticker alerted less than a cooldown ago
    TickerCooldown { remaining_secs: i64 },
    /// The same set of top headlines was already sent less than a cooldown ago
    DuplicateSignature { remaining_secs: i64 },
}

impl GateDecision {
    pub fn is_emit(&self) -> bool {
        matches!(self, GateDecision::Emit)
    }
}

/// Decide whether an alert for `ticker` with `signature` may be sent at `now`.
///
/// Read-only; the caller records the alert once delivery succeeds.
pub fn check_gates(
    state: &EngineState,
    ticker: &str,
    signature: &str,
    now: i64,
    cooldown_secs: i64,
) -> GateDecision {
    if let Some(&last) = state.last_alert.get(ticker) {
        let elapsed = now - last;
        if elapsed < cooldown_secs {
            return GateDecision::TickerCooldown {
                remaining_secs: cooldown_secs - elapsed,
            };
        }
    }

    if let Some(&sent) = state.sent_ids.get(signature) {
        let elapsed = now - sent;
        if elapsed < cooldown_secs {
            return GateDecision::DuplicateSignature {
                remaining_secs: cooldown_secs - elapsed,
            };
        }
    }

    GateDecision::Emit
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: i64 = 7200;

    #[test]
    fn test_fresh_state_emits() {
        let state = EngineState::default();
        assert_eq!(check_gates(&state, "NVDA", "sig", 1000, COOLDOWN), GateDecision::Emit);
    }

    #[test]
    fn test_ticker_cooldown_boundary() {
        let mut state = EngineState::default();
        state.last_alert.insert("NVDA".to_string(), 10_000);

        assert_eq!(
            check_gates(&state, "NVDA", "other", 10_000 + COOLDOWN - 1, COOLDOWN),
            GateDecision::TickerCooldown { remaining_secs: 1 }
        );
        assert!(check_gates(&state, "NVDA", "other", 10_000 + COOLDOWN, COOLDOWN).is_emit());
        // Other tickers are unaffected
        assert!(check_gates(&state, "AAPL", "other", 10_001, COOLDOWN).is_emit());
    }

    #[test]
    fn test_duplicate_signature_across_tickers() {
        let mut state = EngineState::default();
        state.sent_ids.insert("sig".to_string(), 5_000);

        assert_eq!(
            check_gates(&state, "AAPL", "sig", 5_010, COOLDOWN),
            GateDecision::DuplicateSignature {
                remaining_secs: COOLDOWN - 10
            }
        );
        assert!(check_gates(&state, "AAPL", "sig", 5_000 + COOLDOWN, COOLDOWN).is_emit());
        assert!(check_gates(&state, "AAPL", "new-sig", 5_010, COOLDOWN).is_emit());
    }

    #[test]
    fn test_ticker_cooldown_checked_first() {
        let mut state = EngineState::default();
        state.record_alert("TSLA", "sig", 1_000);
        assert!(matches!(
            check_gates(&state, "TSLA", "sig", 1_500, COOLDOWN),
            GateDecision::TickerCooldown { .. }
        ));
    }
}
