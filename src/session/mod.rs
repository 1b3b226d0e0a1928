//! Analysis session: the Idle → Loading → Success | Error state machine
//!
//! [`AnalysisSession`] is the single owner of the search text, the selected
//! province and the [`SessionState`]. It is driven by one event loop (see
//! `crate::repl`) and never shared.

mod controller;
mod state;

pub use controller::{AnalysisCompletion, AnalysisSession, AnalysisTicket};
pub use state::{SessionPhase, SessionState, ANALYSIS_FAILED_MESSAGE};
