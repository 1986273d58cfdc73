//! Session engine for Nachtwache, a moderator's console for live
//! social-deduction night/day games.
//!
//! The engine is a deterministic state machine over immutable snapshots: it
//! deals hidden roles onto seats, walks a fixed catalog of night and day
//! steps, resolves the night's combined actions and the day's vote, chains
//! the hunter's dying shot, evaluates win conditions, and writes everything
//! to an append-only event log. All I/O (persistence, clocks, scheduled
//! advances, narration) is injected through the [`host`] contracts, so every
//! transition is a pure function and fully replayable.

/// The action vocabulary and step payloads.
pub mod action;
/// One-time randomized role distribution.
pub mod assign;
/// Session configuration and table-size limits.
pub mod config;
/// The pure transition function.
pub mod engine;
/// Error types.
pub mod error;
/// Contracts the engine needs from its host.
pub mod host;
/// The moderator event log.
pub mod log;
/// Resolution logic for nights, days, the hunter, and the win check.
pub mod resolve;
/// Role identities and the base catalog.
pub mod role;
/// Table-rule variants.
pub mod rules;
/// Seat bookkeeping.
pub mod seat;
/// The session snapshot.
pub mod state;
/// The step catalog.
pub mod step;

/// Re-export the action types.
pub use action::{Action, StepPayload};
/// Re-export the transition entry points.
pub use engine::{apply_action, start_new_game};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export the host contracts.
pub use host::{AdvanceTimer, Narration, SessionClock, SnapshotStore, SystemClock};
/// Re-export the log types.
pub use log::{EventLog, LogEntry};
/// Re-export the core role types.
pub use role::{Camp, Role, RoleId};
/// Re-export the rule types.
pub use rules::{RuleKey, RuleSet};
/// Re-export seat types.
pub use seat::{Seat, SeatNo};
/// Re-export the session snapshot.
pub use state::SessionState;
/// Re-export the step types.
pub use step::{Phase, StepDescriptor, StepId, StepStatus};
