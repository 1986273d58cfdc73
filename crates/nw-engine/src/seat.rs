//! Seat bookkeeping.

use serde::{Deserialize, Serialize};

use crate::role::{Camp, RoleId};

/// A seat number, 1-based and contiguous across the table.
pub type SeatNo = u32;

/// Situational flags a resolver can pin to a seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMarks {
    /// Guard protection (unused by the base role set).
    #[serde(default)]
    pub guarded: bool,
    /// The seat died to the witch's poison.
    #[serde(default)]
    pub poisoned: bool,
    /// Linked lover seat (unused by the base role set).
    #[serde(default)]
    pub lover: Option<SeatNo>,
}

/// One seat at the table.
///
/// Role and camp stay empty until the deal; `alive` and `marks` are mutated
/// only by the resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat number, 1..=N.
    pub seat_no: SeatNo,
    /// Player name, editable during setup.
    pub name: String,
    /// Dealt role, set exactly once per session.
    pub role: Option<RoleId>,
    /// Camp of the dealt role.
    pub camp: Option<Camp>,
    /// Whether the seat is still alive.
    pub alive: bool,
    /// Whether the seat's role card has been shown.
    pub revealed: bool,
    /// Situational flags.
    pub marks: SeatMarks,
}

impl Seat {
    /// Create an empty, living seat.
    pub fn new(seat_no: SeatNo) -> Self {
        Self {
            seat_no,
            name: String::new(),
            role: None,
            camp: None,
            alive: true,
            revealed: false,
            marks: SeatMarks::default(),
        }
    }
}

/// Create `count` empty seats numbered 1..=count.
pub fn create_seats(count: u32) -> Vec<Seat> {
    (1..=count).map(Seat::new).collect()
}
