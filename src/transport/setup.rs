//! Setup handshake run after opening the port.
//!
//! The transceiver must be reset, left to settle, asked for its status and
//! then given its operating mode:
//! ```text
//! Idle -> Resetting -> AwaitingSettle -> QueryingStatus -> ConfiguringMode -> Ready
//!         write reset  sleep settle      write status      sleep delay       write mode
//! ```
//! The status query must follow the reset by at least 50 ms and at most
//! 10 s, so the settle delay is bounded on both sides.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::{MODE_PACKET, RESET_PACKET, STATUS_PACKET};

/// Shortest allowed settle delay after a reset.
pub const MIN_RESET_SETTLE: Duration = Duration::from_millis(50);

/// Longest allowed settle delay after a reset.
pub const MAX_RESET_SETTLE: Duration = Duration::from_millis(9000);

/// Default settle delay after a reset.
pub const DEFAULT_RESET_SETTLE: Duration = Duration::from_millis(100);

/// Default delay between the status query and the mode command.
pub const DEFAULT_MODE_DELAY: Duration = Duration::from_millis(100);

/// Delays used by the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupTiming {
    /// Delay after the reset before the status query.
    pub reset_settle: Duration,
    /// Delay between the status query and the mode command.
    pub mode_delay: Duration,
}

impl Default for SetupTiming {
    fn default() -> Self {
        Self {
            reset_settle: DEFAULT_RESET_SETTLE,
            mode_delay: DEFAULT_MODE_DELAY,
        }
    }
}

impl SetupTiming {
    /// Checks the settle delay lies within the transceiver's window.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `reset_settle` is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESET_SETTLE..=MAX_RESET_SETTLE).contains(&self.reset_settle) {
            return Err(Error::Config {
                reason: format!(
                    "reset settle delay {:?} outside {:?}..={:?}",
                    self.reset_settle, MIN_RESET_SETTLE, MAX_RESET_SETTLE
                ),
            });
        }
        Ok(())
    }
}

/// Handshake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Idle,
    Resetting,
    AwaitingSettle,
    QueryingStatus,
    ConfiguringMode,
    Ready,
}

/// Action the caller must perform to complete a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    /// Write this frame to the transceiver.
    Write(&'static [u8]),
    /// Wait this long.
    Sleep(Duration),
}

/// Setup state machine. Drives no I/O itself.
#[derive(Debug, Clone)]
pub struct Handshake {
    state: SetupState,
    timing: SetupTiming,
}

impl Handshake {
    /// Creates a handshake in the `Idle` state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the timing is invalid.
    pub fn new(timing: SetupTiming) -> Result<Self> {
        timing.validate()?;
        Ok(Self {
            state: SetupState::Idle,
            timing,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SetupState {
        self.state
    }

    /// Returns true once the mode command has been issued.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == SetupState::Ready
    }

    /// Moves to the next state and returns the step that completes it, or
    /// `None` once ready.
    pub fn advance(&mut self) -> Option<SetupStep> {
        let (next, step) = match self.state {
            SetupState::Idle => (SetupState::Resetting, SetupStep::Write(&RESET_PACKET)),
            SetupState::Resetting => (
                SetupState::AwaitingSettle,
                SetupStep::Sleep(self.timing.reset_settle),
            ),
            SetupState::AwaitingSettle => {
                (SetupState::QueryingStatus, SetupStep::Write(&STATUS_PACKET))
            }
            SetupState::QueryingStatus => (
                SetupState::ConfiguringMode,
                SetupStep::Sleep(self.timing.mode_delay),
            ),
            SetupState::ConfiguringMode => (SetupState::Ready, SetupStep::Write(&MODE_PACKET)),
            SetupState::Ready => return None,
        };

        tracing::debug!("setup: {:?} -> {:?}", self.state, next);
        self.state = next;
        Some(step)
    }

    /// Returns to `Idle` so the handshake can run again.
    pub fn reset(&mut self) {
        self.state = SetupState::Idle;
    }
}
