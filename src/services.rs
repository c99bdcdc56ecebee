//! Collaborator seams consumed by the battle view.
//!
//! The view core decides what happens and where things go; everything that
//! touches the platform (pixels, audio, timers, the turn engine's stat
//! bookkeeping) sits behind one of these traits, implemented by the host
//! game and by plain fakes in tests.

use crate::battlefield::UnitId;
use crate::position::ScreenPosition;

/// Destination for draw commands. The core never touches pixels itself.
pub trait RenderSurface {
    /// Blits one frame of a sprite set at a screen position.
    fn blit(&mut self, sprite_set: &str, frame: u32, position: ScreenPosition);
}

/// Gateway to the turn engine's action-cost bookkeeping.
///
/// Every cost-gated transition in the view goes through `try_spend`; the
/// view itself never tracks unit stats.
pub trait ActionBudget {
    /// Attempts to spend `amount` time units for `unit`.
    ///
    /// With `enforce` false the spend must always succeed (pre-battle
    /// equip screens); with it true the implementation decides based on
    /// the unit's remaining budget.
    fn try_spend(&mut self, unit: UnitId, amount: u32, enforce: bool) -> bool;
}

/// Receives localized message keys for user-facing warnings.
pub trait WarningSink {
    fn show(&mut self, message_key: &str);
}

/// Plays a sound from a named sound set.
pub trait SoundPlayer {
    fn play(&mut self, sound_set: &str, index: u32);
}

/// Recurring timer driving scroll ticks while edge scrolling is active.
pub trait ScrollTimer {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}
