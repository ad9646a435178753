//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers live inside the phase that owns them
//! - No rendering or platform dependencies

pub mod arc;
pub mod catch;
pub mod celebration;
pub mod drive;
pub mod proposal;
pub mod reaction;
pub mod scratch;
pub mod screen;
pub mod shield;
pub mod stage;
pub mod timer;

pub use arc::ArcBand;
pub use catch::{Catch, CatchPhase, FallingItem};
pub use celebration::{Burst, Celebrate, Confetti, FireworksShow, Particle};
pub use drive::{Drive, DrivePhase, Notice, TRIP_LENGTH};
pub use proposal::{Proposal, ProposalPhase};
pub use reaction::{FailReason, Reaction, ReactionPhase};
pub use scratch::{ScratchCard, ScratchPhase};
pub use screen::{ActiveScreen, ScreenInput};
pub use shield::{Enemy, Shield, ShieldEvent, ShieldPhase};
pub use stage::{DEFAULT_CARD_SIZE, Stage};
pub use timer::{Countdown, Interval};
