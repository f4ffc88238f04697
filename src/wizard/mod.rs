//! Guided multi-step forms
//!
//! A [`WizardController`] drives an ordered list of [`StepDef`]s over shared
//! [`FormData`]. Steps unlock one at a time after a debounce, earlier steps
//! stay visible read-only, and any invalid edit rewinds the active step.
//! Time comes from an injected [`Clock`] so the whole thing can be driven
//! deterministically.

pub mod clock;
pub mod controller;
pub mod flows;
pub mod form;
pub mod step;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{StepMode, VisibleStep, WizardController};
pub use flows::{assemble_request, request_wizard, verification_wizard};
pub use form::FormData;
pub use step::{Rule, StepDef};
pub use timer::{PendingTransition, TransitionKind};
