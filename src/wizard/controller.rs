//! Per-session wizard controller
//!
//! Owns the ordered steps, the form data and a single pending transition.
//! The active step only moves forward by auto-advance, one step per debounce
//! firing, and rewinds immediately to the lowest invalid visible step on any
//! edit.

use std::time::{Duration, Instant};

use tracing::debug;

use super::clock::{Clock, ManualClock, SystemClock};
use super::form::FormData;
use super::step::StepDef;
use super::timer::{PendingTransition, TransitionKind};
use crate::error::{BuzzPayError, BuzzPayResult};

/// How a visible step is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// The step being edited
    Active,
    /// A completed earlier step, echoed back
    ReadOnly,
}

/// A step as the presentation layer sees it
#[derive(Debug, Clone, Copy)]
pub struct VisibleStep<'a> {
    pub index: usize,
    pub step: &'a StepDef,
    pub value: &'a str,
    pub mode: StepMode,
    pub valid: bool,
}

pub struct WizardController<C: Clock = SystemClock> {
    steps: Vec<StepDef>,
    form: FormData,
    current: usize,
    hidden: Vec<bool>,
    pending: PendingTransition,
    idle_timeout: Duration,
    clock: C,
}

impl<C: Clock> WizardController<C> {
    /// Create a controller over `steps`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `steps` is empty.
    pub fn new(steps: Vec<StepDef>, idle_timeout: Duration, clock: C) -> BuzzPayResult<Self> {
        if steps.is_empty() {
            return Err(BuzzPayError::InvalidArgument(
                "A wizard needs at least one step".into(),
            ));
        }

        let hidden = vec![false; steps.len()];
        let mut controller = Self {
            steps,
            form: FormData::new(),
            current: 0,
            hidden,
            pending: PendingTransition::new(),
            idle_timeout,
            clock,
        };
        controller.reconcile();
        Ok(controller)
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    /// When the next transition is due, if any
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn pending_kind(&self) -> Option<TransitionKind> {
        self.pending.kind()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Value of the step at `index` (empty if out of range)
    pub fn value(&self, index: usize) -> &str {
        self.steps
            .get(index)
            .map(|step| self.form.get(step.key))
            .unwrap_or("")
    }

    /// Store a new value for the step at `step_index`
    ///
    /// Cancels any pending transition and re-evaluates: the active step may
    /// rewind at once, and a fresh advance or idle-hide may be scheduled.
    pub fn set_field_value(&mut self, step_index: usize, value: impl Into<String>) -> BuzzPayResult<()> {
        let step = self.steps.get(step_index).ok_or_else(|| {
            BuzzPayError::InvalidArgument(format!(
                "Step index {} out of range (last is {})",
                step_index,
                self.steps.len() - 1
            ))
        })?;

        let value = value.into();
        if !value.trim().is_empty() && self.hidden[step_index] {
            debug!(step = step.key, "un-hiding step after edit");
            self.hidden[step_index] = false;
        }
        self.form.set(step.key, value);

        self.pending.cancel();
        self.reconcile();
        Ok(())
    }

    /// Raw validity of every step for the current form snapshot
    pub fn evaluate(&self) -> Vec<bool> {
        self.steps
            .iter()
            .map(|step| step.is_valid(self.form.get(step.key)))
            .collect()
    }

    fn step_valid(&self, index: usize) -> bool {
        let step = &self.steps[index];
        step.is_valid(self.form.get(step.key))
    }

    /// Fire the pending transition if it is due
    ///
    /// At most one transition fires per call. Returns the one that fired.
    pub fn tick(&mut self) -> Option<TransitionKind> {
        let now = self.clock.now();
        let kind = self.pending.take_due(now)?;

        match kind {
            TransitionKind::Advance => {
                if self.current < self.last_index() && self.step_valid(self.current) {
                    self.current += 1;
                    debug!(current_step = self.current, "advanced wizard");
                }
            }
            TransitionKind::HideIdle => {
                let last = self.last_index();
                if self.current == last && self.form.is_blank(self.steps[last].key) {
                    self.hidden[last] = true;
                    debug!(step = self.steps[last].key, "hid idle step");
                }
            }
        }

        self.reconcile();
        Some(kind)
    }

    /// Rewind to the lowest invalid visible step, or schedule the next move
    fn reconcile(&mut self) {
        let now = self.clock.now();

        let invalid = (0..=self.current).find(|&i| !self.hidden[i] && !self.step_valid(i));

        match invalid {
            Some(index) => {
                if index != self.current {
                    debug!(from = self.current, to = index, "rewound wizard");
                }
                self.current = index;

                let last = self.last_index();
                let step = &self.steps[index];
                if index == last && step.hide_when_idle && self.form.is_blank(step.key) {
                    self.pending
                        .schedule(now + self.idle_timeout, TransitionKind::HideIdle);
                }
            }
            None => {
                if self.current < self.last_index() {
                    let delay = self.steps[self.current].delay;
                    self.pending.schedule(now + delay, TransitionKind::Advance);
                }
            }
        }
    }

    /// Visible steps in order: every non-hidden step up to the active one
    pub fn visible_steps(&self) -> impl Iterator<Item = VisibleStep<'_>> + '_ {
        let validity = self.evaluate();
        (0..=self.current)
            .filter(move |&i| !self.hidden[i])
            .map(move |i| {
                let step = &self.steps[i];
                VisibleStep {
                    index: i,
                    step,
                    value: self.form.get(step.key),
                    mode: if i == self.current {
                        StepMode::Active
                    } else {
                        StepMode::ReadOnly
                    },
                    valid: validity[i],
                }
            })
    }

    /// Every non-hidden step is valid
    pub fn is_complete(&self) -> bool {
        self.invalid_steps().is_empty()
    }

    /// Indices of non-hidden steps that fail validation
    pub fn invalid_steps(&self) -> Vec<usize> {
        self.evaluate()
            .into_iter()
            .enumerate()
            .filter(|&(i, valid)| !valid && !self.hidden[i])
            .map(|(i, _)| i)
            .collect()
    }

    /// Hand the form to `create` if the wizard is complete
    ///
    /// Never changes the active step. Errors from `create` are returned as-is.
    pub fn submit<T, F>(&self, create: F) -> BuzzPayResult<T>
    where
        F: FnOnce(&FormData) -> BuzzPayResult<T>,
    {
        let invalid = self.invalid_steps();
        if !invalid.is_empty() {
            let labels: Vec<&str> = invalid.iter().map(|&i| self.steps[i].label).collect();
            return Err(BuzzPayError::Validation(format!(
                "Please complete: {}",
                labels.join(", ")
            )));
        }
        create(&self.form)
    }
}

impl WizardController<ManualClock> {
    /// Fast-forward through every pending transition
    ///
    /// Advances the manual clock to each deadline in turn until nothing is
    /// pending. Returns the number of transitions fired.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        // Each firing either advances a step or hides the last one.
        let limit = self.steps.len() * 2 + 1;
        while let Some(deadline) = self.pending.deadline() {
            if fired >= limit {
                break;
            }
            self.clock.advance_to(deadline);
            if self.tick().is_some() {
                fired += 1;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::step::Rule;

    const DELAY: Duration = Duration::from_millis(500);
    const IDLE: Duration = Duration::from_secs(10);

    fn steps() -> Vec<StepDef> {
        vec![
            StepDef::new("name", "Name", Rule::MinChars(2), DELAY),
            StepDef::new("amount", "Amount", Rule::PositiveAmount, DELAY),
            StepDef::new("note", "Note", Rule::NonEmpty, DELAY).hide_when_idle(true),
        ]
    }

    fn wizard() -> (WizardController<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controller = WizardController::new(steps(), IDLE, clock.clone()).unwrap();
        (controller, clock)
    }

    fn assert_rewind_invariant(controller: &WizardController<ManualClock>) {
        for (i, valid) in controller.evaluate().into_iter().enumerate() {
            if !valid && !controller.is_hidden(i) {
                assert!(controller.current_step() <= i);
            }
        }
    }

    #[test]
    fn test_rejects_empty_steps() {
        let result = WizardController::new(Vec::new(), IDLE, ManualClock::new());
        assert!(matches!(result, Err(BuzzPayError::InvalidArgument(_))));
    }

    #[test]
    fn test_starts_at_first_step_with_nothing_pending() {
        let (controller, _) = wizard();
        assert_eq!(controller.current_step(), 0);
        assert_eq!(controller.last_index(), 2);
        assert!(controller.pending_deadline().is_none());
        assert!(!controller.is_complete());
    }

    #[test]
    fn test_out_of_range_index_fails_fast() {
        let (mut controller, _) = wizard();
        let err = controller.set_field_value(3, "x").unwrap_err();
        assert!(matches!(err, BuzzPayError::InvalidArgument(_)));
        assert_eq!(controller.current_step(), 0);
    }

    #[test]
    fn test_advance_waits_for_delay() {
        let (mut controller, clock) = wizard();
        controller.set_field_value(0, "Al").unwrap();

        assert_eq!(controller.pending_kind(), Some(TransitionKind::Advance));
        clock.advance(Duration::from_millis(499));
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_step(), 0);

        clock.advance(Duration::from_millis(1));
        assert_eq!(controller.tick(), Some(TransitionKind::Advance));
        assert_eq!(controller.current_step(), 1);
    }

    #[test]
    fn test_edit_restarts_debounce() {
        let (mut controller, clock) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        clock.advance(Duration::from_millis(400));
        controller.set_field_value(0, "Ali").unwrap();
        clock.advance(Duration::from_millis(400));

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_step(), 0);

        clock.advance(Duration::from_millis(100));
        controller.tick();
        assert_eq!(controller.current_step(), 1);
    }

    #[test]
    fn test_advances_exactly_one_step_per_firing() {
        let (mut controller, clock) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "25.50").unwrap();
        controller.set_field_value(2, "Dinner").unwrap();

        clock.advance(Duration::from_secs(60));
        assert_eq!(controller.tick(), Some(TransitionKind::Advance));
        assert_eq!(controller.current_step(), 1);

        // The newly active step starts its own delay
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_step(), 1);

        clock.advance(DELAY);
        assert_eq!(controller.tick(), Some(TransitionKind::Advance));
        assert_eq!(controller.current_step(), 2);
        assert_eq!(controller.tick(), None);
        assert!(controller.is_complete());
    }

    #[test]
    fn test_invalid_edit_rewinds_immediately() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "25.50").unwrap();
        controller.settle();
        assert_eq!(controller.current_step(), 2);

        controller.set_field_value(1, "abc").unwrap();
        assert_eq!(controller.current_step(), 1);
        assert_rewind_invariant(&controller);

        controller.set_field_value(0, "A").unwrap();
        assert_eq!(controller.current_step(), 0);
        assert_rewind_invariant(&controller);
    }

    #[test]
    fn test_rewinds_to_lowest_invalid_step() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "10").unwrap();
        controller.settle();

        // Both earlier steps invalid: land on the lowest one
        controller.set_field_value(1, "").unwrap();
        controller.set_field_value(0, "").unwrap();
        assert_eq!(controller.current_step(), 0);
    }

    #[test]
    fn test_never_advances_past_invalid_step() {
        let (mut controller, clock) = wizard();
        controller.set_field_value(0, "A").unwrap();
        clock.advance(Duration::from_secs(60));
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_step(), 0);
    }

    #[test]
    fn test_idle_hides_empty_last_step() {
        let (mut controller, clock) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "25.50").unwrap();
        clock.advance(DELAY);
        controller.tick();
        clock.advance(DELAY);
        controller.tick();
        assert_eq!(controller.current_step(), 2);
        assert_eq!(controller.pending_kind(), Some(TransitionKind::HideIdle));
        assert!(!controller.is_complete());

        clock.advance(Duration::from_millis(9_999));
        assert_eq!(controller.tick(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(controller.tick(), Some(TransitionKind::HideIdle));
        assert!(controller.is_hidden(2));
        assert!(controller.is_complete());
        assert!(controller.pending_deadline().is_none());
        assert_eq!(controller.visible_steps().count(), 2);
    }

    #[test]
    fn test_typing_unhides_last_step() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "25.50").unwrap();
        controller.settle();
        assert!(controller.is_hidden(2));

        controller.set_field_value(2, "Dinner").unwrap();
        assert!(!controller.is_hidden(2));
        assert!(controller.is_complete());

        controller.set_field_value(2, "").unwrap();
        assert!(!controller.is_complete());
        assert_eq!(controller.pending_kind(), Some(TransitionKind::HideIdle));
    }

    #[test]
    fn test_visible_steps_modes() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.settle();

        let visible: Vec<_> = controller.visible_steps().collect();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].mode, StepMode::ReadOnly);
        assert_eq!(visible[0].value, "Al");
        assert_eq!(visible[1].mode, StepMode::Active);
        assert_eq!(visible[1].index, 1);

        // Restartable
        assert_eq!(controller.visible_steps().count(), 2);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "x").unwrap();

        let first = controller.evaluate();
        let second = controller.evaluate();
        assert_eq!(first, second);
        assert_eq!(first, vec![true, false, false]);
    }

    #[test]
    fn test_submit_incomplete_names_steps() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.settle();

        let err = controller.submit(|_| Ok(())).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Amount"));
        assert_eq!(controller.current_step(), 1);
    }

    #[test]
    fn test_submit_passes_form_and_errors_through() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "25.50").unwrap();
        controller.set_field_value(2, "Dinner").unwrap();
        controller.settle();

        let amount = controller
            .submit(|form| Ok(form.get("amount").to_string()))
            .unwrap();
        assert_eq!(amount, "25.50");

        let err = controller
            .submit::<(), _>(|_| Err(BuzzPayError::Store("offline".into())))
            .unwrap_err();
        assert!(err.is_store());
        assert_eq!(controller.current_step(), 2);
    }

    #[test]
    fn test_settle_is_bounded_and_idempotent() {
        let (mut controller, _) = wizard();
        controller.set_field_value(0, "Al").unwrap();
        controller.set_field_value(1, "1").unwrap();

        assert_eq!(controller.settle(), 3);
        assert_eq!(controller.settle(), 0);
    }

    #[test]
    fn test_single_step_wizard() {
        let clock = ManualClock::new();
        let steps = vec![StepDef::new("phone", "Phone", Rule::Phone, Duration::from_secs(2))];
        let mut controller = WizardController::new(steps, IDLE, clock).unwrap();

        controller.set_field_value(0, "555-123-4567").unwrap();
        assert!(controller.is_complete());
        assert!(controller.pending_deadline().is_none());
    }
}
