//! Blocking prompt that has to be acknowledged before the reminder cycle continues

use serde::Serialize;
use thiserror::Error;

use crate::i18n::TextKey;

/// What a prompt is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// The countdown ran out
    Reminder,
    /// The current time left the schedule window mid-cycle
    OutsideRange,
}

/// Text of a prompt, resolved against the language at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: TextKey,
    pub message: TextKey,
}

impl Prompt {
    pub fn reminder() -> Self {
        Self {
            kind: PromptKind::Reminder,
            title: TextKey::AppName,
            message: TextKey::DrinkWater,
        }
    }

    pub fn outside_range() -> Self {
        Self {
            kind: PromptKind::OutsideRange,
            title: TextKey::AppName,
            message: TextKey::OutsideRange,
        }
    }
}

/// One pending prompt and the continuation to run once it is acknowledged.
///
/// Acknowledging consumes the flow, so the continuation can only be handed out once.
#[derive(Debug)]
pub struct NotificationFlow<C> {
    prompt: Prompt,
    on_acknowledge: C,
}

impl<C> NotificationFlow<C> {
    pub fn new(prompt: Prompt, on_acknowledge: C) -> Self {
        Self {
            prompt,
            on_acknowledge,
        }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn acknowledge(self) -> C {
        self.on_acknowledge
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("a {0:?} prompt is already outstanding")]
pub struct SlotOccupied(pub PromptKind);

/// Holds at most one outstanding flow
#[derive(Debug)]
pub struct NotificationSlot<C> {
    pending: Option<NotificationFlow<C>>,
}

impl<C> Default for NotificationSlot<C> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<C> NotificationSlot<C> {
    /// Open a new flow. Opening a second one while the first is pending is a
    /// contract violation and is refused.
    pub fn open(&mut self, flow: NotificationFlow<C>) -> Result<(), SlotOccupied> {
        if let Some(current) = &self.pending {
            return Err(SlotOccupied(current.prompt.kind));
        }
        self.pending = Some(flow);
        Ok(())
    }

    /// Close the pending flow and hand back its continuation
    pub fn acknowledge(&mut self) -> Option<C> {
        self.pending.take().map(NotificationFlow::acknowledge)
    }

    /// Drop the pending flow without running its continuation
    pub fn retract(&mut self) -> Option<Prompt> {
        self.pending.take().map(|flow| flow.prompt)
    }

    pub fn pending(&self) -> Option<&Prompt> {
        self.pending.as_ref().map(NotificationFlow::prompt)
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_open_is_refused() {
        let mut slot = NotificationSlot::default();
        slot.open(NotificationFlow::new(Prompt::reminder(), 1)).unwrap();
        let err = slot
            .open(NotificationFlow::new(Prompt::outside_range(), 2))
            .unwrap_err();
        assert_eq!(err, SlotOccupied(PromptKind::Reminder));
        assert_eq!(slot.pending().map(|p| p.kind), Some(PromptKind::Reminder));
    }

    #[test]
    fn acknowledge_yields_continuation_exactly_once() {
        let mut slot = NotificationSlot::default();
        slot.open(NotificationFlow::new(Prompt::reminder(), "rearm")).unwrap();
        assert_eq!(slot.acknowledge(), Some("rearm"));
        assert_eq!(slot.acknowledge(), None);
        assert!(!slot.is_open());
    }

    #[test]
    fn retract_drops_continuation() {
        let mut slot = NotificationSlot::default();
        slot.open(NotificationFlow::new(Prompt::outside_range(), ())).unwrap();
        assert_eq!(slot.retract(), Some(Prompt::outside_range()));
        assert_eq!(slot.acknowledge(), None);
    }
}
