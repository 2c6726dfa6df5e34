// ABOUTME: Debounced slide editing for the slide-deck library
// ABOUTME: Collapses rapid field edits into one save, flushed on teardown

use log::debug;
use std::time::{Duration, Instant};

use crate::slide::{Slide, SlideId, SlidePatch};

/// Default quiet period before a pending edit is saved.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A pending save with a deadline. Each new edit pushes the deadline back
/// and is merged into the pending patch, so no field edit is dropped.
///
/// Time is supplied by the caller, which keeps the debouncer usable from
/// any event loop.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    pending: Option<(SlidePatch, Instant)>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending save becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Cancel the running timer and reschedule with `patch` folded in.
    pub fn schedule(&mut self, patch: SlidePatch, now: Instant) {
        let deadline = now + self.delay;
        match self.pending.as_mut() {
            Some((pending, due)) => {
                pending.merge(patch);
                *due = deadline;
            }
            None => self.pending = Some((patch, deadline)),
        }
    }

    /// Take the pending patch if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SlidePatch> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending patch regardless of its deadline.
    pub fn flush(&mut self) -> Option<SlidePatch> {
        self.pending.take().map(|(patch, _)| patch)
    }

    /// Drop the pending patch without saving it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            debug!("Cancelled pending save");
        }
    }
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Editing state for the slide currently open in the editor: a local copy
/// that reflects every keystroke immediately, plus the debounced save.
#[derive(Debug, Clone)]
pub struct SlideEditSession {
    local: Slide,
    debouncer: SaveDebouncer,
}

impl SlideEditSession {
    pub fn new(slide: Slide, delay: Duration) -> Self {
        Self {
            local: slide,
            debouncer: SaveDebouncer::new(delay),
        }
    }

    pub fn slide_id(&self) -> &SlideId {
        &self.local.id
    }

    /// The slide as the user currently sees it.
    pub fn local(&self) -> &Slide {
        &self.local
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// A text-field edit: applied locally now, saved after the quiet period.
    pub fn edit(&mut self, patch: SlidePatch, now: Instant) {
        self.local.apply(&patch);
        self.debouncer.schedule(patch, now);
    }

    /// A select-style edit that saves at once. Any pending text edits are
    /// flushed with it so saves stay in edit order.
    pub fn edit_now(&mut self, patch: SlidePatch) -> SlidePatch {
        self.local.apply(&patch);
        let mut combined = self.debouncer.flush().unwrap_or_default();
        combined.merge(patch);
        combined
    }

    /// Returns the save that became due at `now`, if any.
    pub fn tick(&mut self, now: Instant) -> Option<(SlideId, SlidePatch)> {
        self.debouncer
            .poll(now)
            .map(|patch| (self.local.id.clone(), patch))
    }

    /// Switch the editor to another slide. Returns the outgoing slide's
    /// unsaved edits, which the caller must still persist.
    pub fn switch_to(&mut self, slide: Slide) -> Option<(SlideId, SlidePatch)> {
        let outgoing = self.flush();
        self.local = slide;
        outgoing
    }

    pub fn flush(&mut self) -> Option<(SlideId, SlidePatch)> {
        self.debouncer
            .flush()
            .map(|patch| (self.local.id.clone(), patch))
    }

    /// Tear the session down, returning any trailing edits to save.
    pub fn finish(mut self) -> Option<(SlideId, SlidePatch)> {
        self.flush()
    }
}
