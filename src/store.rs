// ABOUTME: Deck store for the slide-deck library
// ABOUTME: Single owner of the ordered slide collection, the selection and the theme

use log::{debug, info, warn};

use crate::errors::{DeckError, Result};
use crate::sample;
use crate::slide::{
    COPY_SUFFIX, DEFAULT_SLIDE_TITLE, PresentationTheme, Slide, SlideId, SlidePatch, SlideType,
    ThemePatch,
};

type ThemeListener = Box<dyn FnMut(&PresentationTheme)>;

/// The authoritative slide collection of one editing session.
///
/// Every mutation goes through a method on this type so that the
/// never-empty and order invariants hold after each call. Slides are kept in
/// insertion order; use [`DeckStore::sorted_slides`] for presentation order.
pub struct DeckStore {
    slides: Vec<Slide>,
    selected: Option<SlideId>,
    theme: PresentationTheme,
    theme_listeners: Vec<ThemeListener>,
}

impl std::fmt::Debug for DeckStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckStore")
            .field("slides", &self.slides)
            .field("selected", &self.selected)
            .field("theme", &self.theme)
            .field("theme_listeners", &self.theme_listeners.len())
            .finish()
    }
}

impl DeckStore {
    /// Build a store from loaded or seeded slides. The first slide in
    /// presentation order starts out selected.
    pub fn new(slides: Vec<Slide>, theme: PresentationTheme) -> Result<Self> {
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        let mut store = Self {
            slides,
            selected: None,
            theme,
            theme_listeners: Vec::new(),
        };
        store.selected = store.sorted_slides().first().map(|s| s.id.clone());
        debug!("Deck store created with {} slides", store.slides.len());
        Ok(store)
    }

    /// A store seeded with the sample deck and the default theme.
    pub fn sample() -> Self {
        Self {
            selected: Some(SlideId::from("1")),
            slides: sample::sample_slides(),
            theme: PresentationTheme::default(),
            theme_listeners: Vec::new(),
        }
    }

    /// Slides in insertion order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slides in presentation order. Ties keep insertion order.
    pub fn sorted_slides(&self) -> Vec<&Slide> {
        let mut sorted: Vec<&Slide> = self.slides.iter().collect();
        sorted.sort_by_key(|s| s.order);
        sorted
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, id: &SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| &s.id == id)
    }

    /// Slide at a 1-based position in presentation order.
    pub fn slide_at(&self, position: usize) -> Option<&Slide> {
        position
            .checked_sub(1)
            .and_then(|index| self.sorted_slides().get(index).copied())
    }

    /// 1-based presentation position of a slide.
    pub fn position_of(&self, id: &SlideId) -> Option<usize> {
        self.sorted_slides()
            .iter()
            .position(|s| &s.id == id)
            .map(|index| index + 1)
    }

    pub fn selected_id(&self) -> Option<&SlideId> {
        self.selected.as_ref()
    }

    pub fn selected_slide(&self) -> Option<&Slide> {
        self.selected.as_ref().and_then(|id| self.slide(id))
    }

    pub fn theme(&self) -> &PresentationTheme {
        &self.theme
    }

    fn next_order(&self) -> i64 {
        self.slides.iter().map(|s| s.order).max().unwrap_or(-1) + 1
    }

    /// Append a new empty slide of the given type and select it.
    pub fn add_slide(&mut self, kind: SlideType) -> SlideId {
        let slide = Slide::new(kind, DEFAULT_SLIDE_TITLE, self.next_order());
        let id = slide.id.clone();
        info!("Adding {} slide {} at order {}", kind, id, slide.order);
        self.slides.push(slide);
        self.selected = Some(id.clone());
        id
    }

    /// Merge `patch` into the slide with `id`. Unknown ids are ignored and
    /// reported by returning `false`.
    pub fn update_slide(&mut self, id: &SlideId, patch: &SlidePatch) -> bool {
        match self.slides.iter_mut().find(|s| &s.id == id) {
            Some(slide) => {
                slide.apply(patch);
                debug!("Updated slide {}", id);
                true
            }
            None => {
                debug!("Ignoring update for unknown slide {}", id);
                false
            }
        }
    }

    /// Remove a slide. Refuses to remove the last remaining slide. When the
    /// removed slide was selected, the selection moves to its successor in
    /// presentation order, or its predecessor when it was the last one.
    pub fn delete_slide(&mut self, id: &SlideId) -> bool {
        if self.slides.len() <= 1 {
            warn!("Refusing to delete {}: a deck needs at least one slide", id);
            return false;
        }
        let Some(index) = self.slides.iter().position(|s| &s.id == id) else {
            debug!("Ignoring delete for unknown slide {}", id);
            return false;
        };

        if self.selected.as_ref() == Some(id) {
            let sorted = self.sorted_slides();
            let position = sorted.iter().position(|s| &s.id == id);
            let neighbour = position.and_then(|p| {
                sorted
                    .get(p + 1)
                    .or_else(|| p.checked_sub(1).and_then(|prev| sorted.get(prev)))
            });
            self.selected = neighbour.map(|s| s.id.clone());
        }

        self.slides.remove(index);
        info!("Deleted slide {}", id);
        true
    }

    /// Append a copy of a slide under a new id and select it.
    pub fn duplicate_slide(&mut self, id: &SlideId) -> Option<SlideId> {
        let original = self.slide(id)?;
        let mut copy = original.clone();
        copy.id = SlideId::generate();
        copy.title = format!("{}{}", original.title, COPY_SUFFIX);
        copy.order = self.next_order();

        let new_id = copy.id.clone();
        info!("Duplicated slide {} as {}", id, new_id);
        self.slides.push(copy);
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    /// Move the slide at `from` to `to`, both 0-based positions in
    /// presentation order, then renumber every slide to its new position.
    pub fn reorder_slides(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.slides.len();
        for index in [from, to] {
            if index >= len {
                warn!("Rejecting reorder {} -> {} on {} slides", from, to, len);
                return Err(DeckError::IndexOutOfRange { index, len });
            }
        }

        let mut sorted = std::mem::take(&mut self.slides);
        sorted.sort_by_key(|s| s.order);
        let moved = sorted.remove(from);
        sorted.insert(to, moved);
        for (position, slide) in sorted.iter_mut().enumerate() {
            slide.order = position as i64;
        }
        self.slides = sorted;
        debug!("Reordered slide {} -> {}", from, to);
        Ok(())
    }

    pub fn set_selected(&mut self, id: Option<SlideId>) {
        self.selected = id;
    }

    /// Merge `patch` into the theme and notify theme listeners.
    pub fn update_theme(&mut self, patch: &ThemePatch) {
        self.theme.apply(patch);
        debug!("Theme updated: {:?}", self.theme);
        for listener in self.theme_listeners.iter_mut() {
            listener(&self.theme);
        }
    }

    /// Register a callback run after every theme update, e.g. to push the
    /// theme's CSS variables into the host style layer.
    pub fn subscribe_theme<F>(&mut self, listener: F)
    where
        F: FnMut(&PresentationTheme) + 'static,
    {
        self.theme_listeners.push(Box::new(listener));
    }

    /// `(id, order)` pairs in presentation order, as written by a reorder.
    pub fn order_keys(&self) -> Vec<(SlideId, i64)> {
        self.sorted_slides()
            .into_iter()
            .map(|s| (s.id.clone(), s.order))
            .collect()
    }
}
