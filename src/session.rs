// ABOUTME: Persistent editing session for the slide-deck library
// ABOUTME: Applies deck operations in memory first, then writes them through a backend

use log::{error, info};

use crate::backend::DeckBackend;
use crate::errors::Result;
use crate::navigator::Navigator;
use crate::slide::{Presentation, SlideId, SlidePatch, SlideType, ThemePatch};
use crate::store::DeckStore;

/// A deck store bound to a persistence backend.
///
/// The in-memory store stays the source of truth: each operation mutates the
/// store first and only then issues the write. A failed write is returned as
/// an error but the in-memory change is kept, so the host can report it and
/// carry on.
pub struct DeckSession<B: DeckBackend> {
    backend: B,
    store: DeckStore,
    doc: Presentation,
}

impl<B: DeckBackend> DeckSession<B> {
    /// Load the deck from `backend`. Fails on an empty deck.
    pub fn open(mut backend: B) -> Result<Self> {
        let doc = backend.load()?;
        let store = DeckStore::new(doc.slides.clone(), doc.theme.clone())?;
        info!("Opened deck '{}' ({} slides)", doc.name, store.len());
        Ok(Self {
            backend,
            store,
            doc,
        })
    }

    pub fn store(&self) -> &DeckStore {
        &self.store
    }

    /// Mutable access for operations that are never persisted, such as
    /// selection changes or theme subscriptions.
    pub fn store_mut(&mut self) -> &mut DeckStore {
        &mut self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn name(&self) -> &str {
        &self.doc.name
    }

    /// The deck as a document, with the current in-memory slides and theme.
    pub fn presentation(&self) -> Presentation {
        Presentation {
            slides: self.store.slides().to_vec(),
            theme: self.store.theme().clone(),
            ..self.doc.clone()
        }
    }

    /// Navigator positioned at a 1-based slide of the current deck.
    pub fn navigator(&self, position: usize) -> Result<Navigator> {
        Navigator::new(position, self.store.len())
    }

    /// Navigator for the `{n}` segment of a `/slides/{n}` route.
    pub fn navigator_for_route(&self, segment: &str) -> Result<Navigator> {
        Navigator::from_route(segment, self.store.len())
    }

    fn persist<F>(&mut self, what: &str, write: F) -> Result<()>
    where
        F: FnOnce(&mut B, &DeckStore) -> Result<()>,
    {
        write(&mut self.backend, &self.store).map_err(|e| {
            error!("Failed to persist {}: {}", what, e);
            e
        })
    }

    /// Add a slide. On a write failure the slide still exists in memory and
    /// is the selected slide.
    pub fn add_slide(&mut self, kind: SlideType) -> Result<SlideId> {
        let id = self.store.add_slide(kind);
        let created = id.clone();
        self.persist("new slide", |backend, store| match store.slide(&created) {
            Some(slide) => backend.create_slide(slide),
            None => Ok(()),
        })?;
        Ok(id)
    }

    pub fn update_slide(&mut self, id: &SlideId, patch: &SlidePatch) -> Result<bool> {
        if !self.store.update_slide(id, patch) {
            return Ok(false);
        }
        self.persist("slide update", |backend, _| backend.update_slide(id, patch))?;
        Ok(true)
    }

    /// Persist a save released by a [`crate::debounce::SlideEditSession`].
    pub fn apply_edit(&mut self, edit: Option<(SlideId, SlidePatch)>) -> Result<bool> {
        match edit {
            Some((id, patch)) if !patch.is_empty() => self.update_slide(&id, &patch),
            _ => Ok(false),
        }
    }

    pub fn delete_slide(&mut self, id: &SlideId) -> Result<bool> {
        if !self.store.delete_slide(id) {
            return Ok(false);
        }
        self.persist("slide deletion", |backend, _| backend.delete_slide(id))?;
        Ok(true)
    }

    pub fn duplicate_slide(&mut self, id: &SlideId) -> Result<Option<SlideId>> {
        let Some(copy) = self.store.duplicate_slide(id) else {
            return Ok(None);
        };
        let created = copy.clone();
        self.persist("duplicated slide", |backend, store| {
            match store.slide(&created) {
                Some(slide) => backend.create_slide(slide),
                None => Ok(()),
            }
        })?;
        Ok(Some(copy))
    }

    pub fn reorder_slides(&mut self, from: usize, to: usize) -> Result<()> {
        self.store.reorder_slides(from, to)?;
        self.persist("reorder", |backend, store| {
            backend.reorder_slides(&store.order_keys())
        })
    }

    pub fn set_selected(&mut self, id: Option<SlideId>) {
        self.store.set_selected(id);
    }

    pub fn update_theme(&mut self, patch: &ThemePatch) -> Result<()> {
        self.store.update_theme(patch);
        self.persist("theme", |backend, store| backend.save_theme(store.theme()))
    }
}
