// ABOUTME: Persistence backends for the slide-deck library
// ABOUTME: Collaborator trait plus in-memory and JSON file implementations

use log::{debug, info};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{DeckError, Result};
use crate::slide::{Presentation, PresentationTheme, Slide, SlideId, SlidePatch};
use crate::utils;

/// Storage collaborator. Writes mirror the deck store operations so a
/// backend can persist them one by one.
pub trait DeckBackend {
    fn load(&mut self) -> Result<Presentation>;
    fn create_slide(&mut self, slide: &Slide) -> Result<()>;
    fn update_slide(&mut self, id: &SlideId, patch: &SlidePatch) -> Result<()>;
    fn delete_slide(&mut self, id: &SlideId) -> Result<()>;
    /// Persist the full `(id, order)` assignment produced by a reorder.
    fn reorder_slides(&mut self, orders: &[(SlideId, i64)]) -> Result<()>;
    fn save_theme(&mut self, theme: &PresentationTheme) -> Result<()>;
}

fn apply_update(doc: &mut Presentation, id: &SlideId, patch: &SlidePatch) -> Result<()> {
    let slide = doc
        .slides
        .iter_mut()
        .find(|s| &s.id == id)
        .ok_or_else(|| DeckError::SlideNotFound(id.to_string()))?;
    slide.apply(patch);
    doc.touch();
    Ok(())
}

fn apply_delete(doc: &mut Presentation, id: &SlideId) -> Result<()> {
    let before = doc.slides.len();
    doc.slides.retain(|s| &s.id != id);
    if doc.slides.len() == before {
        return Err(DeckError::SlideNotFound(id.to_string()));
    }
    doc.touch();
    Ok(())
}

fn apply_reorder(doc: &mut Presentation, orders: &[(SlideId, i64)]) -> Result<()> {
    if let Some((missing, _)) = orders
        .iter()
        .find(|(id, _)| !doc.slides.iter().any(|s| &s.id == id))
    {
        return Err(DeckError::SlideNotFound(missing.to_string()));
    }
    for (id, order) in orders {
        let slide = doc
            .slides
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| DeckError::SlideNotFound(id.to_string()))?;
        slide.order = *order;
    }
    doc.touch();
    Ok(())
}

/// Shared in-memory document. Clones share state, so a test can keep one
/// handle to inspect what a session wrote through another.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug)]
struct MemoryState {
    doc: Presentation,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBackend {
    pub fn new(doc: Presentation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                doc,
                fail_writes: false,
                writes: 0,
            })),
        }
    }

    /// Make every subsequent write fail, to simulate an unreachable store.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Copy of the stored document.
    pub fn snapshot(&self) -> Presentation {
        self.inner.lock().doc.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    fn write<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut Presentation) -> Result<()>,
    {
        let mut state = self.inner.lock();
        if state.fail_writes {
            return Err(DeckError::Backend("memory backend is rejecting writes".to_string()));
        }
        // A failed op must leave the stored document untouched
        let mut doc = state.doc.clone();
        op(&mut doc)?;
        state.doc = doc;
        state.writes += 1;
        Ok(())
    }
}

impl DeckBackend for MemoryBackend {
    fn load(&mut self) -> Result<Presentation> {
        Ok(self.snapshot())
    }

    fn create_slide(&mut self, slide: &Slide) -> Result<()> {
        self.write(|doc| {
            doc.slides.push(slide.clone());
            doc.touch();
            Ok(())
        })
    }

    fn update_slide(&mut self, id: &SlideId, patch: &SlidePatch) -> Result<()> {
        self.write(|doc| apply_update(doc, id, patch))
    }

    fn delete_slide(&mut self, id: &SlideId) -> Result<()> {
        self.write(|doc| apply_delete(doc, id))
    }

    fn reorder_slides(&mut self, orders: &[(SlideId, i64)]) -> Result<()> {
        self.write(|doc| apply_reorder(doc, orders))
    }

    fn save_theme(&mut self, theme: &PresentationTheme) -> Result<()> {
        self.write(|doc| {
            doc.theme = theme.clone();
            doc.touch();
            Ok(())
        })
    }
}

/// A deck stored as one pretty-printed JSON document. Every write rewrites
/// the file through a temporary file and a rename.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    doc: Option<Presentation>,
}

impl JsonFileBackend {
    /// Open an existing deck file.
    pub fn open(path: &Path) -> Result<Self> {
        utils::validate_file_exists(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            doc: None,
        })
    }

    /// Write `doc` to `path`, replacing any existing file.
    pub fn create(path: &Path, doc: Presentation) -> Result<Self> {
        utils::ensure_parent_directory_exists(path)?;
        atomic_write_json(path, &doc)?;
        info!("Created deck file {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            doc: Some(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Presentation> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut Presentation) -> Result<()>,
    {
        let mut doc = match self.doc.take() {
            Some(doc) => doc,
            None => self.read()?,
        };
        let outcome = op(&mut doc).and_then(|_| atomic_write_json(&self.path, &doc));
        if outcome.is_ok() {
            self.doc = Some(doc);
        }
        outcome
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug!("Wrote {:?}", path);
    Ok(())
}

impl DeckBackend for JsonFileBackend {
    fn load(&mut self) -> Result<Presentation> {
        let doc = self.read()?;
        info!("Loaded deck '{}' with {} slides", doc.name, doc.slides.len());
        self.doc = Some(doc.clone());
        Ok(doc)
    }

    fn create_slide(&mut self, slide: &Slide) -> Result<()> {
        self.write(|doc| {
            doc.slides.push(slide.clone());
            doc.touch();
            Ok(())
        })
    }

    fn update_slide(&mut self, id: &SlideId, patch: &SlidePatch) -> Result<()> {
        self.write(|doc| apply_update(doc, id, patch))
    }

    fn delete_slide(&mut self, id: &SlideId) -> Result<()> {
        self.write(|doc| apply_delete(doc, id))
    }

    fn reorder_slides(&mut self, orders: &[(SlideId, i64)]) -> Result<()> {
        self.write(|doc| apply_reorder(doc, orders))
    }

    fn save_theme(&mut self, theme: &PresentationTheme) -> Result<()> {
        self.write(|doc| {
            doc.theme = theme.clone();
            doc.touch();
            Ok(())
        })
    }
}
