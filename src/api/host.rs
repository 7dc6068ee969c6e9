use std::cell::Cell;
use std::rc::Rc;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Externally owned drawing host (a window region, widget or canvas slot).
///
/// Engines never cache the host's size as truth: they re-measure on demand,
/// because hosts do not push size changes. `None` means the host is gone.
pub trait SurfaceHost {
    fn measure(&self) -> Option<Viewport>;
}

impl<F> SurfaceHost for F
where
    F: Fn() -> Option<Viewport>,
{
    fn measure(&self) -> Option<Viewport> {
        self()
    }
}

/// Shared, cloneable host whose size the embedding code updates in place.
///
/// Clones observe the same size cell, so the embedding layer keeps one
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct SharedHost {
    size: Rc<Cell<Option<Viewport>>>,
}

impl SharedHost {
    #[must_use]
    pub fn new(size: Viewport) -> Self {
        Self {
            size: Rc::new(Cell::new(Some(size))),
        }
    }

    /// A host that was never attached to anything.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_size(&self, size: Viewport) {
        self.size.set(Some(size));
    }

    pub fn detach(&self) {
        self.size.set(None);
    }
}

impl SurfaceHost for SharedHost {
    fn measure(&self) -> Option<Viewport> {
        self.size.get()
    }
}

/// Measures `host` at engine construction; `size_override` wins when set.
pub(crate) fn resolve_viewport(
    host: &dyn SurfaceHost,
    size_override: Option<Viewport>,
) -> ChartResult<Viewport> {
    let measured = host.measure().ok_or_else(|| {
        ChartError::InvalidSurface("host is not attached to a drawing surface".to_owned())
    })?;
    let viewport = size_override.unwrap_or(measured);
    if !viewport.is_valid() {
        return Err(ChartError::InvalidSurface(format!(
            "host measured {}x{} pixels",
            viewport.width, viewport.height
        )));
    }
    Ok(viewport)
}
