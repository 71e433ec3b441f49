//! Host page holding chart containers.

use crate::charts::scene::{ChartSurface, SurfaceId};

/// An element of the page that charts are appended to.
#[derive(Debug, Clone, Default)]
pub struct Container {
    id: String,
    surfaces: Vec<ChartSurface>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            surfaces: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn append(&mut self, surface: ChartSurface) {
        self.surfaces.push(surface);
    }

    pub fn surfaces(&self) -> &[ChartSurface] {
        &self.surfaces
    }
}

/// The page body. Containers are kept in document order.
#[derive(Debug, Clone, Default)]
pub struct Page {
    containers: Vec<Container>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(id: impl Into<String>) -> Self {
        let mut page = Self::new();
        page.add_container(id);
        page
    }

    pub fn add_container(&mut self, id: impl Into<String>) {
        self.containers.push(Container::new(id));
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    /// Every surface attached anywhere in the body.
    pub fn surface_count(&self) -> usize {
        self.containers.iter().map(|c| c.surfaces.len()).sum()
    }

    /// First surface in document order.
    pub fn first_surface(&self) -> Option<&ChartSurface> {
        self.containers.iter().find_map(|c| c.surfaces.first())
    }

    pub fn first_surface_mut(&mut self) -> Option<&mut ChartSurface> {
        self.containers.iter_mut().find_map(|c| c.surfaces.first_mut())
    }

    /// Detach the first surface in document order, if any.
    pub fn remove_first_surface(&mut self) -> Option<ChartSurface> {
        self.containers
            .iter_mut()
            .find(|c| !c.surfaces.is_empty())
            .map(|c| c.surfaces.remove(0))
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut ChartSurface> {
        self.containers
            .iter_mut()
            .flat_map(|c| c.surfaces.iter_mut())
            .find(|s| s.id == id)
    }
}
