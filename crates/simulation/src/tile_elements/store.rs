//! Per-tile element stacks for the whole map.

use bevy::prelude::*;

use crate::coords::TileCoords;

use super::types::{TileElement, TileElementKind};

/// Map-wide storage of element stacks. Each stack is ordered bottom to top by
/// base height; elements at equal height keep insertion order.
#[derive(Resource, Debug, Clone)]
pub struct TileElementStore {
    tiles: Vec<Vec<TileElement>>,
    width: usize,
    height: usize,
}

impl Default for TileElementStore {
    fn default() -> Self {
        Self::new(crate::config::MAP_WIDTH, crate::config::MAP_HEIGHT)
    }
}

impl TileElementStore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: vec![Vec::new(); width * height],
            width,
            height,
        }
    }

    /// A store where every tile has a flat surface at height 0.
    pub fn with_flat_surface(width: usize, height: usize, owned: bool) -> Self {
        Self {
            tiles: vec![vec![TileElement::surface(0, owned)]; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, tile: TileCoords) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.width && (tile.y as usize) < self.height
    }

    #[inline]
    fn index(&self, tile: TileCoords) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| tile.y as usize * self.width + tile.x as usize)
    }

    /// The tile's stack, bottom first. `None` when the tile is off the map or
    /// holds no elements.
    pub fn first_element_at(&self, tile: TileCoords) -> Option<&[TileElement]> {
        let stack = &self.tiles[self.index(tile)?];
        (!stack.is_empty()).then_some(stack.as_slice())
    }

    pub fn get(&self, tile: TileCoords, stack_index: usize) -> Option<&TileElement> {
        self.first_element_at(tile)?.get(stack_index)
    }

    pub fn get_mut(&mut self, tile: TileCoords, stack_index: usize) -> Option<&mut TileElement> {
        let index = self.index(tile)?;
        self.tiles[index].get_mut(stack_index)
    }

    /// Insert keeping the stack ordered; returns the new element's index.
    pub fn insert(&mut self, tile: TileCoords, element: TileElement) -> Option<usize> {
        let index = self.index(tile)?;
        let stack = &mut self.tiles[index];
        let at = stack
            .iter()
            .position(|existing| existing.base_height > element.base_height)
            .unwrap_or(stack.len());
        stack.insert(at, element);
        Some(at)
    }

    pub fn remove(&mut self, tile: TileCoords, stack_index: usize) -> Option<TileElement> {
        let index = self.index(tile)?;
        let stack = &mut self.tiles[index];
        (stack_index < stack.len()).then(|| stack.remove(stack_index))
    }

    /// Index of the first element on the tile satisfying `predicate`.
    pub fn position(
        &self,
        tile: TileCoords,
        predicate: impl Fn(&TileElement) -> bool,
    ) -> Option<usize> {
        self.first_element_at(tile)?.iter().position(predicate)
    }

    pub fn element_count(&self, tile: TileCoords) -> usize {
        self.first_element_at(tile).map_or(0, <[TileElement]>::len)
    }

    /// Whether the tile's surface is owned by the park.
    pub fn is_owned(&self, tile: TileCoords) -> bool {
        self.first_element_at(tile)
            .is_some_and(|stack| stack.iter().any(TileElement::is_owned_surface))
    }

    pub fn set_owned(&mut self, tile: TileCoords, owned: bool) {
        let Some(index) = self.index(tile) else {
            return;
        };
        for element in &mut self.tiles[index] {
            if let TileElementKind::Surface { owned: flag } = &mut element.kind {
                *flag = owned;
            }
        }
    }

    pub fn clear_tile(&mut self, tile: TileCoords) {
        if let Some(index) = self.index(tile) {
            self.tiles[index].clear();
        }
    }
}
