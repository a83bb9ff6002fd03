use crate::{layers::tile::TileLayer, prelude::HashMap, MapError, Result};

use super::base::LayerTrait;

/// Manages the base layers of the map; exactly one is active once any is added
pub struct LayerManager {
    /// All base layers indexed by ID
    layers: HashMap<String, TileLayer>,
    /// Insertion order, used for listing
    order: Vec<String>,
    active: Option<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            order: Vec::new(),
            active: None,
        }
    }

    /// Manager preloaded with [`TileLayer::defaults`], OpenStreetMap active
    pub fn with_default_layers() -> Self {
        let mut manager = Self::new();
        for layer in TileLayer::defaults() {
            // ids of the defaults are unique
            let _ = manager.add_layer(layer);
        }
        manager
    }

    /// Adds a base layer; the first one added becomes active
    pub fn add_layer(&mut self, mut layer: TileLayer) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id: {layer_id}")));
        }

        let first = self.active.is_none();
        layer.set_visible(first);
        if first {
            self.active = Some(layer_id.clone());
        }
        self.layers.insert(layer_id.clone(), layer);
        self.order.push(layer_id);
        Ok(())
    }

    /// Switches the visible base layer
    pub fn set_active(&mut self, layer_id: &str) -> Result<()> {
        if !self.layers.contains_key(layer_id) {
            return Err(MapError::Layer(format!("unknown layer id: {layer_id}")));
        }
        for (id, layer) in self.layers.iter_mut() {
            layer.set_visible(id == layer_id);
        }
        self.active = Some(layer_id.to_string());
        log::debug!("base layer switched to {}", layer_id);
        Ok(())
    }

    pub fn active(&self) -> Option<&TileLayer> {
        self.active.as_ref().and_then(|id| self.layers.get(id))
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&TileLayer> {
        self.layers.get(layer_id)
    }

    /// Lists all layer IDs in insertion order
    pub fn list_layers(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
