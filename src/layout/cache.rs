use super::{DiagramLayout, LayoutConfig, LayoutEngine};
use crate::error::CacheError;
use crate::graph::FlowGraph;
use ahash::{AHashMap, RandomState};
use bincode::config::standard;
use bincode::serde::encode_to_vec;
use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::hash::BuildHasher;

// Fixed seeds keep fingerprints stable for the lifetime of the process and
// across runs.
const FINGERPRINT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// A cached layout plus the exact encoded inputs it was computed from.
struct CacheEntry {
    inputs: Vec<u8>,
    layout: DiagramLayout,
}

/// Memoizes layout passes keyed on the graph and the layout config.
///
/// Useful when the same diagram is re-laid out repeatedly, e.g. a viewport
/// toggling between a few sizes. Entries are evicted oldest first once
/// `capacity` is reached. A hit is only served when the stored inputs match
/// byte for byte, so two inputs sharing a fingerprint never see each other's
/// layout.
pub struct LayoutCache {
    capacity: usize,
    entries: AHashMap<u64, CacheEntry>,
    order: VecDeque<u64>,
    stats: CacheStats,
}

impl LayoutCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Hashes the serialized `(graph, config)` pair.
    pub fn fingerprint(graph: &FlowGraph, config: &LayoutConfig) -> Result<u64, CacheError> {
        Ok(hash_inputs(&encode_inputs(graph, config)?))
    }

    /// Returns the cached layout for these inputs, computing it on a miss.
    pub fn get_or_layout(
        &mut self,
        engine: &LayoutEngine,
        graph: &FlowGraph,
    ) -> Result<&DiagramLayout, CacheError> {
        let inputs = encode_inputs(graph, engine.config())?;
        let key = hash_inputs(&inputs);
        Ok(self.lookup(key, inputs, || engine.layout(graph)))
    }

    fn lookup(
        &mut self,
        key: u64,
        inputs: Vec<u8>,
        compute: impl FnOnce() -> DiagramLayout,
    ) -> &DiagramLayout {
        let hit = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.inputs == inputs);

        if hit {
            self.stats.hits += 1;
            log::debug!("Layout cache hit for {:016x}", key);
        } else {
            self.stats.misses += 1;
            if self.entries.contains_key(&key) {
                log::debug!("Layout cache collision for {:016x}, replacing entry", key);
                self.order.retain(|k| *k != key);
            } else {
                log::debug!("Layout cache miss for {:016x}", key);
                if self.entries.len() >= self.capacity {
                    if let Some(oldest) = self.order.pop_front() {
                        self.entries.remove(&oldest);
                        self.stats.evictions += 1;
                    }
                }
            }
            self.order.push_back(key);
        }

        let entry = match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                if !hit {
                    slot.insert(CacheEntry {
                        inputs,
                        layout: compute(),
                    });
                }
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(CacheEntry {
                inputs,
                layout: compute(),
            }),
        };
        &entry.layout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

fn encode_inputs(graph: &FlowGraph, config: &LayoutConfig) -> Result<Vec<u8>, CacheError> {
    Ok(encode_to_vec((graph, config), standard())?)
}

fn hash_inputs(inputs: &[u8]) -> u64 {
    let [k0, k1, k2, k3] = FINGERPRINT_SEEDS;
    let state = RandomState::with_seeds(k0, k1, k2, k3);
    BuildHasher::hash_one(&state, inputs)
}
