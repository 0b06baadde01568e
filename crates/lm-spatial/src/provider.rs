//! Graph providers: turn a free-text place name into a [`RoadNetwork`].
//!
//! Providers do the (possibly slow) loading; [`GraphCache`] sits in front of
//! one and hands out shared `Arc<RoadNetwork>`s keyed by the normalized place
//! name.  The cache is owned by the caller, there is no global state.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{info, warn};

use crate::network::RoadNetwork;
use crate::ProviderError;

#[cfg(feature = "osm")]
use std::path::PathBuf;

#[cfg(feature = "osm")]
use crate::speed::SpeedProfile;

// ── Place names ───────────────────────────────────────────────────────────────

/// Canonical form of a place name used as a cache key.
///
/// Trims, lower-cases, collapses inner whitespace to single spaces, and drops
/// spaces around commas: `"  Koramangala ,  Bangalore "` becomes
/// `"koramangala,bangalore"`.
pub fn normalize_place(place: &str) -> String {
    place
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

/// File-system safe slug of a place name: the normalized form with every run
/// of non-alphanumeric characters replaced by a single `-`.
pub fn place_slug(place: &str) -> String {
    let mut slug = String::new();
    for c in normalize_place(place).chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// ── GraphProvider trait ───────────────────────────────────────────────────────

/// Source of road networks for named places.
pub trait GraphProvider {
    /// Load the drivable network for `place`.
    ///
    /// Implementations normalize `place` themselves; callers may pass raw
    /// user input.
    fn load(&self, place: &str) -> Result<RoadNetwork, ProviderError>;
}

impl<P: GraphProvider + ?Sized> GraphProvider for &P {
    fn load(&self, place: &str) -> Result<RoadNetwork, ProviderError> {
        (**self).load(place)
    }
}

// ── StaticProvider ────────────────────────────────────────────────────────────

type NetworkFactory = Box<dyn Fn() -> RoadNetwork + Send + Sync>;

/// In-memory provider: each registered place builds its network from a
/// closure.  Used by tests and by the synthetic demo neighbourhood.
#[derive(Default)]
pub struct StaticProvider {
    places: HashMap<String, NetworkFactory>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `place` (normalized on insert).  Replaces any earlier entry.
    pub fn with_place<F>(mut self, place: &str, build: F) -> Self
    where
        F: Fn() -> RoadNetwork + Send + Sync + 'static,
    {
        self.places.insert(normalize_place(place), Box::new(build));
        self
    }

    /// Registered place keys, sorted.
    pub fn places(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.places.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl GraphProvider for StaticProvider {
    fn load(&self, place: &str) -> Result<RoadNetwork, ProviderError> {
        let key = normalize_place(place);
        let build = self
            .places
            .get(&key)
            .ok_or_else(|| ProviderError::UnknownPlace(place.trim().to_string()))?;
        Ok(build())
    }
}

// ── PbfDirectoryProvider ──────────────────────────────────────────────────────

/// Loads `<dir>/<slug>.osm.pbf` for a place, where the slug comes from
/// [`place_slug`].  `"Koramangala, Bangalore"` reads
/// `koramangala-bangalore.osm.pbf`.
#[cfg(feature = "osm")]
pub struct PbfDirectoryProvider {
    dir:     PathBuf,
    profile: SpeedProfile,
}

#[cfg(feature = "osm")]
impl PbfDirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>, profile: SpeedProfile) -> Self {
        Self { dir: dir.into(), profile }
    }

    /// Path the provider would read for `place`.
    pub fn path_for(&self, place: &str) -> PathBuf {
        self.dir.join(format!("{}.osm.pbf", place_slug(place)))
    }
}

#[cfg(feature = "osm")]
impl GraphProvider for PbfDirectoryProvider {
    fn load(&self, place: &str) -> Result<RoadNetwork, ProviderError> {
        let path = self.path_for(place);
        if place_slug(place).is_empty() || !path.is_file() {
            return Err(ProviderError::UnknownPlace(place.trim().to_string()));
        }
        crate::osm::load_from_pbf(&path, &self.profile).map_err(|source| ProviderError::Load {
            place: place.trim().to_string(),
            source,
        })
    }
}

// ── GraphCache ────────────────────────────────────────────────────────────────

/// Eviction policy for [`GraphCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eviction {
    /// Keep every loaded network for the cache's lifetime.
    #[default]
    Unbounded,
    /// Keep at most this many networks, dropping the least recently used.
    Lru(NonZeroUsize),
}

struct CacheEntry {
    network:   Arc<RoadNetwork>,
    last_used: u64,
}

/// Keyed cache in front of a [`GraphProvider`].
///
/// Key = [`normalize_place`] of the requested name.  Networks are handed out
/// as `Arc`s, so evicting an entry never invalidates a network a caller still
/// holds.
pub struct GraphCache<P> {
    provider: P,
    eviction: Eviction,
    entries:  HashMap<String, CacheEntry>,
    /// Monotonic use counter for LRU ordering.
    clock:    u64,
}

impl<P: GraphProvider> GraphCache<P> {
    pub fn new(provider: P) -> Self {
        Self::with_eviction(provider, Eviction::Unbounded)
    }

    pub fn with_eviction(provider: P, eviction: Eviction) -> Self {
        Self { provider, eviction, entries: HashMap::new(), clock: 0 }
    }

    /// Return the network for `place`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates provider failures, and returns
    /// [`ProviderError::EmptyNetwork`] when the loaded network has no nodes.
    /// Failed loads are not cached.
    pub fn get(&mut self, place: &str) -> Result<Arc<RoadNetwork>, ProviderError> {
        let key = normalize_place(place);
        self.clock += 1;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.clock;
            return Ok(Arc::clone(&entry.network));
        }

        let network = self.provider.load(place)?;
        if network.is_empty() {
            return Err(ProviderError::EmptyNetwork(place.trim().to_string()));
        }
        info!(
            place = %key,
            nodes = network.node_count(),
            edges = network.edge_count(),
            "loaded road network"
        );

        let network = Arc::new(network);
        self.entries.insert(
            key,
            CacheEntry { network: Arc::clone(&network), last_used: self.clock },
        );
        self.evict();
        Ok(network)
    }

    fn evict(&mut self) {
        let Eviction::Lru(capacity) = self.eviction else {
            return;
        };
        while self.entries.len() > capacity.get() {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            let Some(key) = oldest else { break };
            warn!(place = %key, capacity = capacity.get(), "evicting cached road network");
            self.entries.remove(&key);
        }
    }

    /// `true` if `place` is currently cached (does not count as a use).
    pub fn contains(&self, place: &str) -> bool {
        self.entries.contains_key(&normalize_place(place))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
