//! Per-session caches wiring the library source and the catalog client
//! behind `LoadingModel`s.
//!
//! `ArtworkSession` owns one cache of candidate artwork URLs and one cache
//! of decoded library images, both keyed by entity. The caches are the
//! single-flight layer: a model is only constructed and loaded when the
//! entity is neither settled nor already in flight, so concurrent requests
//! for the same entity collapse into one load.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bytes::Bytes;
use core_artwork::{gather_missing_artwork, MissingArtwork};
use core_loading::{BoxLoader, LoadingModel, LoadingState};
use futures::FutureExt;
use provider_apple_catalog::CatalogSearchClient;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{FetchError, Result};
use crate::source::MediaLibrarySource;

/// A decoded image together with the original encoded bytes.
///
/// Decoding happens once at load time so that dimensions are available to
/// callers without re-parsing, and so that undecodable payloads surface as
/// an error instead of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Bytes,
}

impl ArtworkImage {
    fn decode(bytes: Bytes) -> Result<Self> {
        let decoded = image::load_from_memory(&bytes)
            .map_err(|err| FetchError::ImageDecode(err.to_string()))?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
        })
    }
}

/// Settled models plus in-flight markers for one kind of per-entity value.
struct EntityCache<T> {
    settled: HashMap<MissingArtwork, LoadingModel<MissingArtwork, T, FetchError>>,
    in_flight: HashSet<MissingArtwork>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            settled: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }
}

/// One browsing session over a media library's artwork gaps.
pub struct ArtworkSession {
    source: Arc<dyn MediaLibrarySource>,
    url_loader: BoxLoader<MissingArtwork, Vec<String>, FetchError>,
    image_loader: BoxLoader<MissingArtwork, ArtworkImage, FetchError>,
    urls: Mutex<EntityCache<Vec<String>>>,
    images: Mutex<EntityCache<ArtworkImage>>,
    repaired: Mutex<HashSet<MissingArtwork>>,
}

impl ArtworkSession {
    pub fn new(source: Arc<dyn MediaLibrarySource>, catalog: Arc<CatalogSearchClient>) -> Self {
        Self {
            url_loader: url_loader(catalog),
            image_loader: image_loader(Arc::clone(&source)),
            source,
            urls: Mutex::new(EntityCache::default()),
            images: Mutex::new(EntityCache::default()),
            repaired: Mutex::new(HashSet::new()),
        }
    }

    /// Scans the library and returns every album with missing artwork,
    /// sorted by description.
    pub async fn gather(&self) -> Result<Vec<MissingArtwork>> {
        let records = self.source.track_records().await?;
        debug!(tracks = records.len(), "scanned library tracks");
        let mut entities = gather_missing_artwork(&records);
        entities.sort();
        info!(albums = entities.len(), "gathered albums with missing artwork");
        Ok(entities)
    }

    /// Loads (or returns the cached outcome of) the catalog artwork URL
    /// search for one entity. A call that finds the entity already in
    /// flight returns `Loading` without issuing a second search.
    pub async fn load_candidate_urls(
        &self,
        entity: &MissingArtwork,
    ) -> LoadingState<Vec<String>, FetchError> {
        load_entry(&self.urls, entity, &self.url_loader).await
    }

    /// Current state of the URL cache for one entity without loading.
    pub async fn candidate_urls(
        &self,
        entity: &MissingArtwork,
    ) -> LoadingState<Vec<String>, FetchError> {
        peek(&self.urls, entity).await
    }

    /// Loads (or returns the cached outcome of) the library-matched image
    /// for one entity, decoded and sized.
    pub async fn load_image(
        &self,
        entity: &MissingArtwork,
    ) -> LoadingState<ArtworkImage, FetchError> {
        load_entry(&self.images, entity, &self.image_loader).await
    }

    /// Current state of the image cache for one entity without loading.
    pub async fn image(&self, entity: &MissingArtwork) -> LoadingState<ArtworkImage, FetchError> {
        peek(&self.images, entity).await
    }

    /// Records that artwork for the entity has been written back to the
    /// library during this session.
    pub async fn mark_repaired(&self, entity: &MissingArtwork) {
        self.repaired.lock().await.insert(entity.clone());
    }

    pub async fn is_repaired(&self, entity: &MissingArtwork) -> bool {
        self.repaired.lock().await.contains(entity)
    }

    pub async fn repaired_count(&self) -> usize {
        self.repaired.lock().await.len()
    }
}

fn url_loader(
    catalog: Arc<CatalogSearchClient>,
) -> BoxLoader<MissingArtwork, Vec<String>, FetchError> {
    Arc::new(move |context| {
        let catalog = Arc::clone(&catalog);
        async move {
            let entity = context
                .ok_or_else(|| FetchError::Source("url loader invoked without an entity".into()))?;
            let urls = catalog.search_artwork_urls(&entity).await?;
            Ok(urls)
        }
        .boxed()
    })
}

fn image_loader(
    source: Arc<dyn MediaLibrarySource>,
) -> BoxLoader<MissingArtwork, ArtworkImage, FetchError> {
    Arc::new(move |context| {
        let source = Arc::clone(&source);
        async move {
            let entity = context.ok_or_else(|| {
                FetchError::Source("image loader invoked without an entity".into())
            })?;
            let bytes = source.matching_image(&entity).await?;
            ArtworkImage::decode(bytes)
        }
        .boxed()
    })
}

/// Single-flight load: a settled model wins, an in-flight marker short
/// circuits to `Loading`, and only otherwise is a fresh model loaded. The
/// lock is not held across the load itself.
async fn load_entry<T>(
    cache: &Mutex<EntityCache<T>>,
    entity: &MissingArtwork,
    loader: &BoxLoader<MissingArtwork, T, FetchError>,
) -> LoadingState<T, FetchError>
where
    T: Clone,
{
    {
        let mut guard = cache.lock().await;
        if let Some(model) = guard.settled.get(entity) {
            return model.snapshot();
        }
        if !guard.in_flight.insert(entity.clone()) {
            return LoadingState::Loading;
        }
    }

    let mut model = LoadingModel::new(Arc::clone(loader));
    model.load(Some(entity.clone())).await;

    let mut guard = cache.lock().await;
    guard.in_flight.remove(entity);
    let state = model.snapshot();
    guard.settled.insert(entity.clone(), model);
    state
}

async fn peek<T>(
    cache: &Mutex<EntityCache<T>>,
    entity: &MissingArtwork,
) -> LoadingState<T, FetchError>
where
    T: Clone,
{
    let guard = cache.lock().await;
    if let Some(model) = guard.settled.get(entity) {
        model.snapshot()
    } else if guard.in_flight.contains(entity) {
        LoadingState::Loading
    } else {
        LoadingState::Idle
    }
}
