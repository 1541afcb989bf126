//! Two-tier batching: metadata batches resolve export URLs, download sub-batches
//! fetch content concurrently.
//!
//! Batches never overlap. The next metadata request is only issued once every
//! sub-batch of the previous one has been downloaded and persisted, and the next
//! sub-batch only starts after the previous one's downloads all resolved.

use futures::future::join_all;

use super::SyncContext;
use super::synchronizer::Synchronizer;
use crate::types::AssetDescriptor;

/// Number of requests a run issues for `total` assets
///
/// Returns `(metadata requests, download sub-batches)`, assuming every metadata
/// request succeeds.
pub fn plan_batches(
    total: usize,
    figma_batch_size: usize,
    download_batch_size: usize,
) -> (usize, usize) {
    if figma_batch_size == 0 || download_batch_size == 0 {
        return (0, 0);
    }
    let metadata = total.div_ceil(figma_batch_size);
    let downloads = (0..metadata)
        .map(|i| {
            let in_chunk = (total - i * figma_batch_size).min(figma_batch_size);
            in_chunk.div_ceil(download_batch_size)
        })
        .sum();
    (metadata, downloads)
}

/// Drive every batch of `assets` through download and persistence
pub(super) async fn run_batches(
    ctx: &SyncContext,
    mut assets: Vec<AssetDescriptor>,
    synchronizer: &mut Synchronizer<'_>,
) {
    let figma_batch_size = ctx.profile.figma_batch_size.max(1);
    let download_batch_size = ctx.profile.download_batch_size.max(1);

    let (metadata_requests, download_batches) =
        plan_batches(assets.len(), figma_batch_size, download_batch_size);
    tracing::debug!(
        profile = ctx.index,
        assets = assets.len(),
        metadata_requests,
        download_batches,
        "Planned batches"
    );

    for (batch, chunk) in assets.chunks_mut(figma_batch_size).enumerate() {
        if !attach_urls(ctx, batch, chunk).await {
            continue;
        }

        for sub_batch in chunk.chunks(download_batch_size) {
            for (asset, content) in download_batch(ctx, sub_batch).await {
                synchronizer.persist(asset, content).await;
            }
        }
    }
}

/// Resolve export URLs for one metadata batch
///
/// Returns `false` when the request failed and the whole batch must be skipped.
/// Descriptors the response does not mention keep `url = None`.
async fn attach_urls(ctx: &SyncContext, batch: usize, chunk: &mut [AssetDescriptor]) -> bool {
    let ids: Vec<&str> = chunk.iter().map(|a| a.id.as_str()).collect();

    let urls = match ctx.design.fetch_image_urls(&ctx.profile, &ids).await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!(
                profile = ctx.index,
                batch,
                assets = chunk.len(),
                error = %e,
                "Metadata batch failed, skipping its assets"
            );
            return false;
        }
    };

    for asset in chunk.iter_mut() {
        asset.url = urls.get(&asset.id).cloned();
    }
    true
}

/// Download every asset of a sub-batch concurrently
///
/// Assets without a URL are not requested. Failed and empty downloads are logged
/// and left out of the result.
async fn download_batch<'a>(
    ctx: &SyncContext,
    sub_batch: &'a [AssetDescriptor],
) -> Vec<(&'a AssetDescriptor, Vec<u8>)> {
    let requests = sub_batch.iter().filter_map(move |asset| {
        match asset.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => Some(async move { (asset, ctx.design.download(url).await) }),
            None => {
                tracing::debug!(asset = %asset.name, "No export URL, skipping");
                None
            }
        }
    });

    join_all(requests)
        .await
        .into_iter()
        .filter_map(|(asset, result)| match result {
            Ok(content) if !content.is_empty() => Some((asset, content)),
            Ok(_) => {
                tracing::warn!(asset = %asset.name, "Downloaded empty content, skipping");
                None
            }
            Err(e) => {
                tracing::warn!(asset = %asset.name, error = %e, "Download failed, skipping");
                None
            }
        })
        .collect()
}
