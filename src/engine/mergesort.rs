//! Animated merge sort driver.
//!
//! Top-down halve-then-merge. Each placement during a merge is drawn with the
//! destination and the source index highlighted, and each tail copy with the
//! destination alone. A cancelled merge stops where it is; the array is left
//! partially merged.

use crate::engine::driver::{StepContext, StepFuture};
use crate::error::SortResult;

/// Sort `data` in place, drawing each placement through `ctx`.
///
/// Empty and single-element arrays return without drawing.
///
/// # Errors
///
/// Returns `Cancelled` if the run token fires at any checkpoint.
pub async fn merge_sort(data: &mut [u32], ctx: &mut StepContext<'_>) -> SortResult<()> {
    ctx.checkpoint()?;
    if data.len() < 2 {
        return Ok(());
    }
    let end = data.len() - 1;
    sort_range(ctx, data, 0, end).await
}

fn sort_range<'a>(
    ctx: &'a mut StepContext<'_>,
    data: &'a mut [u32],
    start: usize,
    end: usize,
) -> StepFuture<'a> {
    Box::pin(async move {
        ctx.checkpoint()?;
        if start >= end {
            return Ok(());
        }

        let mid = start + (end - start) / 2;
        sort_range(&mut *ctx, &mut *data, start, mid).await?;
        sort_range(&mut *ctx, &mut *data, mid + 1, end).await?;
        merge(ctx, data, start, mid, end).await
    })
}

/// Merge the sorted runs `data[start..=mid]` and `data[mid + 1..=end]`.
async fn merge(
    ctx: &mut StepContext<'_>,
    data: &mut [u32],
    start: usize,
    mid: usize,
    end: usize,
) -> SortResult<()> {
    let left = data[start..=mid].to_vec();
    let right = data[mid + 1..=end].to_vec();
    let (mut i, mut j) = (0, 0);
    let mut dest = start;

    while i < left.len() && j < right.len() {
        ctx.checkpoint()?;
        ctx.compared();
        // Ties take from the left run, keeping equal values in input order.
        let source = if left[i] <= right[j] {
            data[dest] = left[i];
            i += 1;
            start + i - 1
        } else {
            data[dest] = right[j];
            j += 1;
            mid + j
        };
        ctx.wrote();
        ctx.show(data, &[dest, source]).await?;
        dest += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        ctx.checkpoint()?;
        data[dest] = value;
        ctx.wrote();
        ctx.show(data, &[dest]).await?;
        dest += 1;
    }

    Ok(())
}
