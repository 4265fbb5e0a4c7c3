//! Animated quicksort driver.
//!
//! In-place Lomuto partitioning with the last element as pivot. Every swap is
//! drawn with both indices highlighted and followed by one step delay; the
//! pivot placement gets the same treatment.

use crate::engine::driver::{StepContext, StepFuture};
use crate::error::SortResult;

/// Sort `data` in place, drawing each step through `ctx`.
///
/// Empty and single-element arrays return without drawing.
///
/// # Errors
///
/// Returns `Cancelled` if the run token fires at any checkpoint; `data` is
/// then left partially sorted.
pub async fn quick_sort(data: &mut [u32], ctx: &mut StepContext<'_>) -> SortResult<()> {
    ctx.checkpoint()?;
    if data.len() < 2 {
        return Ok(());
    }
    let high = data.len() - 1;
    sort_range(ctx, data, 0, high).await
}

fn sort_range<'a>(
    ctx: &'a mut StepContext<'_>,
    data: &'a mut [u32],
    low: usize,
    high: usize,
) -> StepFuture<'a> {
    Box::pin(async move {
        ctx.checkpoint()?;
        if low >= high {
            return Ok(());
        }

        let pivot = partition(ctx, data, low, high).await?;
        if pivot > low {
            sort_range(&mut *ctx, &mut *data, low, pivot - 1).await?;
        }
        sort_range(ctx, data, pivot + 1, high).await
    })
}

/// Lomuto partition of `data[low..=high]`; returns the pivot's final index.
async fn partition(
    ctx: &mut StepContext<'_>,
    data: &mut [u32],
    low: usize,
    high: usize,
) -> SortResult<usize> {
    let pivot = data[high];
    // Next slot for an element smaller than the pivot
    let mut store = low;

    for candidate in low..high {
        ctx.checkpoint()?;
        ctx.compared();
        if data[candidate] < pivot {
            data.swap(store, candidate);
            ctx.wrote();
            ctx.show(data, &[store, candidate]).await?;
            store += 1;
        }
    }

    data.swap(store, high);
    ctx.wrote();
    ctx.show(data, &[store, high]).await?;
    Ok(store)
}
