use crate::args::Args;
use crate::context::Context;
use crate::decode;
use crate::error::IndexerError;
use crate::source::filter::ChunkFilter;
use alloy::primitives::BlockNumber;
use store::checkpoint::store::Store as CheckpointStore;

/// First block that still needs indexing: right after the checkpoint, or `args.from_block`
/// when nothing has been indexed yet.
pub async fn start_block(
    args: &Args,
    checkpoints: &CheckpointStore,
) -> Result<BlockNumber, IndexerError> {
    let checkpoint =
        checkpoints.get_last_checkpoint().await.map_err(IndexerError::CheckpointRead)?;

    Ok(match checkpoint {
        Some(checkpoint) => (checkpoint.block_number as BlockNumber).saturating_add(1),
        None => args.from_block,
    })
}

/// Replays every block between the checkpoint and the current head, one transaction per
/// chunk. Returns the highest block known to be fully applied afterwards.
pub async fn chunked_backfill(args: &Args, context: &Context) -> Result<BlockNumber, IndexerError> {
    // Lookup latest block
    let latest_block_number = context.source.head().await?;

    // Local mut state
    let mut from_block_number = start_block(args, &context.checkpoints).await?;

    if from_block_number > latest_block_number {
        tracing::info!(
            "Backfill skipped: next block {from_block_number} is past head {latest_block_number}"
        );
        // The head can sit below the checkpoint after a node reset. The floor never goes
        // past the head, or new live events in (head, checkpoint] would be skipped.
        return Ok(latest_block_number.min(from_block_number - 1));
    }

    tracing::info!("Backfill started at block {from_block_number} (head {latest_block_number})");

    let chunk_size = args.backfill_chunk_size.max(1);

    // Process historical chunks until we reach the snapshot tip
    while from_block_number <= latest_block_number {
        // A saturating addition avoids silent wraparound
        let to_block_number =
            from_block_number.saturating_add(chunk_size - 1).min(latest_block_number);

        let chunk_filter = ChunkFilter {
            address: context.contract,
            from_block_number,
            to_block_number,
        };
        let logs = context.source.chunk(chunk_filter).await?;
        let events = decode::decode_logs(&logs);

        // The checkpoint only moves once the whole chunk is committed
        context
            .projection
            .apply_chunk(&events, Some(to_block_number))
            .await
            .map_err(IndexerError::ProjectionWrite)
            .inspect_err(|e| {
                tracing::error!(
                    "Backfill failed on blocks {from_block_number}..={to_block_number}: {e}"
                )
            })?;

        tracing::info!(
            "Backfilled blocks {from_block_number}..={to_block_number}: {} logs, {} events",
            logs.len(),
            events.len()
        );

        if to_block_number == latest_block_number {
            break;
        }
        from_block_number = to_block_number + 1;
    }

    tracing::info!("Backfill finished at block {latest_block_number}");

    Ok(latest_block_number)
}
