use crate::clips::timestamp::{extract_timestamp, ClipTimestamp};
use crate::error::AppError;
use crate::models::ClipObject;

/// Orders clips newest first by the timestamp embedded in each key.
///
/// The sort is stable: clips sharing a timestamp keep their listing order.
/// A single key without a timestamp fails the whole ranking with `MalformedKey`.
pub fn rank_clips(clips: Vec<ClipObject>) -> Result<Vec<ClipObject>, AppError> {
    let mut stamped: Vec<(ClipTimestamp, ClipObject)> = clips
        .into_iter()
        .map(|clip| extract_timestamp(&clip.key).map(|ts| (ts, clip)))
        .collect::<Result<_, _>>()?;

    stamped.sort_by(|(a, _), (b, _)| b.cmp(a));

    Ok(stamped.into_iter().map(|(_, clip)| clip).collect())
}
