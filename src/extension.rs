use crate::landmarks::{Landmark, LandmarkSnapshot};

/// True if the index finger is extended, in any direction.
///
/// A curled finger keeps its tip close to the base knuckle whatever the hand
/// orientation, so the straight-line tip-to-MCP distance works for pointing
/// left, right, up and down alike.
pub fn is_index_extended(snapshot: &LandmarkSnapshot, threshold: f32) -> bool {
    let tip = snapshot.get(Landmark::IndexTip).xy();
    let mcp = snapshot.get(Landmark::IndexMcp).xy();
    tip.distance(&mcp) >= threshold
}
