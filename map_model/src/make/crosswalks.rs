use anyhow::Result;

use crate::raw::RawLanelet;
use crate::{CrosswalkID, CrosswalkSegment, PolylineType, TypedPolyline};

pub fn make_crosswalk(ll: &RawLanelet) -> Result<CrosswalkSegment> {
    if ll.polygon.is_empty() {
        bail!("no polygon");
    }
    // Close the ring before resampling, so the last edge is sampled too
    let mut ring = ll.polygon.clone();
    if ring[0] != ring[ring.len() - 1] {
        ring.push(ring[0]);
    }
    let (_, pts) = super::resample(&ring)?;
    Ok(CrosswalkSegment {
        id: CrosswalkID(ll.id),
        polygon: TypedPolyline {
            polyline_type: PolylineType::Crosswalk,
            pts,
        },
    })
}
