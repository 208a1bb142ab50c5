use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use abstutil::Timer;

use crate::raw::RawLineString;
use crate::{BoundaryID, BoundarySegment, PolylineType, TypedPolyline};

pub fn make_boundary(ls: &RawLineString) -> Result<BoundarySegment> {
    let polyline_type = PolylineType::for_linestring(ls.line_type(), ls.line_subtype());
    let (_, pts) = super::resample(&ls.points)?;
    Ok(BoundarySegment {
        id: BoundaryID(ls.id),
        polyline: TypedPolyline { polyline_type, pts },
    })
}

/// Road edges and painted lines that no lane uses as its left or right side. Each boundary is
/// emitted once, either inside a lane or here.
pub fn make_orphan_boundaries(
    linestrings: &[RawLineString],
    taken: &BTreeSet<BoundaryID>,
    timer: &mut Timer,
) -> BTreeMap<BoundaryID, BoundarySegment> {
    let mut results = BTreeMap::new();
    for ls in linestrings {
        if !PolylineType::is_boundary_linestring(ls.line_type(), ls.line_subtype())
            || taken.contains(&BoundaryID(ls.id))
        {
            continue;
        }
        match make_boundary(ls) {
            Ok(b) => {
                results.insert(b.id, b);
            }
            Err(err) => timer.warn(format!("Skipping linestring {}: {:#}", ls.id, err)),
        }
    }
    results
}
