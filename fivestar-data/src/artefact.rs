//! Persisted cluster assignments: every listing's segment plus the segment
//! index.

use std::io::{BufWriter, Write};

use camino::Utf8Path;
use fivestar_core::{ClusterTable, SegmentSummary};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::DatasetError;
use crate::fs::{create_utf8_file, ensure_parent_dir, parent_or_current};

/// One listing's assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Listing identifier.
    pub listing_id: u64,
    /// Segment label, e.g. `L:Hackney_P:cheap_S:room`.
    pub segment: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Observed review score.
    pub review_score: f64,
}

/// Document written by [`write_cluster_assignments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterArtefact {
    /// Assignments ordered by listing id.
    pub assignments: Vec<ClusterAssignment>,
    /// Non-empty segments with their ids and sizes.
    pub segments: Vec<SegmentSummary>,
}

impl ClusterArtefact {
    /// Project a table into its persisted form.
    #[must_use]
    pub fn from_table(table: &ClusterTable) -> Self {
        let assignments = table
            .entries()
            .map(|entry| ClusterAssignment {
                listing_id: entry.listing_id,
                segment: entry.segment.to_string(),
                latitude: entry.coordinates.y,
                longitude: entry.coordinates.x,
                review_score: entry.review_score,
            })
            .collect();
        Self {
            assignments,
            segments: table.segments(),
        }
    }
}

/// Write the assignments of `table` as pretty JSON, creating parent
/// directories as needed.
///
/// # Errors
/// Returns [`DatasetError::CreateParent`], [`DatasetError::WriteFile`] or
/// [`DatasetError::Serialise`].
pub fn write_cluster_assignments(
    table: &ClusterTable,
    output_path: &Utf8Path,
) -> Result<ClusterArtefact, DatasetError> {
    let artefact = ClusterArtefact::from_table(table);
    ensure_parent_dir(output_path).map_err(|source| DatasetError::CreateParent {
        path: parent_or_current(output_path).to_path_buf(),
        source,
    })?;
    let file = create_utf8_file(output_path).map_err(|source| DatasetError::WriteFile {
        path: output_path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &artefact).map_err(|source| {
        DatasetError::Serialise {
            path: output_path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(|source| DatasetError::WriteFile {
        path: output_path.to_path_buf(),
        source,
    })?;
    debug!(
        "wrote {} assignments in {} segments to {output_path}",
        artefact.assignments.len(),
        artefact.segments.len()
    );
    Ok(artefact)
}
