//! Forest builder: links flat disk-image records into snapshot trees.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use indexmap::IndexMap;
use tracing::instrument;

use crate::domain::arena::Forest;
use crate::domain::entities::DiskImage;
use crate::domain::error::{DomainError, TreeResult};

/// Build the forest of parent/child lineages from a flat record mapping.
///
/// Every record becomes exactly one node. Records without a parent
/// identifier become roots, in mapping iteration order; records with one
/// are attached under it, children in mapping iteration order. A parent
/// identifier absent from the mapping aborts the whole build: the input is
/// inconsistent and no sound partial forest exists.
///
/// Parent chains that loop back on themselves are rejected with
/// `CycleDetected` (a looped chain has no root, so its nodes would
/// otherwise silently vanish from the output).
#[instrument(level = "debug", skip(records), fields(records = records.len()))]
pub fn build_forest<R: DiskImage>(records: &IndexMap<String, R>) -> TreeResult<Forest<'_, R>> {
    let mut forest = Forest::new();
    let mut index_of: HashMap<&str, Index> = HashMap::with_capacity(records.len());

    for (id, record) in records {
        let idx = forest.insert(record);
        index_of.insert(id.as_str(), idx);
    }

    for (id, record) in records {
        let idx = index_of[id.as_str()];
        match record.parent_identifier() {
            Some(parent_id) if parent_id == id => {
                return Err(DomainError::CycleDetected(id.clone()));
            }
            Some(parent_id) => {
                let parent_idx =
                    *index_of
                        .get(parent_id)
                        .ok_or_else(|| DomainError::MissingParent {
                            child: id.clone(),
                            parent: parent_id.to_string(),
                        })?;
                forest.attach(idx, parent_idx);
            }
            None => forest.mark_root(idx),
        }
    }

    verify_reachable(&forest, records, &index_of)?;

    Ok(forest)
}

/// Every node must be reachable from a root; an unreached node sits on a
/// parent cycle.
fn verify_reachable<R: DiskImage>(
    forest: &Forest<'_, R>,
    records: &IndexMap<String, R>,
    index_of: &HashMap<&str, Index>,
) -> TreeResult<()> {
    let mut seen: HashSet<Index> = HashSet::with_capacity(forest.len());
    for (idx, _, _) in forest.iter() {
        seen.insert(idx);
    }
    if seen.len() == forest.len() {
        return Ok(());
    }

    // Name the first unreached record in mapping order.
    for id in records.keys() {
        if !seen.contains(&index_of[id.as_str()]) {
            return Err(DomainError::CycleDetected(id.clone()));
        }
    }
    unreachable!("node count mismatch without an unreached record")
}
