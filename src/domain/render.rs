//! Indented text rendering of a VDI forest.

use crate::domain::arena::Forest;
use crate::domain::entities::{DiskImage, SizeExtract};

/// Spaces per tree level.
pub const TREE_INDENT: usize = 4;

/// Render the forest as an indented listing for console display.
///
/// Output: a header line with the tree count, then one line per node in
/// depth-first pre-order:
///
/// ```text
/// Found 1 tree(s)
///     866e1477(10.00G/2.50G)
///         c16b4d27(10.00G/0.25G)
/// ```
///
/// Each line is `<indent><identifier>(<virtual>/<physical>)` with
/// `TREE_INDENT * depth` spaces of indent, depth 1 at the roots. Sizes come
/// from `size_extract` in gigabytes; without an extractor, or for a zero
/// size, the placeholder `?` is printed instead.
pub fn render_forest<R: DiskImage>(
    forest: &Forest<'_, R>,
    size_extract: Option<&SizeExtract<R>>,
) -> String {
    let mut out = format!("Found {} tree(s)\n", forest.roots().len());

    for (_, depth, node) in forest.iter() {
        let (phys, virt) = match size_extract {
            Some(extract) => extract(node.record),
            None => (0.0, 0.0),
        };
        out.push_str(&format!(
            "{:indent$}{}({}/{})\n",
            "",
            node.record.identifier(),
            size_string(virt),
            size_string(phys),
            indent = TREE_INDENT * depth,
        ));
    }

    out
}

/// `{:.2}G` for a known size, `?` for zero/unknown.
fn size_string(size: f64) -> String {
    if size > 0.0 {
        format!("{size:.2}G")
    } else {
        "?".to_string()
    }
}
