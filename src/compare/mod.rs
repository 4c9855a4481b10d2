/*!
 * Reconciliation of per-language documents.
 *
 * - `extractor`: flattens one document into dotted paths
 * - `engine`: pairwise and N-way comparison
 * - `report`: entries, statuses and the issues-only view
 */

pub mod engine;
pub mod extractor;
pub mod report;

pub use engine::{ComparisonEngine, NWayOptions};
pub use extractor::{ExtractedPath, NodeKind, PathExtractor};
pub use report::{CompareMode, EntryStatus, ReconciliationEntry, ReconciliationReport, ReportSummary};
