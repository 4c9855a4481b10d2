/*!
 * Translation of missing values through remote services.
 *
 * This module is split into several submodules:
 *
 * - `adapter`: uniform, never-failing translate call over the backends
 * - `batch`: job construction and the sequential orchestrator
 * - `concurrency`: cancellation flag checked between items
 */

pub use self::adapter::{ProviderAdapter, ProviderOutcome, TranslationRequest};
pub use self::batch::{
    BatchProgress, BatchTranslationJob, BatchTranslator, ItemFailure, JobItem, TranslationOutcome,
    progress_percent,
};
pub use self::concurrency::CancellationFlag;

pub mod adapter;
pub mod batch;
pub mod concurrency;
