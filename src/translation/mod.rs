/*!
 * Translation of extracted strings into the selected target languages.
 *
 * - `resolver`: glossary override vs. machine translation, per cell
 * - `retry`: bounded retry with exponential backoff
 * - `result`: aligned output columns and per-source statistics
 */

pub mod resolver;
pub mod result;
pub mod retry;

pub use self::resolver::TranslationResolver;
pub use self::result::{CellSource, ResolutionStats, TranslationResult, error_marker};
pub use self::retry::RetryPolicy;
