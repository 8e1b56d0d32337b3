/*!
 * User-supplied glossary overrides.
 *
 * - `loader`: reads the glossary CSV
 * - `index`: normalized lookup table with exact-then-fuzzy resolution
 * - `fuzzy`: similarity scorers used by the index
 */

pub mod fuzzy;
pub mod index;
pub mod loader;

pub use fuzzy::{FuzzyMatcher, FuzzyScorer};
pub use index::{GlossaryEntry, GlossaryIndex};
pub use loader::{load_glossary_file, read_glossary};
