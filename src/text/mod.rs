/*!
 * Text clean-up applied to OCR output before translation.
 *
 * - `normalize`: canonical form used for glossary matching
 * - `noise`: decides whether a string is worth translating at all
 * - `corrections`: fixes characters the OCR engine commonly misreads
 */

pub mod corrections;
pub mod noise;
pub mod normalize;

pub use corrections::apply_corrections;
pub use noise::should_translate;
pub use normalize::normalize;
