/*!
 * Machine translation backends.
 *
 * This module contains client implementations for the supported services:
 * - Google: the public Google Translate endpoint
 * - Anthropic: Claude models prompted to translate
 * - Mock: deterministic translator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// The resolver only ever talks to this trait, so backends can be used
/// interchangeably and replaced by the mock in tests.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_language` - Service code of the source language
    /// * `target_language` - Service code of the target language
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the backend
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod anthropic;
pub mod google;
pub mod mock;
