/*
 * Responsibility
 * - handler 向けの公開インターフェース (extractor の re-export)
 */
pub mod extractors;
