//! Letter rendering - the renderer contract and the plain-text layout.
//!
//! Rendering internals are a black-box collaborator: the core hands a
//! [`crate::core::letter::LetterDraft`] to a [`LetterRenderer`] and gets bytes
//! back, whether the implementation is this plain-text layout or a real PDF
//! engine behind the same trait.

use std::fmt::Write as _;

use crate::config::Letterhead;
use crate::core::letter::LetterDraft;
use crate::errors::Result;

/// Fills the fixed legal-letter layout with a structured field set and
/// returns the rendered bytes.
pub trait LetterRenderer: Send + Sync {
    /// Renders the letter. Pure; persists nothing.
    fn render(&self, letter: &LetterDraft) -> Result<Vec<u8>>;
}

/// Deterministic plain-text rendering of the confirmation-letter layout.
///
/// Sections appear in the fixed order the division's paper letters use:
/// letterhead, title, party blocks, numbered clauses, per-party support
/// points, then the signature blocks in their given order.
#[derive(Debug, Clone, Default)]
pub struct TextLetterRenderer {
    /// Identity block printed at the top of every letter
    pub letterhead: Letterhead,
}

impl TextLetterRenderer {
    /// Creates a renderer stamping the given letterhead on every letter.
    #[must_use]
    pub const fn new(letterhead: Letterhead) -> Self {
        Self { letterhead }
    }
}

impl LetterRenderer for TextLetterRenderer {
    // writeln! is infallible when writing to String, so unwrap is safe throughout
    #[allow(clippy::unwrap_used, clippy::too_many_lines)]
    fn render(&self, letter: &LetterDraft) -> Result<Vec<u8>> {
        let mut out = String::new();

        if !self.letterhead.organization.is_empty() {
            writeln!(out, "{}", self.letterhead.organization).unwrap();
            if !self.letterhead.address.is_empty() {
                writeln!(out, "{}", self.letterhead.address).unwrap();
            }
            if !self.letterhead.city.is_empty() {
                writeln!(out, "{}", self.letterhead.city).unwrap();
            }
            writeln!(out).unwrap();
        }

        writeln!(out, "CONFIRMATION LETTER").unwrap();
        writeln!(
            out,
            "Regarding: {} ({})",
            letter.event_name,
            letter.event_date.format("%-d %B %Y")
        )
        .unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "On {}, the undersigned parties:",
            letter.agreement_date.format("%-d %B %Y")
        )
        .unwrap();
        writeln!(out).unwrap();

        writeln!(out, "FIRST PARTY").unwrap();
        writeln!(out, "  Name : {}", letter.first_party.name).unwrap();
        writeln!(out, "  Role : {}", letter.first_party.role).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "SECOND PARTY").unwrap();
        writeln!(out, "  Name : {}", letter.second_party.name).unwrap();
        writeln!(out, "  Role : {}", letter.second_party.role).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "have agreed to the following terms:").unwrap();
        for (index, clause) in letter.clauses.iter().enumerate() {
            writeln!(out, "  {}. {clause}", index + 1).unwrap();
        }
        writeln!(out).unwrap();

        if !letter.first_party_support.is_empty() {
            writeln!(out, "Support provided by the FIRST PARTY:").unwrap();
            for point in &letter.first_party_support {
                writeln!(out, "  - {point}").unwrap();
            }
            writeln!(out).unwrap();
        }

        if !letter.second_party_support.is_empty() {
            writeln!(out, "Support provided by the SECOND PARTY:").unwrap();
            for point in &letter.second_party_support {
                writeln!(out, "  - {point}").unwrap();
            }
            writeln!(out).unwrap();
        }

        for signature in &letter.signatures {
            writeln!(out, "{},", signature.label).unwrap();
            writeln!(out).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{}", signature.name).unwrap();
            writeln!(out, "{}", signature.role).unwrap();
            writeln!(out).unwrap();
        }

        Ok(out.into_bytes())
    }
}
