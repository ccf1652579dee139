//! Pre-warm key derivation and cancellation helper. Spec §4.3, §5: the
//! pre-warm is issued in parallel with Tier 2 and must be cancelled (not
//! left to complete) once Tier 2 accepts.

/// Keys a pre-warm request by company + utterance so repeat callers in the
/// same company reuse in-flight requests at the collaborator's discretion.
pub fn prewarm_key(company_id: &str, utterance: &str) -> String {
    format!("{company_id}:{utterance}")
}
