//! Publish orchestration.
//!
//! ## Pipeline (in order):
//! 1. Publish gate check (hard stop, no store I/O)
//! 2. Validation gate on the candidate
//! 3. Fetch latest snapshot (none → empty document at 0.0.0)
//! 4. Diff candidate against latest
//! 5. No changes → idempotent answer, no write
//! 6. Bump class → next version → changelog
//! 7. dry_run short-circuit (no write)
//! 8. Conditional write; on `VersionConflict` restart once from step 3
//!
//! Every failure leaves the store as it was: the only write is the final
//! create-if-absent, which either lands completely or not at all.

use pressroom_core::changelog::{render_changelog, NO_CHANGES_DETECTED};
use pressroom_core::diff::diff;
use pressroom_core::errors::{ExErrorKind, Result};
use pressroom_core::model::{Document, Version};
use pressroom_core::policy::PublishGate;
use pressroom_core::rules::validate_for_publish;
use pressroom_core::semver::{apply_bump, bump_class, BumpClass};
use pressroom_core::{log_op_end, log_op_error, log_op_start};
use pressroom_core_types::{RequestContext, RequestId};
use pressroom_store::SnapshotStore;
use serde::Serialize;

/// Attempts per publish: the first plus one retry after a version conflict
pub const MAX_ATTEMPTS: u32 = 2;

/// Options for a publish run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// Compute version, bump and changelog without writing a snapshot
    pub dry_run: bool,
}

/// Outcome of a publish run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// New version, or the existing one when idempotent
    pub version: Version,
    /// Latest version the candidate was compared against (0.0.0 if none)
    pub previous_version: Version,
    pub changelog: String,
    /// True when the candidate matched the latest snapshot
    pub idempotent: bool,
    /// Bump applied, for observability only (never persisted)
    pub bump: BumpClass,
    /// Whether a snapshot was written by this run
    pub written: bool,
    pub request_id: RequestId,
}

/// Publish `candidate` under `slug`.
///
/// ## Errors
///
/// - `PublishDenied`: the gate refused, nothing was read or written
/// - `Validation`: the candidate is structurally invalid
/// - `StoreUnavailable`: the backend is unreachable or timed out
/// - `VersionConflict`: a concurrent publish won the computed version twice
/// - `CorruptSnapshot`: the latest snapshot cannot be decoded
/// - `VersionOverflow`: the next version does not fit
pub fn publish(
    store: &SnapshotStore,
    gate: &dyn PublishGate,
    slug: &str,
    candidate: &Document,
    options: PublishOptions,
) -> Result<PublishResult> {
    publish_with_context(store, gate, slug, candidate, options, RequestContext::new())
}

/// [`publish`] under a caller-supplied correlation context.
///
/// ## Errors
///
/// Same as [`publish`]. Errors carry the context's request id.
pub fn publish_with_context(
    store: &SnapshotStore,
    gate: &dyn PublishGate,
    slug: &str,
    candidate: &Document,
    options: PublishOptions,
    ctx: RequestContext,
) -> Result<PublishResult> {
    let span = tracing::info_span!(
        "publish",
        slug = %slug,
        request_id = %ctx.request_id,
    );
    let _entered = span.enter();

    log_op_start!(
        "publish",
        slug = %slug,
        request_id = %ctx.request_id,
        dry_run = options.dry_run,
        backend = store.backend_name()
    );
    let start = std::time::Instant::now();

    let result = publish_impl(store, gate, slug, candidate, options, &ctx).map_err(|e| {
        let mut e = e.with_request_id(ctx.request_id.clone());
        if let Some(trace_id) = &ctx.trace_id {
            e = e.with_trace_id(trace_id.clone());
        }
        log_op_error!(
            "publish",
            e,
            duration_ms = start.elapsed().as_millis() as u64,
            slug = %slug
        );
        e
    })?;

    log_op_end!(
        "publish",
        duration_ms = start.elapsed().as_millis() as u64,
        slug = %slug,
        version = %result.version,
        previous_version = %result.previous_version,
        bump = result.bump.as_str(),
        idempotent = result.idempotent,
        written = result.written
    );

    Ok(result)
}

fn publish_impl(
    store: &SnapshotStore,
    gate: &dyn PublishGate,
    slug: &str,
    candidate: &Document,
    options: PublishOptions,
    ctx: &RequestContext,
) -> Result<PublishResult> {
    // ===== STEP 1: Gate (before any store access) =====
    gate.check(slug)?;

    // ===== STEP 2: Validation =====
    validate_for_publish(slug, candidate)?;

    // ===== STEPS 3-8, at most twice =====
    let mut attempt = 1;
    loop {
        match publish_attempt(store, slug, candidate, options, ctx) {
            Err(e) if e.kind() == ExErrorKind::VersionConflict && attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    slug = %slug,
                    version = e.version().unwrap_or_default(),
                    attempt,
                    "Version taken by a concurrent publish, retrying against new latest"
                );
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}

fn publish_attempt(
    store: &SnapshotStore,
    slug: &str,
    candidate: &Document,
    options: PublishOptions,
    ctx: &RequestContext,
) -> Result<PublishResult> {
    // ===== STEP 3: Latest, or the empty baseline =====
    let (previous_document, previous_version) = match store.get_latest(slug) {
        Ok(snapshot) => (snapshot.document, snapshot.version),
        Err(e) if e.kind() == ExErrorKind::NotFound => (Document::empty(), Version::INITIAL),
        Err(e) => return Err(e),
    };

    // ===== STEP 4: Diff =====
    let changes = diff(candidate, &previous_document);
    tracing::debug!(
        slug = %slug,
        previous_version = %previous_version,
        change_count = changes.changes().len(),
        "Computed diff against latest"
    );

    // ===== STEP 5: Idempotent short-circuit =====
    if !changes.has_changes() {
        return Ok(PublishResult {
            version: previous_version,
            previous_version,
            changelog: NO_CHANGES_DETECTED.to_string(),
            idempotent: true,
            bump: BumpClass::None,
            written: false,
            request_id: ctx.request_id.clone(),
        });
    }

    // ===== STEP 6: Version and changelog =====
    let bump = bump_class(&changes);
    let version = apply_bump(previous_version, bump).map_err(|e| e.with_slug(slug))?;
    let changelog = render_changelog(&changes);

    let result = PublishResult {
        version,
        previous_version,
        changelog,
        idempotent: false,
        bump,
        written: false,
        request_id: ctx.request_id.clone(),
    };

    // ===== STEP 7: Dry run =====
    if options.dry_run {
        return Ok(result);
    }

    // ===== STEP 8: Conditional write =====
    store.write(slug, &result.version, candidate, &result.changelog)?;

    Ok(PublishResult {
        written: true,
        ..result
    })
}
