//! `sigchanyzer`: unbuffered `os.Signal` channels passed to `signal.Notify`.
//!
//! Signal delivery does not block. A channel without buffer space drops a
//! signal that arrives while the receiver is busy, so the channel handed to
//! `signal.Notify` needs a capacity of at least one.
//!
//! For every call of `signal.Notify` the rule looks at the channel
//! argument. An inline `make(...)` is checked directly; an identifier is
//! traced one step back to the `:=` or `var` that created it. A creation
//! without a capacity is reported at the `Notify` call with a fix that adds
//! one. Anything the rule cannot follow is left alone.

pub mod classify;
pub mod fix;
pub mod origin;

use sigchan_binder::Resolver;
use sigchan_common::diagnostics::diagnostic_codes;
use sigchan_common::{Diagnostic, SuggestedFix};
use sigchan_parser::{NodeArena, NodeIndex, NodeKind};
use tracing::{debug, trace};

use crate::analysis::{Analyzer, AnalyzerOutput, INSPECT, Inspector, Pass};
use crate::error::AnalysisError;

use self::classify::CallClassifier;
use self::origin::{Origin, resolve_origin};

pub const NAME: &str = "sigchanyzer";
pub const DOC: &str =
    "check for unbuffered channel of os.Signal, which can be at risk of missing the signal.";
pub const MESSAGE: &str = "misuse of unbuffered os.Signal channel as argument to signal.Notify";
pub const FIX_MESSAGE: &str = "Change to buffer channel";

pub static SIGCHANYZER: Analyzer = Analyzer {
    name: NAME,
    doc: DOC,
    requires: &[&INSPECT],
    run,
};

/// An unbuffered creation reaching a registration call.
struct Finding {
    call: NodeIndex,
    creation: NodeIndex,
    fix: SuggestedFix,
}

fn run(pass: &mut Pass<'_>) -> Result<AnalyzerOutput, AnalysisError> {
    let inspector = pass
        .result_of::<Inspector>(&INSPECT)
        .ok_or(AnalysisError::MissingResult {
            analyzer: NAME,
            requires: INSPECT.name,
        })?;
    let (arena, resolver) = (pass.arena, pass.resolver);
    let rule = &pass.config.sigchanyzer;
    let classifier = CallClassifier::new(arena, resolver, rule);

    let mut findings = Vec::new();
    inspector.preorder(&[NodeKind::CallExpr], |call| {
        if let Some(finding) = check_call(arena, resolver, &classifier, rule.capacity, call) {
            findings.push(finding);
        }
    });

    for finding in findings {
        let Some(span) = arena.span(finding.call) else {
            continue;
        };
        let file = pass.file_name_of(finding.call).unwrap_or_default();
        let mut fix = finding.fix;
        // A package-level channel may be declared in another file.
        if let Some(creation_file) = pass.file_name_of(finding.creation)
            && creation_file != file
        {
            for edit in &mut fix.text_edits {
                edit.file = creation_file.to_string();
            }
        }
        pass.report(
            Diagnostic::warning(
                file.to_string(),
                span.start,
                span.len(),
                MESSAGE.to_string(),
                diagnostic_codes::UNBUFFERED_SIGNAL_CHANNEL,
            )
            .with_fix(fix),
        );
    }
    Ok(None)
}

fn check_call(
    arena: &NodeArena,
    resolver: &dyn Resolver,
    classifier: &CallClassifier<'_>,
    capacity: u64,
    call: NodeIndex,
) -> Option<Finding> {
    if !classifier.is_registration_call(call) {
        return None;
    }
    let Some(&channel) = arena.get_call(call)?.arguments.first() else {
        trace!(call = call.0, "registration call without arguments");
        return None;
    };

    let candidate = match arena.kind(channel)? {
        NodeKind::Ident => match resolve_origin(arena, resolver, channel) {
            Origin::Value(value) if arena.kind(value) == Some(NodeKind::CallExpr) => value,
            Origin::Value(value) => {
                debug!(call = call.0, origin = ?arena.kind(value), "channel not created by a call");
                return None;
            }
            Origin::Unresolved => {
                debug!(call = call.0, "channel variable has no declaration");
                return None;
            }
            Origin::ArityMismatch { names, values } => {
                debug!(
                    call = call.0,
                    names,
                    values,
                    "channel declared without a paired value"
                );
                return None;
            }
            Origin::Unhandled(kind) => {
                debug!(call = call.0, ?kind, "channel declared by an unhandled statement kind");
                return None;
            }
        },
        NodeKind::CallExpr => {
            if classifier.is_safe_channel_creation(channel) {
                trace!(call = call.0, "inline channel is buffered");
                return None;
            }
            channel
        }
        other => {
            trace!(call = call.0, kind = ?other, "channel argument is not followed");
            return None;
        }
    };

    if !classifier.is_channel_creation(candidate) {
        debug!(call = call.0, "origin is not a channel of the signal type");
        return None;
    }
    if classifier.argument_count(candidate) != Some(1) {
        trace!(call = call.0, "channel created with an explicit capacity");
        return None;
    }

    match fix::buffer_channel_fix(arena, candidate, capacity) {
        Ok(fix) => Some(Finding {
            call,
            creation: candidate,
            fix,
        }),
        Err(error) => {
            debug!(call = call.0, %error, "cannot render buffered channel, not reporting");
            None
        }
    }
}
