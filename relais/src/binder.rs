//! Parameter binding for resolved handlers.
//!
//! Binding is stateless per call: the candidate's parameter list is walked
//! in declaration order and each formal parameter is turned into an
//! argument cell. Only the shape decision is cached (inside the resolver);
//! argument values are sourced fresh on every invocation.

use relais_core::{
    Arg, BindError, Event, HandlerCandidate, ParameterSource, ParameterSpec, Value, ValueProvider,
};

/// Provider slot for `LookupNamed` parameters: event fields.
const NAMED_SLOT: usize = 0;
/// Provider slot for `LookupExternal` parameters: the external/DI source.
const EXTERNAL_SLOT: usize = 1;

/// Compute the argument list for one invocation of `candidate`.
///
/// Whole-event parameters receive the event instance itself; lookup
/// parameters are sourced from their provider slot, falling back to the
/// parameter's default when optional. A required parameter no provider can
/// supply fails the whole binding.
pub fn bind_parameters<'a>(
    candidate: &HandlerCandidate,
    event: &'a dyn Event,
    providers: &[&dyn ValueProvider],
) -> Result<Vec<Arg<'a>>, BindError> {
    let mut args = Vec::with_capacity(candidate.params().len());
    for spec in candidate.params() {
        let arg = match spec.source() {
            ParameterSource::InjectWhole => Arg::Event(event),
            ParameterSource::LookupNamed(key) => {
                Arg::Value(lookup(candidate, spec, providers, NAMED_SLOT, key)?)
            }
            ParameterSource::LookupExternal(key) => {
                Arg::Value(lookup(candidate, spec, providers, EXTERNAL_SLOT, key)?)
            }
        };
        args.push(arg);
    }
    Ok(args)
}

fn lookup(
    candidate: &HandlerCandidate,
    spec: &ParameterSpec,
    providers: &[&dyn ValueProvider],
    slot: usize,
    key: &str,
) -> Result<Value, BindError> {
    let found = spec
        .expected()
        .and_then(|expected| providers.get(slot)?.try_get(key, expected));
    if let Some(value) = found {
        return Ok(value);
    }
    if !spec.required() {
        if let Some(default) = spec.default() {
            return Ok(default.clone());
        }
    }
    Err(BindError::ParameterBindingFailed {
        target: candidate.target_name(),
        handler: candidate.name(),
        parameter: spec.name(),
    })
}
