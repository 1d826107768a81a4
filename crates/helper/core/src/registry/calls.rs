//! Message-based registration entry point for third-party content.
//!
//! Other content packs cannot link against the core, so they register targets
//! by sending a message name plus a loosely typed argument list:
//!
//! | message                | argument                     |
//! |------------------------|------------------------------|
//! | `AddTrackingCondition` | entity kind id, or predicate |
//! | `AddBlacklist`         | entity kind id, or predicate |
//!
//! Arguments are validated before anything is registered.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::env::EntityView;
use crate::registry::{EntityPredicate, RegistrationError, TrackableRegistry};
use crate::state::EntityKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum CallMessage {
    AddTrackingCondition,
    AddBlacklist,
}

/// One dynamically typed call argument.
#[derive(Clone)]
pub enum CallArg {
    Int(i64),
    Float(f64),
    Text(String),
    /// `None` models a null delegate handed over by the caller.
    Predicate(Option<EntityPredicate>),
}

impl CallArg {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::Predicate(_) => "predicate",
        }
    }
}

impl fmt::Debug for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Predicate(predicate) => f
                .debug_tuple("Predicate")
                .field(&predicate.as_ref().map(|_| ".."))
                .finish(),
        }
    }
}

/// Validates and applies one registration call.
///
/// # Errors
///
/// Fails without touching the registry when the message is unknown, the
/// argument count is not one, the argument is neither a kind id nor a
/// predicate, or the predicate is null.
pub fn handle_call(
    registry: &mut TrackableRegistry,
    message: &str,
    args: Vec<CallArg>,
) -> Result<CallMessage, RegistrationError> {
    let parsed = CallMessage::from_str(message)
        .map_err(|_| RegistrationError::UnknownMessage(message.to_owned()))?;
    let predicate = parse_args(args)?;

    match parsed {
        CallMessage::AddTrackingCondition => registry.push_condition(predicate),
        CallMessage::AddBlacklist => registry.push_blacklist(predicate),
    }
    Ok(parsed)
}

fn parse_args(mut args: Vec<CallArg>) -> Result<EntityPredicate, RegistrationError> {
    if args.len() != 1 {
        return Err(RegistrationError::ArgLength {
            expected: 1,
            found: args.len(),
        });
    }

    match args.remove(0) {
        CallArg::Int(raw) => {
            let kind = u16::try_from(raw).map(EntityKind).map_err(|_| {
                RegistrationError::ArgType {
                    index: 0,
                    found: "int out of kind range",
                }
            })?;
            Ok(Arc::new(move |entity: &EntityView| entity.kind == kind))
        }
        CallArg::Predicate(Some(predicate)) => Ok(predicate),
        CallArg::Predicate(None) => Err(RegistrationError::NullPredicate),
        other => Err(RegistrationError::ArgType {
            index: 0,
            found: other.type_name(),
        }),
    }
}
