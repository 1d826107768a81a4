//! One module per [`AgentState`](crate::state::AgentState).

pub(crate) mod attention;
pub(crate) mod chase;
pub(crate) mod despawn;
pub(crate) mod found;
pub(crate) mod hover;
pub(crate) mod lead;
pub(crate) mod run_away;
pub(crate) mod wait;
