//! Principal resolver: which identities of a swap must be subscribed.

use crate::types::{AccessPolicy, PrincipalKind};
use soroban_sdk::{Address, Env, Vec};

/// Identities that must each hold an unexpired subscription for the swap
/// to go through. An empty result places no requirement.
///
/// Identities named by more than one kind appear once. `notify_only` is
/// not considered here; the gate applies it.
pub fn resolve(
    env: &Env,
    policy: &AccessPolicy,
    caller: &Address,
    recipient: &Address,
    originator: &Address,
) -> Vec<Address> {
    let mut required: Vec<Address> = Vec::new(env);
    let candidates = [
        (PrincipalKind::Caller, caller),
        (PrincipalKind::Recipient, recipient),
        (PrincipalKind::Originator, originator),
    ];
    for (kind, principal) in candidates {
        if policy.requires(kind) && !required.iter().any(|a| a == *principal) {
            required.push_back(principal.clone());
        }
    }
    required
}
