use super::hash::placement_digest;

/// True when this node owns `key`: no peer's `digest(peer + key)` is strictly
/// below `digest(self_addr + key)`.
///
/// Equal digests do not disqualify the evaluating node, so under a collision
/// more than one node may consider itself the owner. With no peers the node
/// owns everything.
pub fn is_owner(self_addr: &str, peers: &[String], key: &str) -> bool {
    let mine = placement_digest(self_addr, key);
    wins(mine, peers.iter().map(|peer| placement_digest(peer, key)))
}

/// The ownership comparison on precomputed digests.
pub fn wins(mine: u32, others: impl IntoIterator<Item = u32>) -> bool {
    others.into_iter().all(|other| other >= mine)
}

/// Address of the node with the minimal digest for `key`.
///
/// Ties go to `self_addr` first, then to the earliest peer in list order.
pub fn resolve_owner<'a>(self_addr: &'a str, peers: &'a [String], key: &str) -> &'a str {
    let mut owner = self_addr;
    let mut lowest = placement_digest(self_addr, key);

    for peer in peers {
        let candidate = placement_digest(peer, key);
        if candidate < lowest {
            owner = peer;
            lowest = candidate;
        }
    }

    owner
}
