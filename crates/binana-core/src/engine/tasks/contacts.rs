use crate::engine::context::InteractionContext;
use crate::engine::features::{AtomTypePair, Buckets};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactCounts {
    pub close_contacts: Buckets<AtomTypePair>,
    pub contacts: Buckets<AtomTypePair>,
}

/// Counts typed ligand–receptor atom pairs in two independent histograms,
/// one per cutoff. A pair inside the tighter cutoff lands in both.
#[instrument(skip_all, name = "contacts_task")]
pub fn run(context: &InteractionContext) -> ContactCounts {
    let params = context.params;
    let search_radius = params.contact_cutoff.max(params.close_contact_cutoff);
    let mut counts = ContactCounts::default();

    for pair in context.atom_pairs_within(search_radius) {
        let (Some(a), Some(b)) = (pair.ligand.recognized_type(), pair.receptor.recognized_type())
        else {
            continue;
        };
        let key = AtomTypePair::new(a, b);
        if pair.distance < params.close_contact_cutoff {
            counts.close_contacts.increment(key);
        }
        if pair.distance < params.contact_cutoff {
            counts.contacts.increment(key);
        }
    }

    debug!(
        close = counts.close_contacts.total(),
        contacts = counts.contacts.total(),
        "Counted atom contacts."
    );
    counts
}
