//! Declarative specs for every rule-based pattern except hub-and-spoke,
//! which has its own generator for the repeated spoke structure.

mod application;
mod cloud;
mod data;
mod hybrid;
mod kubernetes;
mod network;
mod security;

use crate::classifier::PatternId;
use crate::synthesis::PatternSpec;

pub use application::{APPLICATION, MICROSERVICES, SERVERLESS};
pub use cloud::{AWS, GCP};
pub use data::DATA;
pub use hybrid::HYBRID;
pub use kubernetes::KUBERNETES;
pub use network::NETWORK;
pub use security::SECURITY;

pub static SPECS: [&PatternSpec; 10] = [
    &SECURITY,
    &NETWORK,
    &APPLICATION,
    &MICROSERVICES,
    &SERVERLESS,
    &DATA,
    &AWS,
    &GCP,
    &HYBRID,
    &KUBERNETES,
];

pub fn spec_for(id: PatternId) -> Option<&'static PatternSpec> {
    SPECS.iter().copied().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{footprint, CONTAINER_SLOTS};
    use crate::synthesis::{Condition, ConnectionRule, Placement};
    use std::collections::HashSet;

    #[test]
    fn every_spec_is_reachable_by_id() {
        for spec in SPECS {
            assert_eq!(spec_for(spec.id).map(|s| s.id), Some(spec.id));
        }
        assert!(spec_for(PatternId::AzureHubSpoke).is_none());
        assert!(spec_for(PatternId::Generic).is_none());
    }

    #[test]
    fn rules_reference_declared_flags_and_ids() {
        for spec in SPECS {
            let flag_names: HashSet<&str> = spec.flags.iter().map(|f| f.name).collect();
            let ids: HashSet<&str> = spec.rules.iter().map(|r| r.component.id).collect();
            assert_eq!(ids.len(), spec.rules.len(), "{}: duplicate rule id", spec.id);

            for rule in spec.rules {
                match rule.when {
                    Condition::Always => {}
                    Condition::Flag(f) => assert!(flag_names.contains(f), "{}: unknown flag {f}", spec.id),
                    Condition::NoneOf(fs) => {
                        for f in fs {
                            assert!(flag_names.contains(f), "{}: unknown flag {f}", spec.id);
                        }
                    }
                }
                if let Placement::Nested { parent, slot } = rule.place {
                    assert!(ids.contains(parent), "{}: unknown parent {parent}", spec.id);
                    assert!(slot < CONTAINER_SLOTS, "{}: slot {slot} too large", spec.id);
                    assert_eq!(
                        footprint(rule.component.kind),
                        crate::layout::LEAF,
                        "{}: nested {} must be a leaf",
                        spec.id,
                        rule.component.id
                    );
                }
            }

            for conn in spec.connections {
                let named: Vec<&str> = match conn {
                    ConnectionRule::Link { from, to, .. } => vec![*from, *to],
                    ConnectionRule::Path { ids, .. } => ids.to_vec(),
                    ConnectionRule::HubToMany { hub, .. } => vec![*hub],
                    _ => vec![],
                };
                for id in named {
                    assert!(ids.contains(id), "{}: connection names unknown id {id}", spec.id);
                }
            }
        }
    }

    fn exclusive(a: Condition, b: Condition) -> bool {
        match (a, b) {
            (Condition::Flag(f), Condition::NoneOf(fs)) | (Condition::NoneOf(fs), Condition::Flag(f)) => {
                fs.contains(&f)
            }
            _ => false,
        }
    }

    #[test]
    fn shared_slots_are_mutually_exclusive() {
        for spec in SPECS {
            let nested: Vec<_> = spec
                .rules
                .iter()
                .filter_map(|r| match r.place {
                    Placement::Nested { parent, slot } => Some((parent, slot, r)),
                    Placement::Tier => None,
                })
                .collect();
            for (i, (pa, sa, a)) in nested.iter().enumerate() {
                for (pb, sb, b) in &nested[i + 1..] {
                    if pa == pb && sa == sb {
                        assert!(
                            exclusive(a.when, b.when),
                            "{}: {} and {} share a slot",
                            spec.id,
                            a.component.id,
                            b.component.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn control_plane_needs_a_named_product() {
        let lexicon = crate::lexicon::Lexicon::builtin();
        let plain = crate::synthesis::synthesize(&HYBRID, "hybrid architecture with search on aws", &lexicon);
        assert!(plain.component("control_plane").is_none());
        let arc = crate::synthesis::synthesize(&HYBRID, "hybrid cloud managed with azure arc", &lexicon);
        assert!(arc.component("control_plane").is_some());
    }
}
