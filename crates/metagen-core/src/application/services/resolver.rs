//! Directive resolution: which (element, directive, metadata) triples apply.
//!
//! For each registered marker, for each element the host reports as carrying
//! that marker, for each directive (registered order), for each metadata
//! instance on the element (discovery order): keep the instance when its
//! marker is assignable to the registered marker.
//!
//! Resolution is pure filtering; it never fails.

use tracing::trace;

use crate::{
    application::ports::{Assignability, Discovery},
    domain::{AppliedMetadata, DirectiveRegistry, GenerationDirective, MarkerType, TargetElement},
};

/// One applicable generation event.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'r> {
    /// The registered marker that brought the directive in.
    pub marker: &'r MarkerType,
    pub directive: &'r GenerationDirective,
    pub element: TargetElement,
    pub metadata: AppliedMetadata,
}

/// Resolve every applicable triple for the current round.
pub fn resolve<'r>(
    registry: &'r DirectiveRegistry,
    discovery: &dyn Discovery,
    types: &dyn Assignability,
) -> Vec<Resolution<'r>> {
    let mut resolved = Vec::new();

    for entry in registry.entries() {
        for element in discovery.elements_carrying(&entry.marker) {
            let applied = discovery.applied_metadata_on(&element);

            for directive in &entry.directives {
                for metadata in &applied {
                    if !types.is_assignable(metadata.marker(), &entry.marker) {
                        trace!(
                            element = %element,
                            applied = %metadata.marker(),
                            marker = %entry.marker,
                            "Skipping incompatible metadata"
                        );
                        continue;
                    }

                    resolved.push(Resolution {
                        marker: &entry.marker,
                        directive,
                        element: element.clone(),
                        metadata: metadata.clone(),
                    });
                }
            }
        }
    }

    resolved
}
