use crate::element_locator::SignKind;
use crate::scenery::SceneryRegistry;

/// Which style controls a sign exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignCapabilities {
    pub has_primary_colour: bool,
    pub has_secondary_colour: bool,
}

impl SignCapabilities {
    pub const NONE: SignCapabilities = SignCapabilities {
        has_primary_colour: false,
        has_secondary_colour: false,
    };
}

/// Read the colour flags declared by a sign's scenery definition.
///
/// A located element always has a resolvable definition; an unknown entry
/// trips a debug assertion and yields [`SignCapabilities::NONE`] otherwise.
pub fn resolve_capabilities(scenery: &SceneryRegistry, kind: SignKind, entry: u16) -> SignCapabilities {
    let capabilities = match kind {
        SignKind::LargeScenery => scenery.large_scenery(entry).map(|def| SignCapabilities {
            has_primary_colour: def.flags.has_primary_colour,
            has_secondary_colour: def.flags.has_secondary_colour,
        }),
        SignKind::Wall => scenery.wall(entry).map(|def| SignCapabilities {
            has_primary_colour: def.flags.has_primary_colour,
            has_secondary_colour: def.flags.has_secondary_colour,
        }),
    };
    debug_assert!(
        capabilities.is_some(),
        "sign references unknown {kind:?} entry {entry}"
    );
    capabilities.unwrap_or(SignCapabilities::NONE)
}
