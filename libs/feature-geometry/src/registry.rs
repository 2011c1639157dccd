//! # Handler Registry
//!
//! Ordered list of cut handlers. Dispatch walks it from the highest
//! priority down and returns the first handler whose category list and
//! `can_handle` heuristics both accept the feature.

use crate::handlers::{
    ComplexContourHandler, ContourCutHandler, CutHandler, EndCutHandler, ExteriorCopingHandler,
    FallbackHandler, GrooveHandler, HoleHandler, MarkingHandler, NotchHandler,
    PartialNotchHandler, RectangularCutHandler, SlotHandler, SupportedCategories,
};
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use std::sync::Arc;

struct Entry {
    handler: Arc<dyn CutHandler>,
    supported: SupportedCategories,
}

/// Priority-ordered cut handlers.
///
/// Built once and shared by reference; dispatch does not mutate it.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: Vec<Entry>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in handlers.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PartialNotchHandler));
        registry.register(Arc::new(ExteriorCopingHandler));
        registry.register(Arc::new(SlotHandler));
        registry.register(Arc::new(ComplexContourHandler));
        registry.register(Arc::new(RectangularCutHandler));
        registry.register(Arc::new(HoleHandler));
        registry.register(Arc::new(EndCutHandler));
        registry.register(Arc::new(NotchHandler));
        registry.register(Arc::new(MarkingHandler));
        registry.register(Arc::new(GrooveHandler));
        registry.register(Arc::new(ContourCutHandler));
        registry.register(Arc::new(FallbackHandler));
        registry
    }

    /// Adds a handler. Equal priorities keep registration order.
    pub fn register(&mut self, handler: Arc<dyn CutHandler>) {
        let priority = handler.priority();
        let at = self
            .entries
            .iter()
            .position(|e| e.handler.priority() < priority)
            .unwrap_or(self.entries.len());
        let supported = handler.supported_categories();
        self.entries.insert(at, Entry { handler, supported });
    }

    /// Selects the handler for a feature.
    pub fn dispatch(
        &self,
        category: &FeatureCategory,
        feature: &NormalizedFeature,
        element: &ProfileElement,
    ) -> Option<Arc<dyn CutHandler>> {
        let selected = self
            .entries
            .iter()
            .find(|e| e.supported.contains(category) && e.handler.can_handle(category, feature, element))
            .map(|e| Arc::clone(&e.handler));

        match &selected {
            Some(handler) => tracing::debug!(
                "Dispatch: feature {} ({}) -> {} [{}]",
                feature.id,
                category,
                handler.name(),
                handler.priority()
            ),
            None => tracing::debug!("Dispatch: no handler for feature {} ({})", feature.id, category),
        }
        selected
    }

    /// Handlers in dispatch order.
    pub fn handlers(&self) -> impl Iterator<Item = &Arc<dyn CutHandler>> + '_ {
        self.entries.iter().map(|e| &e.handler)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.handler.name(), e.handler.priority())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::GeometryService;
    use crate::error::HandlerError;
    use crate::model::{FeatureParams, ProfileDimensions, ProfileKind};
    use glam::DVec2;
    use profile_mesh::Mesh;

    struct Always {
        name: &'static str,
        priority: i32,
    }

    impl CutHandler for Always {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn supported_categories(&self) -> SupportedCategories {
            SupportedCategories::All
        }

        fn can_handle(&self, _: &FeatureCategory, _: &NormalizedFeature, _: &ProfileElement) -> bool {
            true
        }

        fn create_cut_geometry(
            &self,
            _: &NormalizedFeature,
            _: &ProfileElement,
            _: &GeometryService,
        ) -> Result<Mesh, HandlerError> {
            Ok(Mesh::new())
        }
    }

    fn always(name: &'static str, priority: i32) -> Arc<dyn CutHandler> {
        Arc::new(Always { name, priority })
    }

    fn element() -> ProfileElement {
        ProfileElement::new(
            "beam",
            ProfileKind::IBeam,
            ProfileDimensions {
                length: 1000.0,
                height: 200.0,
                width: 100.0,
                web_thickness: 10.0,
                flange_thickness: 15.0,
                root_radius: None,
            },
        )
    }

    fn hole() -> NormalizedFeature {
        NormalizedFeature::new(
            "h1",
            FeatureCategory::Hole,
            "web",
            FeatureParams::Hole {
                center: DVec2::new(50.0, 50.0),
                diameter: 20.0,
                depth: None,
                elongation: 0.0,
            },
        )
    }

    #[test]
    fn test_higher_priority_wins_in_any_order() {
        for order in [[70, 68], [68, 70]] {
            let mut registry = HandlerRegistry::new();
            for p in order {
                registry.register(always(if p == 70 { "a" } else { "b" }, p));
            }
            let picked = registry.dispatch(&FeatureCategory::Hole, &hole(), &element()).unwrap();
            assert_eq!(picked.name(), "a");
        }
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let mut registry = HandlerRegistry::new();
        registry.register(always("first", 10));
        registry.register(always("second", 10));
        registry.register(always("top", 20));
        let names: Vec<_> = registry.handlers().map(|h| h.name()).collect();
        assert_eq!(names, ["top", "first", "second"]);
    }

    #[test]
    fn test_default_handlers_are_sorted() {
        let registry = HandlerRegistry::with_default_handlers();
        assert_eq!(registry.len(), 12);
        let priorities: Vec<_> = registry.handlers().map(|h| h.priority()).collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(registry.handlers().last().map(|h| h.name()), Some("fallback"));
    }

    #[test]
    fn test_empty_registry_dispatches_nothing() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.dispatch(&FeatureCategory::Hole, &hole(), &element()).is_none());
    }

    #[test]
    fn test_hole_dispatches_to_hole_handler() {
        let registry = HandlerRegistry::with_default_handlers();
        let picked = registry.dispatch(&FeatureCategory::Hole, &hole(), &element()).unwrap();
        assert_eq!(picked.name(), "hole");
    }
}
