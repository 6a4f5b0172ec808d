//! Active-section detection and the navigation links it drives.

/// Vertical extent of one page section, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGeometry {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open range test: `[top, top + height)`.
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.top && pos < self.top + self.height
    }
}

/// A navigation entry pointing at one section id.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub target: String,
    pub label: String,
    active: bool,
}

impl NavLink {
    pub fn new(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The navbar's link list.  At most one link is active at a time.
#[derive(Debug, Clone, Default)]
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NavLink> {
        self.links.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.links.iter().position(|l| l.active)
    }

    #[cfg(test)]
    pub fn active_target(&self) -> Option<&str> {
        self.links.iter().find(|l| l.active).map(|l| l.target.as_str())
    }

    /// Clear every flag, then flag the link targeting `section_id`.
    /// Returns `false` when no link targets that section (all stay cleared).
    pub fn activate(&mut self, section_id: &str) -> bool {
        let mut found = false;
        for link in &mut self.links {
            link.active = !found && link.target == section_id;
            found |= link.active;
        }
        found
    }
}

/// Picks the section under the fixed header for a given scroll offset.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSectionDetector {
    /// Added to the scroll offset to compensate for the fixed navbar.
    header_offset: f64,
}

impl ActiveSectionDetector {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// The section containing `scroll_top + header_offset`.  When ranges
    /// overlap the last one in document order wins.
    pub fn detect<'a>(
        &self,
        sections: &'a [SectionGeometry],
        scroll_top: f64,
    ) -> Option<&'a SectionGeometry> {
        let pos = scroll_top + self.header_offset;
        sections.iter().filter(|s| s.contains(pos)).last()
    }

    /// Run detection and update `links`.  No match leaves the links alone.
    pub fn apply(
        &self,
        sections: &[SectionGeometry],
        scroll_top: f64,
        links: &mut NavLinks,
    ) -> Option<String> {
        let id = self.detect(sections, scroll_top)?.id.clone();
        if !links.activate(&id) {
            tracing::debug!(section = %id, "no nav link targets active section");
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_sections() -> Vec<SectionGeometry> {
        vec![
            SectionGeometry::new("a", 0.0, 500.0),
            SectionGeometry::new("b", 500.0, 500.0),
        ]
    }

    fn links(targets: &[&str]) -> NavLinks {
        NavLinks::new(targets.iter().map(|t| NavLink::new(*t, t.to_uppercase())).collect())
    }

    #[test]
    fn header_offset_shifts_detection_point() {
        let det = ActiveSectionDetector::new(100.0);
        let sections = two_sections();
        assert_eq!(det.detect(&sections, 550.0).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(det.detect(&sections, 399.0).map(|s| s.id.as_str()), Some("a"));
        assert_eq!(det.detect(&sections, 400.0).map(|s| s.id.as_str()), Some("b"));
    }

    #[test]
    fn overlap_prefers_last_section() {
        let det = ActiveSectionDetector::new(0.0);
        let sections = vec![
            SectionGeometry::new("outer", 0.0, 1000.0),
            SectionGeometry::new("inner", 200.0, 100.0),
        ];
        assert_eq!(det.detect(&sections, 250.0).map(|s| s.id.as_str()), Some("inner"));
    }

    #[test]
    fn no_match_keeps_previous_link() {
        let det = ActiveSectionDetector::new(100.0);
        let sections = two_sections();
        let mut nav = links(&["a", "b"]);
        det.apply(&sections, 0.0, &mut nav);
        assert_eq!(nav.active_target(), Some("a"));

        assert_eq!(det.apply(&sections, 5000.0, &mut nav), None);
        assert_eq!(nav.active_target(), Some("a"));
    }

    #[test]
    fn section_without_link_clears_all() {
        let det = ActiveSectionDetector::new(100.0);
        let sections = two_sections();
        let mut nav = links(&["a"]);
        det.apply(&sections, 0.0, &mut nav);
        assert_eq!(det.apply(&sections, 600.0, &mut nav).as_deref(), Some("b"));
        assert_eq!(nav.active_index(), None);
    }

    #[test]
    fn duplicate_targets_flag_only_first() {
        let mut nav = links(&["a", "a"]);
        assert!(nav.activate("a"));
        assert_eq!(nav.iter().filter(|l| l.is_active()).count(), 1);
        assert_eq!(nav.active_index(), Some(0));
    }

    proptest! {
        #[test]
        fn at_most_one_active_link(
            heights in proptest::collection::vec(1.0f64..800.0, 1..8),
            offsets in proptest::collection::vec(-200.0f64..6000.0, 1..20),
        ) {
            let mut top = 0.0;
            let mut sections = Vec::new();
            for (i, h) in heights.iter().enumerate() {
                sections.push(SectionGeometry::new(format!("s{i}"), top, *h));
                top += h;
            }
            let mut nav = NavLinks::new(
                sections.iter().map(|s| NavLink::new(s.id.clone(), s.id.clone())).collect(),
            );
            let det = ActiveSectionDetector::new(100.0);
            for s in offsets {
                let before = nav.active_target().map(str::to_string);
                let hit = det.apply(&sections, s, &mut nav);
                prop_assert!(nav.iter().filter(|l| l.is_active()).count() <= 1);
                match hit {
                    Some(id) => {
                        let sec = sections.iter().find(|x| x.id == id).unwrap();
                        prop_assert!(sec.top <= s + 100.0 && s + 100.0 < sec.top + sec.height);
                        prop_assert_eq!(nav.active_target(), Some(id.as_str()));
                    }
                    None => prop_assert_eq!(nav.active_target().map(str::to_string), before),
                }
            }
        }
    }
}
