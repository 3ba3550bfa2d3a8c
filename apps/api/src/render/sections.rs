//! Portfolio sections and scroll-spy.
//!
//! The active-section rule lives here once in Rust and once as the script
//! embedded in every rendered page. Both pick the last section, in document
//! order, whose `[top, bottom)` span contains the probe.

use serde::Serialize;

/// Pixels added to the scroll offset before probing, so a section becomes
/// active a little before its heading reaches the top of the viewport.
pub const SCROLL_PROBE_OFFSET: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    About,
    Skills,
    Experience,
    Projects,
    Education,
}

impl SectionId {
    /// Document order.
    pub const ALL: [SectionId; 5] = [
        SectionId::About,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Projects,
        SectionId::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Experience => "experience",
            SectionId::Projects => "projects",
            SectionId::Education => "education",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Experience => "Experience",
            SectionId::Projects => "Projects",
            SectionId::Education => "Education",
        }
    }
}

/// Measured vertical extent of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, probe: f64) -> bool {
        probe >= self.top && probe < self.top + self.height
    }
}

/// Returns the last section, in document order, containing `probe`.
/// Sections that were not rendered are simply absent from `bounds`.
pub fn active_section(bounds: &[SectionBounds], probe: f64) -> Option<SectionId> {
    SectionId::ALL
        .iter()
        .rev()
        .find(|id| bounds.iter().any(|b| b.id == **id && b.contains(probe)))
        .copied()
}

/// Applies the scroll probe offset to a raw scroll position.
pub fn active_section_at_scroll(bounds: &[SectionBounds], scroll_y: f64) -> Option<SectionId> {
    active_section(bounds, scroll_y + SCROLL_PROBE_OFFSET)
}

/// Marks the nav link whose `data-section-link` matches the active section.
/// When no section contains the probe the previous highlight is kept.
pub const SCROLL_SPY_SCRIPT: &str = r#"document.addEventListener('DOMContentLoaded', function () {
  var links = document.querySelectorAll('[data-section-link]');
  if (links.length === 0) return;
  var order = ['about', 'skills', 'experience', 'projects', 'education'];

  function activeSection(probe) {
    var active = null;
    order.forEach(function (id) {
      var el = document.getElementById(id);
      if (!el) return;
      var top = el.offsetTop;
      if (probe >= top && probe < top + el.offsetHeight) active = id;
    });
    return active;
  }

  function update() {
    var active = activeSection(window.scrollY + 200);
    if (active === null) return;
    links.forEach(function (link) {
      link.classList.toggle('active', link.getAttribute('data-section-link') === active);
    });
  }

  window.addEventListener('scroll', update, { passive: true });
  update();
});"#;
