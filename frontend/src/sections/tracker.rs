/// What the tracker needs from the page: scroll metrics, where each section
/// starts, and a way to bring a section into view.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Top offset of the section element, `None` if it is not rendered.
    fn section_top(&self, id: &str) -> Option<f64>;
    /// Smooth-scrolls the section to the top. Returns false if it does not exist.
    fn scroll_to_section(&self, id: &str) -> bool;
}

/// Last section whose top is at or above `reference`. Missing sections are
/// skipped, and nothing matching means the first section.
pub fn active_index<I>(reference: f64, tops: I) -> usize
where
    I: IntoIterator<Item = Option<f64>>,
{
    tops.into_iter()
        .enumerate()
        .fold(0, |active, (index, top)| match top {
            Some(top) if reference >= top => index,
            _ => active,
        })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionTracker {
    sections: &'static [&'static str],
    active: usize,
}

impl SectionTracker {
    pub fn new(sections: &'static [&'static str]) -> Self {
        Self { sections, active: 0 }
    }

    pub fn active_id(&self) -> Option<&'static str> {
        self.sections.get(self.active).copied()
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.sections.len()
    }

    pub fn position_label(&self) -> String {
        format!("{}/{}", self.active + 1, self.sections.len())
    }

    /// Reference point is the middle of the viewport.
    pub fn recompute(&mut self, viewport: &impl Viewport) -> usize {
        let reference = viewport.scroll_y() + viewport.viewport_height() / 2.0;
        self.active = active_index(
            reference,
            self.sections.iter().map(|id| viewport.section_top(id)),
        );
        self.active
    }

    pub fn clamp(&self, index: isize) -> usize {
        let last = self.sections.len().saturating_sub(1);
        if index <= 0 {
            0
        } else {
            (index as usize).min(last)
        }
    }

    /// Scrolls to the clamped index and marks it active right away, without
    /// waiting for the scroll events to catch up.
    pub fn navigate_to(&mut self, index: isize, viewport: &impl Viewport) -> usize {
        let index = self.clamp(index);
        if let Some(id) = self.sections.get(index) {
            if viewport.scroll_to_section(id) {
                self.active = index;
            }
        }
        self.active
    }

    pub fn next(&mut self, viewport: &impl Viewport) -> usize {
        self.navigate_to(self.active as isize + 1, viewport)
    }

    pub fn previous(&mut self, viewport: &impl Viewport) -> usize {
        self.navigate_to(self.active as isize - 1, viewport)
    }
}
