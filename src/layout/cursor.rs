//! # Page Cursor
//!
//! The write position within the document being built. Every draw is
//! preceded by [`PageCursor::ensure_space`] with the exact height it is
//! about to consume, so nothing placed through the cursor runs past the
//! bottom margin.

use super::{DrawCommand, LayoutPage, PageGeometry};

/// Slack for rounding when a reservation is later consumed in pieces.
const FIT_TOLERANCE: f64 = 1e-6;

/// Owns the pages of one document and the vertical offset on the last one.
#[derive(Debug)]
pub struct PageCursor {
    geometry: PageGeometry,
    pages: Vec<LayoutPage>,
    /// Top-down offset from the page's top edge, in points.
    y: f64,
}

impl PageCursor {
    /// Open a document with one empty page and the cursor at the top margin.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LayoutPage::new(geometry)],
            y: geometry.margin,
        }
    }

    /// Make sure `height` points fit above the bottom margin, starting a new
    /// page if they do not. Returns `true` when a page was added.
    ///
    /// Negative or NaN heights count as zero. A cursor already sitting at the
    /// top of an empty page never breaks again: a block taller than a whole
    /// page would only produce blank pages.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        let height = clamp_height(height);
        if height <= self.remaining() + FIT_TOLERANCE {
            return false;
        }
        if self.at_top_of_blank_page() {
            log::debug!(
                "block of {:.1}pt exceeds page capacity {:.1}pt on page {}",
                height,
                self.bottom() - self.y,
                self.pages.len()
            );
            return false;
        }
        self.new_page();
        true
    }

    /// Move the cursor down after drawing.
    pub fn advance(&mut self, height: f64) {
        self.y += clamp_height(height);
    }

    /// Append a page and move the cursor to its top margin.
    pub fn new_page(&mut self) {
        self.pages.push(LayoutPage::new(self.geometry));
        self.y = self.geometry.margin;
        log::debug!("page break, now on page {}", self.pages.len());
    }

    /// Draw onto the current page.
    pub fn draw(&mut self, command: DrawCommand) {
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Lowest y any content may reach.
    pub fn bottom(&self) -> f64 {
        self.geometry.height - self.geometry.margin
    }

    /// Space left above the bottom margin.
    pub fn remaining(&self) -> f64 {
        (self.bottom() - self.y).max(0.0)
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn into_pages(self) -> Vec<LayoutPage> {
        self.pages
    }

    fn at_top_of_blank_page(&self) -> bool {
        self.y <= self.geometry.margin && self.pages.last().is_some_and(|p| p.commands.is_empty())
    }
}

fn clamp_height(height: f64) -> f64 {
    if height.is_nan() {
        0.0
    } else {
        height.max(0.0)
    }
}
