//! Preview lightbox of the detail page.

use super::Session;
use crate::driver::Driver;
use crate::model::parse_position;
use crate::result::ProbeResult;
use crate::selectors as sel;

/// Lightbox showing an add-on's preview images one at a time
#[derive(Debug)]
pub struct ImageViewer<'a, D> {
    session: &'a mut Session<D>,
}

impl<'a, D: Driver> ImageViewer<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>) -> Self {
        Self { session }
    }

    /// Open the viewer on the `n`-th preview (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such preview or the viewer does not appear
    pub fn open(&mut self, n: usize) -> ProbeResult<()> {
        let previews = self.session.locator(sel::PREVIEWS);
        let handle = previews.nth(self.session.driver(), n)?;
        self.session.driver().click(&handle)?;
        self.session
            .wait_until("image viewer to open", |s| s.is_visible(sel::LIGHTBOX))
    }

    /// Whether the viewer is showing
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_visible(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::LIGHTBOX)
    }

    /// Caption text, e.g. `"Tab Blocker screenshot 2 of 3"`
    ///
    /// # Errors
    ///
    /// Returns error if the viewer is closed
    pub fn caption(&mut self) -> ProbeResult<String> {
        self.session.text(sel::LIGHTBOX_CAPTION)
    }

    /// `(shown image, image count)`, 1-based
    ///
    /// # Errors
    ///
    /// Returns error if the caption cannot be read
    pub fn position(&mut self) -> ProbeResult<(usize, usize)> {
        parse_position(&self.caption()?)
    }

    /// Index of the shown image (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if the caption cannot be read
    pub fn current_index(&mut self) -> ProbeResult<usize> {
        Ok(self.position()?.0.saturating_sub(1))
    }

    /// Number of images in the viewer
    ///
    /// # Errors
    ///
    /// Returns error if the caption cannot be read
    pub fn image_count(&mut self) -> ProbeResult<usize> {
        Ok(self.position()?.1)
    }

    /// Source of the shown image
    ///
    /// # Errors
    ///
    /// Returns error if the image is missing
    pub fn image_src(&mut self) -> ProbeResult<Option<String>> {
        self.session.attribute(sel::LIGHTBOX_IMAGE, "src")
    }

    /// Whether "next" can be used
    ///
    /// # Errors
    ///
    /// Returns error if the control is missing
    pub fn is_next_enabled(&mut self) -> ProbeResult<bool> {
        Ok(!self.session.has_class(sel::LIGHTBOX_NEXT, "disabled")?)
    }

    /// Whether "previous" can be used
    ///
    /// # Errors
    ///
    /// Returns error if the control is missing
    pub fn is_prev_enabled(&mut self) -> ProbeResult<bool> {
        Ok(!self.session.has_class(sel::LIGHTBOX_PREV, "disabled")?)
    }

    fn step(&mut self, control: &str, target: usize) -> ProbeResult<()> {
        let link = self.session.locator(control);
        self.session.click(&link)?;
        self.session.wait_until(&format!("image {}", target + 1), |s| {
            let caption = s.text(sel::LIGHTBOX_CAPTION)?;
            Ok(parse_position(&caption)?.0 == target + 1)
        })
    }

    /// Show the next image; `false` if already on the last one
    ///
    /// # Errors
    ///
    /// Returns error if the viewer does not move
    pub fn next(&mut self) -> ProbeResult<bool> {
        if !self.is_next_enabled()? {
            return Ok(false);
        }
        let target = self.current_index()? + 1;
        self.step(sel::LIGHTBOX_NEXT, target)?;
        Ok(true)
    }

    /// Show the previous image; `false` if already on the first one
    ///
    /// # Errors
    ///
    /// Returns error if the viewer does not move
    pub fn prev(&mut self) -> ProbeResult<bool> {
        if !self.is_prev_enabled()? {
            return Ok(false);
        }
        let Some(target) = self.current_index()?.checked_sub(1) else {
            return Ok(false);
        };
        self.step(sel::LIGHTBOX_PREV, target)?;
        Ok(true)
    }

    /// Close the viewer
    ///
    /// # Errors
    ///
    /// Returns error if the viewer stays open
    pub fn close(&mut self) -> ProbeResult<()> {
        let close = self.session.locator(sel::LIGHTBOX_CLOSE);
        self.session.click(&close)?;
        self.session
            .wait_until("image viewer to close", |s| Ok(!s.is_visible(sel::LIGHTBOX)?))
    }
}
