use core::str::from_utf8;
use ledger_device_sdk::ui::{
    bagls, gadgets,
    layout::{self, Draw, StringPlace},
    screen_util,
};
use sia_utils::pagination::PaginationWindow;
use sia_utils::session::Reviewer;

/// Draws the review window: the label in bold above the visible slice of
/// the text, with an arrow on each side the text can still scroll to.
pub struct ScreenReviewer;

impl Reviewer for ScreenReviewer {
    fn show(&mut self, window: &PaginationWindow) {
        gadgets::clear_screen();

        if window.can_seek_left() {
            bagls::LEFT_ARROW.display();
        }
        if window.can_seek_right() {
            bagls::RIGHT_ARROW.display();
        }

        // Window contents are ascii, an invalid slice shows up blank.
        let label = from_utf8(window.label()).unwrap_or("");
        let text = from_utf8(window.visible()).unwrap_or("");
        let mut lines = [bagls::Label::from(label), bagls::Label::from(text)];
        lines[0].bold = true;
        lines.place(layout::Location::Middle, layout::Layout::Centered, false);

        screen_util::screen_update();
    }
}
