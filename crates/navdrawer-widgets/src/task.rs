#![forbid(unsafe_code)]

//! Deferred drawer work.

use navdrawer_runtime::Task;

/// Every task the drawer puts on its scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerTask {
    /// Add the shown class to the backdrop. Runs on the next frame if the
    /// drawer is still open.
    ShowBackdrop,
    /// Hide the backdrop after its fade-out. Runs only if still closed.
    HideBackdrop,
    /// Debounced close after the viewport stopped resizing.
    ResizeClose,
    /// Scroll to a fragment after a drawer link closed the drawer. Falls back
    /// to setting the location fragment when the element is gone.
    ScrollToFragment(String),
    /// Navigate to an absolute URL after a drawer link closed the drawer.
    Navigate(String),
    /// Correct the scroll position for the sticky header after load or a
    /// fragment change.
    SettleScroll(String),
}

impl Task for DrawerTask {
    fn name(&self) -> &'static str {
        match self {
            Self::ShowBackdrop => "show_backdrop",
            Self::HideBackdrop => "hide_backdrop",
            Self::ResizeClose => "resize_close",
            Self::ScrollToFragment(_) => "scroll_to_fragment",
            Self::Navigate(_) => "navigate",
            Self::SettleScroll(_) => "settle_scroll",
        }
    }
}
