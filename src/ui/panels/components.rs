// src/ui/panels/components.rs
//
// Components and resources for the in-tour panels.

use bevy::prelude::*;

/// Root of every node spawned for the tour; despawned when the tour ends.
#[derive(Component, Debug)]
pub struct TourUi;

#[derive(Component, Debug)]
pub struct HudLocationText;

#[derive(Component, Debug)]
pub struct HudDescriptionText;

#[derive(Component, Debug)]
pub struct HudProgressText;

#[derive(Component, Debug)]
pub struct InfoPanel;

#[derive(Component, Debug)]
pub struct InfoPanelTitle;

#[derive(Component, Debug)]
pub struct InfoPanelBody;

#[derive(Component, Debug)]
pub struct InfoPanelCloseButton;

#[derive(Component, Debug)]
pub struct NavigationMenu;

/// Menu entry that navigates to `index` when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavigationMenuButton {
    pub index: usize,
}

/// Text of a menu entry, recoloured by visit state.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavigationMenuLabel {
    pub index: usize,
}

#[derive(Component, Debug)]
pub struct PauseLabel;

#[derive(Component, Debug)]
pub struct CompletionBanner;

/// Which panels are open. Visibility of the nodes is synced from here.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct TourPanels {
    pub info_open: bool,
    pub menu_open: bool,
    pub completion_shown: bool,
}

/// Panel closed by a back/escape press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedPanel {
    Info,
    Menu,
}

impl TourPanels {
    pub fn open_info(&mut self) {
        self.info_open = true;
    }

    pub fn close_info(&mut self) {
        self.info_open = false;
    }

    /// Returns the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Closes the info panel first, then the menu.
    pub fn close_topmost(&mut self) -> Option<ClosedPanel> {
        if self.info_open {
            self.info_open = false;
            Some(ClosedPanel::Info)
        } else if self.menu_open {
            self.menu_open = false;
            Some(ClosedPanel::Menu)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_info_before_menu() {
        let mut panels = TourPanels::default();
        panels.open_info();
        assert!(panels.toggle_menu());

        assert_eq!(panels.close_topmost(), Some(ClosedPanel::Info));
        assert_eq!(panels.close_topmost(), Some(ClosedPanel::Menu));
        assert_eq!(panels.close_topmost(), None);
    }
}
