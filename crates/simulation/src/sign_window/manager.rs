use bevy::prelude::*;

use crate::banner::BannerId;
use crate::config::GeneralConfig;
use crate::element_locator::SignKind;
use crate::game_actions::ParkView;

use super::services::SignUiServices;
use super::window::SignWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A window for this banner was already open and is now frontmost.
    BroughtToFront,
    /// The banner or its sign could not be found.
    Unavailable,
}

/// Open sign windows, back to front. At most one per banner.
#[derive(Resource, Debug, Default)]
pub struct SignWindowManager {
    windows: Vec<SignWindow>,
}

impl SignWindowManager {
    pub fn open<P, S>(
        &mut self,
        park: &P,
        config: &GeneralConfig,
        services: &mut S,
        banner_id: BannerId,
        kind: SignKind,
    ) -> OpenOutcome
    where
        P: ParkView + ?Sized,
        S: SignUiServices + ?Sized,
    {
        if let Some(index) = self.index_of(banner_id) {
            let mut window = self.windows.remove(index);
            if window.is_valid(park) {
                self.windows.push(window);
                return OpenOutcome::BroughtToFront;
            }
            // The banner id now belongs to a different sign.
            window.close(services);
        }
        match SignWindow::open(park, config, services, banner_id, kind) {
            Some(window) => {
                info!("opened sign window for banner {}", banner_id);
                self.windows.push(window);
                OpenOutcome::Opened
            }
            None => OpenOutcome::Unavailable,
        }
    }

    pub fn close<S>(&mut self, banner_id: BannerId, services: &mut S) -> bool
    where
        S: SignUiServices + ?Sized,
    {
        let Some(index) = self.index_of(banner_id) else {
            return false;
        };
        let mut window = self.windows.remove(index);
        window.close(services);
        true
    }

    /// Close every window whose sign no longer exists.
    pub fn close_invalid<P, S>(&mut self, park: &P, services: &mut S) -> Vec<BannerId>
    where
        P: ParkView + ?Sized,
        S: SignUiServices + ?Sized,
    {
        let mut closed = Vec::new();
        self.windows.retain_mut(|window| {
            if window.is_valid(park) {
                return true;
            }
            window.close(services);
            closed.push(window.banner_id());
            false
        });
        closed
    }

    pub fn get(&self, banner_id: BannerId) -> Option<&SignWindow> {
        self.windows.iter().find(|window| window.banner_id() == banner_id)
    }

    pub fn get_mut(&mut self, banner_id: BannerId) -> Option<&mut SignWindow> {
        self.windows
            .iter_mut()
            .find(|window| window.banner_id() == banner_id)
    }

    pub fn front(&self) -> Option<&SignWindow> {
        self.windows.last()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SignWindow> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn index_of(&self, banner_id: BannerId) -> Option<usize> {
        self.windows
            .iter()
            .position(|window| window.banner_id() == banner_id)
    }
}
