use bevy::prelude::*;

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::config::{
    GeneralConfig, SIGN_TEXT_MAX_LENGTH, SIGN_VIEWPORT_HEIGHT, SIGN_VIEWPORT_LEFT,
    SIGN_VIEWPORT_TOP, SIGN_VIEWPORT_WIDTH, SIGN_VIEWPORT_ZOOM,
};
use crate::coords::{CoordsXYZ, TileCoords};
use crate::element_locator::{locate, ElementHandle, SignKind};
use crate::game_actions::{ActionDispatcher, ActionError, GameAction, ParkView, SignName};
use crate::sign_capabilities::{resolve_capabilities, SignCapabilities};

use super::services::{ScreenRect, SignUiServices, TextPromptRequest, ViewportFlags, ViewportHandle};

const SIGN_VIEWPORT_RECT: ScreenRect = ScreenRect {
    left: SIGN_VIEWPORT_LEFT,
    top: SIGN_VIEWPORT_TOP,
    width: SIGN_VIEWPORT_WIDTH,
    height: SIGN_VIEWPORT_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SignWidget {
    Close,
    Viewport,
    SignText,
    Demolish,
    MainColour,
    TextColour,
}

/// What the front end should do after a window handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowResponse {
    Unchanged,
    /// Cached display state changed; redraw.
    Invalidated,
    Close,
    /// The dispatcher refused the action. Nothing local changed.
    Rejected(ActionError),
}

/// Visible state of the window's style controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignWidgetState {
    pub main_colour_visible: bool,
    pub text_colour_visible: bool,
    pub main_colour: Colour,
    pub text_colour: Colour,
}

/// Property window bound to one banner's sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignWindow {
    banner_id: BannerId,
    kind: SignKind,
    /// Tile and scenery entry the window opened on. A banner slot freed and
    /// reused for another sign never matches both.
    position: TileCoords,
    entry: u16,
    main_colour: Colour,
    text_colour: Colour,
    view_z: i32,
    capabilities: SignCapabilities,
    viewport: Option<ViewportHandle>,
}

impl SignWindow {
    /// Open a window on `banner_id`. Returns `None` when the banner does not
    /// exist or no element of `kind` on its tile displays it.
    pub fn open<P, S>(
        park: &P,
        config: &GeneralConfig,
        services: &mut S,
        banner_id: BannerId,
        kind: SignKind,
    ) -> Option<SignWindow>
    where
        P: ParkView + ?Sized,
        S: SignUiServices + ?Sized,
    {
        let banner = park.banners().get(banner_id)?;
        let handle = match locate(park.tiles(), park.scenery(), banner.position, banner_id, kind) {
            Ok(handle) => handle,
            Err(not_found) => {
                debug!("sign window for banner {}: {}", banner_id, not_found);
                return None;
            }
        };

        let mut window = SignWindow {
            banner_id,
            kind,
            position: banner.position,
            entry: handle.entry,
            main_colour: handle.primary,
            text_colour: handle.secondary,
            view_z: handle.base_z(),
            capabilities: resolve_capabilities(park.scenery(), kind, handle.entry),
            viewport: None,
        };
        window.create_viewport(banner.position, config, services);
        Some(window)
    }

    pub fn banner_id(&self) -> BannerId {
        self.banner_id
    }

    pub fn kind(&self) -> SignKind {
        self.kind
    }

    pub fn position(&self) -> TileCoords {
        self.position
    }

    pub fn entry(&self) -> u16 {
        self.entry
    }

    pub fn view_z(&self) -> i32 {
        self.view_z
    }

    pub fn viewport(&self) -> Option<ViewportHandle> {
        self.viewport
    }

    pub fn capabilities(&self) -> SignCapabilities {
        self.capabilities
    }

    pub fn widget_state(&self) -> SignWidgetState {
        SignWidgetState {
            main_colour_visible: self.capabilities.has_primary_colour,
            text_colour_visible: self.capabilities.has_secondary_colour,
            main_colour: self.main_colour,
            text_colour: self.text_colour,
        }
    }

    pub fn on_mouse_up<D, S>(&mut self, widget: SignWidget, dispatcher: &mut D, services: &mut S) -> WindowResponse
    where
        D: ActionDispatcher + ParkView + ?Sized,
        S: SignUiServices + ?Sized,
    {
        match widget {
            SignWidget::Close => WindowResponse::Close,
            SignWidget::Demolish => self.demolish(dispatcher),
            SignWidget::SignText => {
                let initial_text = dispatcher
                    .banners()
                    .get(self.banner_id)
                    .map(|banner| banner.text().to_string())
                    .unwrap_or_default();
                services.open_text_prompt(
                    self.banner_id,
                    TextPromptRequest {
                        title: "Sign text".to_string(),
                        placeholder: "Enter new text for this sign:".to_string(),
                        initial_text,
                        max_length: SIGN_TEXT_MAX_LENGTH,
                    },
                );
                WindowResponse::Unchanged
            }
            SignWidget::Viewport | SignWidget::MainColour | SignWidget::TextColour => {
                WindowResponse::Unchanged
            }
        }
    }

    /// Colour buttons open their menu on press, and only when the sign's
    /// scenery exposes that colour.
    pub fn on_mouse_down<S>(&mut self, widget: SignWidget, services: &mut S) -> WindowResponse
    where
        S: SignUiServices + ?Sized,
    {
        match widget {
            SignWidget::MainColour if self.capabilities.has_primary_colour => {
                services.open_colour_menu(self.banner_id, widget, self.main_colour);
            }
            SignWidget::TextColour if self.capabilities.has_secondary_colour => {
                services.open_colour_menu(self.banner_id, widget, self.text_colour);
            }
            _ => {}
        }
        WindowResponse::Unchanged
    }

    /// A colour menu closed. `None` means it was dismissed.
    pub fn on_dropdown<D>(&mut self, widget: SignWidget, index: Option<usize>, dispatcher: &mut D) -> WindowResponse
    where
        D: ActionDispatcher + ?Sized,
    {
        let Some(index) = index else {
            return WindowResponse::Unchanged;
        };
        let Some(colour) = Colour::from_dropdown_index(index) else {
            warn!("sign window {}: colour row {} outside palette", self.banner_id, index);
            return WindowResponse::Unchanged;
        };
        let (main_colour, text_colour) = match widget {
            SignWidget::MainColour => (colour, self.text_colour),
            SignWidget::TextColour => (self.main_colour, colour),
            _ => return WindowResponse::Unchanged,
        };
        let action = GameAction::SignSetStyle {
            banner_id: self.banner_id,
            main_colour,
            text_colour,
            is_large: self.kind.is_large(),
        };
        match dispatcher.submit(action) {
            Ok(_) => {
                self.main_colour = main_colour;
                self.text_colour = text_colour;
                WindowResponse::Invalidated
            }
            Err(error) => WindowResponse::Rejected(error),
        }
    }

    /// The text prompt closed. `None` means it was cancelled.
    pub fn on_text_input<D>(&mut self, text: Option<&str>, dispatcher: &mut D) -> WindowResponse
    where
        D: ActionDispatcher + ?Sized,
    {
        let Some(name) = text.and_then(SignName::new) else {
            return WindowResponse::Unchanged;
        };
        match dispatcher.submit(name.into_action(self.banner_id)) {
            Ok(_) => WindowResponse::Invalidated,
            Err(error) => WindowResponse::Rejected(error),
        }
    }

    /// The camera rotated: rebuild the viewport around the sign.
    pub fn on_viewport_rotate<S>(&mut self, config: &GeneralConfig, services: &mut S)
    where
        S: SignUiServices + ?Sized,
    {
        self.remove_viewport(services);
        self.create_viewport(self.position, config, services);
    }

    /// Release the window's viewport.
    pub fn close<S>(&mut self, services: &mut S)
    where
        S: SignUiServices + ?Sized,
    {
        self.remove_viewport(services);
    }

    /// Whether the sign this window opened on still exists.
    pub fn is_valid<P>(&self, park: &P) -> bool
    where
        P: ParkView + ?Sized,
    {
        self.relocate(park).is_some()
    }

    fn relocate<P>(&self, park: &P) -> Option<ElementHandle>
    where
        P: ParkView + ?Sized,
    {
        let banner = park.banners().get(self.banner_id)?;
        if banner.position != self.position {
            return None;
        }
        locate(park.tiles(), park.scenery(), self.position, self.banner_id, self.kind)
            .ok()
            .filter(|handle| handle.entry == self.entry)
    }

    fn demolish<D>(&mut self, dispatcher: &mut D) -> WindowResponse
    where
        D: ActionDispatcher + ParkView + ?Sized,
    {
        // The tile may have changed since the window opened.
        let Some(handle) = self.relocate(&*dispatcher) else {
            debug!("sign window {}: nothing to demolish", self.banner_id);
            return WindowResponse::Unchanged;
        };
        let action = match self.kind {
            SignKind::LargeScenery => GameAction::LargeSceneryRemove {
                location: handle.location(),
                sequence: handle.sequence,
            },
            SignKind::Wall => GameAction::WallRemove {
                location: handle.location(),
            },
        };
        match dispatcher.submit(action) {
            Ok(_) => WindowResponse::Close,
            Err(error) => WindowResponse::Rejected(error),
        }
    }

    fn create_viewport<S>(&mut self, position: TileCoords, config: &GeneralConfig, services: &mut S)
    where
        S: SignUiServices + ?Sized,
    {
        let centre = position.to_coords_xy().to_tile_centre();
        let handle = services.create_viewport(
            self.banner_id,
            SIGN_VIEWPORT_RECT,
            CoordsXYZ::new(centre, self.view_z),
            SIGN_VIEWPORT_ZOOM,
            ViewportFlags {
                gridlines: config.always_show_gridlines,
            },
        );
        self.viewport = Some(handle);
    }

    fn remove_viewport<S>(&mut self, services: &mut S)
    where
        S: SignUiServices + ?Sized,
    {
        if let Some(handle) = self.viewport.take() {
            services.remove_viewport(handle);
        }
    }
}
