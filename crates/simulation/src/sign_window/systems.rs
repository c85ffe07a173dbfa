use bevy::prelude::*;

use crate::banner::{BannerId, BannerRegistry};
use crate::config::GeneralConfig;
use crate::element_locator::SignKind;
use crate::game_actions::{
    ActionDispatcher, ActionResultLog, ActionSource, ParkParams, ParkRef, ParkView, WorldDispatcher,
};
use crate::scenery::SceneryRegistry;
use crate::tile_elements::TileElementStore;

use super::manager::{OpenOutcome, SignWindowManager};
use super::services::{SignUi, SignUiServices};
use super::window::{SignWidget, WindowResponse};

/// Input addressed to sign windows, in the order the player produced it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SignWindowEvent {
    Open {
        banner_id: BannerId,
        kind: SignKind,
    },
    MouseUp {
        banner_id: BannerId,
        widget: SignWidget,
    },
    MouseDown {
        banner_id: BannerId,
        widget: SignWidget,
    },
    /// A colour menu closed; `index` is `None` when dismissed.
    Dropdown {
        banner_id: BannerId,
        widget: SignWidget,
        index: Option<usize>,
    },
    /// The text prompt closed; `text` is `None` when cancelled.
    TextInput {
        banner_id: BannerId,
        text: Option<String>,
    },
    ViewportRotated,
    Close {
        banner_id: BannerId,
    },
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SignWindowResponse {
    pub banner_id: BannerId,
    pub response: WindowResponse,
}

/// Handles each event completely, dispatch included, before reading the next.
pub fn process_sign_window_events(
    mut events: EventReader<SignWindowEvent>,
    mut responses: EventWriter<SignWindowResponse>,
    mut manager: ResMut<SignWindowManager>,
    mut ui: ResMut<SignUi>,
    config: Res<GeneralConfig>,
    mut park: ParkParams,
    mut log: ResMut<ActionResultLog>,
) {
    let services = ui.services_mut();
    for event in events.read() {
        let mut dispatcher = WorldDispatcher::new(park.context(), &mut log, ActionSource::Player);
        if let Some(response) = handle_event(event, &mut manager, &mut dispatcher, &mut *services, &config) {
            responses.send(response);
        }
    }
}

fn handle_event<D, S>(
    event: &SignWindowEvent,
    manager: &mut SignWindowManager,
    dispatcher: &mut D,
    services: &mut S,
    config: &GeneralConfig,
) -> Option<SignWindowResponse>
where
    D: ActionDispatcher + ParkView,
    S: SignUiServices + ?Sized,
{
    let (banner_id, response) = match event {
        SignWindowEvent::Open { banner_id, kind } => {
            let outcome = manager.open(&*dispatcher, config, services, *banner_id, *kind);
            if outcome == OpenOutcome::Unavailable {
                debug!("no {:?} sign for banner {}", kind, banner_id);
            }
            return None;
        }
        SignWindowEvent::MouseUp { banner_id, widget } => {
            let window = manager.get_mut(*banner_id)?;
            (*banner_id, window.on_mouse_up(*widget, dispatcher, services))
        }
        SignWindowEvent::MouseDown { banner_id, widget } => {
            let window = manager.get_mut(*banner_id)?;
            (*banner_id, window.on_mouse_down(*widget, services))
        }
        SignWindowEvent::Dropdown {
            banner_id,
            widget,
            index,
        } => {
            let window = manager.get_mut(*banner_id)?;
            (*banner_id, window.on_dropdown(*widget, *index, dispatcher))
        }
        SignWindowEvent::TextInput { banner_id, text } => {
            let window = manager.get_mut(*banner_id)?;
            (*banner_id, window.on_text_input(text.as_deref(), dispatcher))
        }
        SignWindowEvent::ViewportRotated => {
            for window in manager.iter_mut() {
                window.on_viewport_rotate(config, services);
            }
            return None;
        }
        SignWindowEvent::Close { banner_id } => {
            if !manager.close(*banner_id, services) {
                return None;
            }
            return Some(SignWindowResponse {
                banner_id: *banner_id,
                response: WindowResponse::Close,
            });
        }
    };

    if response == WindowResponse::Close {
        manager.close(banner_id, services);
    }
    Some(SignWindowResponse {
        banner_id,
        response,
    })
}

/// Close windows whose sign was removed by something other than the window.
pub fn close_stale_sign_windows(
    mut manager: ResMut<SignWindowManager>,
    mut ui: ResMut<SignUi>,
    tiles: Res<TileElementStore>,
    banners: Res<BannerRegistry>,
    scenery: Res<SceneryRegistry>,
) {
    if manager.is_empty() {
        return;
    }
    let park = ParkRef {
        tiles: &tiles,
        banners: &banners,
        scenery: &scenery,
    };
    for banner_id in manager.close_invalid(&park, ui.services_mut()) {
        info!("closed sign window for removed banner {}", banner_id);
    }
}
