//! Sign window front end for a terminal: every request becomes a log line.

use bevy::prelude::*;

use simulation::banner::BannerId;
use simulation::colour::Colour;
use simulation::coords::CoordsXYZ;
use simulation::sign_window::{
    ColourMenuService, ScreenRect, SignWidget, TextPromptRequest, TextPromptService,
    ViewportFlags, ViewportHandle, ViewportService,
};

#[derive(Default)]
pub struct LoggingSignUi {
    next_viewport: u32,
}

impl ViewportService for LoggingSignUi {
    fn create_viewport(
        &mut self,
        owner: BannerId,
        rect: ScreenRect,
        world_position: CoordsXYZ,
        zoom: i8,
        flags: ViewportFlags,
    ) -> ViewportHandle {
        let handle = ViewportHandle(self.next_viewport);
        self.next_viewport = self.next_viewport.wrapping_add(1);
        info!(
            "sign {}: viewport {} at ({}, {}, {}) zoom {} size {}x{} gridlines={}",
            owner,
            handle.0,
            world_position.x,
            world_position.y,
            world_position.z,
            zoom,
            rect.width,
            rect.height,
            flags.gridlines
        );
        handle
    }

    fn remove_viewport(&mut self, handle: ViewportHandle) {
        info!("viewport {} removed", handle.0);
    }
}

impl TextPromptService for LoggingSignUi {
    fn open_text_prompt(&mut self, owner: BannerId, request: TextPromptRequest) {
        info!(
            "sign {}: prompt '{}' (current '{}', max {})",
            owner, request.title, request.initial_text, request.max_length
        );
    }
}

impl ColourMenuService for LoggingSignUi {
    fn open_colour_menu(&mut self, owner: BannerId, anchor: SignWidget, current: Colour) {
        info!(
            "sign {}: colour menu for {:?}, current {}",
            owner,
            anchor,
            current.index()
        );
    }
}
