//! Presentation services a sign window drives but does not own.
//!
//! A front end supplies one implementation of all three traits and installs
//! it in the [`SignUi`] resource. Prompt and menu results come back later as
//! [`SignWindowEvent`](super::SignWindowEvent)s.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::coords::CoordsXYZ;

use super::SignWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportHandle(pub u32);

/// Screen-space rectangle relative to the owning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportFlags {
    pub gridlines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPromptRequest {
    pub title: String,
    pub placeholder: String,
    pub initial_text: String,
    pub max_length: usize,
}

pub trait ViewportService {
    fn create_viewport(
        &mut self,
        owner: BannerId,
        rect: ScreenRect,
        world_position: CoordsXYZ,
        zoom: i8,
        flags: ViewportFlags,
    ) -> ViewportHandle;

    fn remove_viewport(&mut self, handle: ViewportHandle);
}

pub trait TextPromptService {
    fn open_text_prompt(&mut self, owner: BannerId, request: TextPromptRequest);
}

pub trait ColourMenuService {
    fn open_colour_menu(&mut self, owner: BannerId, anchor: SignWidget, current: Colour);
}

/// Everything a sign window needs from the front end.
pub trait SignUiServices: ViewportService + TextPromptService + ColourMenuService {}

impl<T: ViewportService + TextPromptService + ColourMenuService> SignUiServices for T {}

/// The installed front end.
#[derive(Resource)]
pub struct SignUi {
    services: Box<dyn SignUiServices + Send + Sync>,
}

impl SignUi {
    pub fn new(services: impl SignUiServices + Send + Sync + 'static) -> Self {
        Self {
            services: Box::new(services),
        }
    }

    pub fn services_mut(&mut self) -> &mut (dyn SignUiServices + Send + Sync) {
        self.services.as_mut()
    }
}

impl Default for SignUi {
    fn default() -> Self {
        Self::new(HeadlessSignUi::default())
    }
}

/// A call a sign window made on its front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    CreateViewport {
        owner: BannerId,
        handle: ViewportHandle,
        rect: ScreenRect,
        world_position: CoordsXYZ,
        zoom: i8,
        flags: ViewportFlags,
    },
    RemoveViewport(ViewportHandle),
    TextPrompt {
        owner: BannerId,
        request: TextPromptRequest,
    },
    ColourMenu {
        owner: BannerId,
        anchor: SignWidget,
        current: Colour,
    },
}

/// Front end with no screen: logs and records every call. Clones share the
/// same record, so a caller can keep one to inspect what the windows asked for.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSignUi {
    calls: Arc<Mutex<Vec<UiCall>>>,
    next_viewport: u32,
}

impl HeadlessSignUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn take_calls(&self) -> Vec<UiCall> {
        self.calls
            .lock()
            .map(|mut calls| std::mem::take(&mut *calls))
            .unwrap_or_default()
    }

    fn record(&self, call: UiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl ViewportService for HeadlessSignUi {
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
        debug!(
            "viewport {:?} for banner {} at ({}, {}, {})",
            handle, owner, world_position.x, world_position.y, world_position.z
        );
        self.record(UiCall::CreateViewport {
            owner,
            handle,
            rect,
            world_position,
            zoom,
            flags,
        });
        handle
    }

    fn remove_viewport(&mut self, handle: ViewportHandle) {
        self.record(UiCall::RemoveViewport(handle));
    }
}

impl TextPromptService for HeadlessSignUi {
    fn open_text_prompt(&mut self, owner: BannerId, request: TextPromptRequest) {
        info!("text prompt '{}' for banner {}", request.title, owner);
        self.record(UiCall::TextPrompt { owner, request });
    }
}

impl ColourMenuService for HeadlessSignUi {
    fn open_colour_menu(&mut self, owner: BannerId, anchor: SignWidget, current: Colour) {
        info!(
            "colour menu {:?} for banner {} (current {})",
            anchor,
            owner,
            current.index()
        );
        self.record(UiCall::ColourMenu {
            owner,
            anchor,
            current,
        });
    }
}
