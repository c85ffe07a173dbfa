use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::config::{MAP_HEIGHT, MAP_WIDTH};
use simulation::sign_window::SignUi;
use simulation::tile_elements::TileElementStore;

mod agent_mode;
mod demo;
mod logging_ui;

/// A headless park on a flat, fully owned map. `SignUi` is installed before
/// the plugin so its default is not used.
pub(crate) fn headless_app(ui: SignUi) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TileElementStore::with_flat_surface(MAP_WIDTH, MAP_HEIGHT, true));
    app.insert_resource(ui);
    app
}

fn main() {
    // Agent mode keeps stdout for the JSON protocol, so no LogPlugin there.
    if std::env::args().any(|arg| arg == "--agent") {
        agent_mode::run_agent_mode();
        return;
    }

    let mut app = headless_app(SignUi::new(logging_ui::LoggingSignUi::default()));
    app.add_plugins(LogPlugin::default());
    app.add_plugins(simulation::SimulationPlugin);

    // Run Startup so content is loaded before the demo places anything.
    app.update();
    demo::run(&mut app);
}
