use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::portfolio_data::PortfolioData;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::portfolio_loader::{
    PortfolioLoader, load_portfolio_system, reload_modified_portfolio, start_loading,
};
use crate::engine::scene::building::ScenePresentationPlugin;
use crate::engine::scene::controller::SceneControllerPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scene::intro_overlay::IntroOverlayPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers PortfolioData as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<PortfolioData>::new(&["json"]))
        .add_plugins(SceneControllerPlugin)
        .add_plugins(ScenePresentationPlugin)
        .add_plugins(WebRpcPlugin);

    // The host page draws the intro overlay in browser builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_plugins(IntroOverlayPlugin);
    }

    app.init_resource::<PortfolioLoader>();

    // State-based system scheduling
    app.add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (load_portfolio_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            reload_modified_portfolio.run_if(in_state(AppState::Running)),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn,portfolio_scene=info".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
