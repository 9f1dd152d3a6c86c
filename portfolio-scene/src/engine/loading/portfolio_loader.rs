use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::PORTFOLIO_ASSET_PATH;

use super::sample_portfolio::sample_portfolio;
use crate::engine::assets::portfolio_data::PortfolioData;
use crate::error::PortfolioError;

#[derive(Resource, Default)]
pub struct PortfolioLoader {
    handle: Option<Handle<PortfolioData>>,
    resolved: bool,
    host_provided: bool,
}

impl PortfolioLoader {
    /// The host page pushed its own portfolio; the file no longer drives the scene.
    pub fn mark_host_provided(&mut self) {
        self.host_provided = true;
    }
}

// Start the loading process
pub fn start_loading(mut portfolio_loader: ResMut<PortfolioLoader>, asset_server: Res<AssetServer>) {
    portfolio_loader.handle = Some(asset_server.load(PORTFOLIO_ASSET_PATH));
}

/// Publishes the portfolio as a resource once it is available. A portfolio
/// already pushed by the host page wins; a failed load falls back to the
/// sample portfolio so the scene still has doors to show.
pub fn load_portfolio_system(
    mut commands: Commands,
    mut portfolio_loader: ResMut<PortfolioLoader>,
    asset_server: Res<AssetServer>,
    portfolios: Res<Assets<PortfolioData>>,
    existing: Option<Res<PortfolioData>>,
) {
    if portfolio_loader.resolved {
        return;
    }

    if existing.is_some() {
        info!("✓ Portfolio provided by host, skipping asset");
        portfolio_loader.resolved = true;
        portfolio_loader.host_provided = true;
        return;
    }

    let Some(handle) = portfolio_loader.handle.clone() else {
        return;
    };

    if let Some(portfolio) = portfolios.get(&handle) {
        info!("✓ Portfolio loaded from {}", PORTFOLIO_ASSET_PATH);
        commands.insert_resource(portfolio.clone());
        portfolio_loader.resolved = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        let error = PortfolioError::AssetLoad {
            path: PORTFOLIO_ASSET_PATH.to_string(),
            reason: err.to_string(),
        };
        warn!("{error}; falling back to sample portfolio");
        commands.insert_resource(sample_portfolio());
        portfolio_loader.resolved = true;
    }
}

/// Republishes the portfolio when its asset is modified on disk, which makes
/// the scene recompute its doors. Once the host page has pushed a portfolio,
/// file edits are ignored.
pub fn reload_modified_portfolio(
    mut commands: Commands,
    mut asset_events: EventReader<AssetEvent<PortfolioData>>,
    portfolio_loader: Res<PortfolioLoader>,
    portfolios: Res<Assets<PortfolioData>>,
) {
    let Some(handle) = portfolio_loader.handle.as_ref() else {
        asset_events.clear();
        return;
    };
    if portfolio_loader.host_provided {
        asset_events.clear();
        return;
    }

    for event in asset_events.read() {
        if !event.is_modified(handle) {
            continue;
        }
        if let Some(portfolio) = portfolios.get(handle) {
            info!("Portfolio asset modified, reloading doors");
            commands.insert_resource(portfolio.clone());
        }
    }
}
